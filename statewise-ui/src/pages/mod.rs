//! Pages
//!
//! Top-level page components for each route.

pub mod dashboard;
pub mod demographics;

pub use dashboard::Dashboard;
pub use demographics::Demographics;
