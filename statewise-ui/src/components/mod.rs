//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod alert;
pub mod demographics;
pub mod district_table;
pub mod loading;
pub mod nav;
pub mod sort_icon;
pub mod state_table;
pub mod summary;

pub use alert::{ErrorToast, UpdateAlert};
pub use demographics::DemographicBreakdown;
pub use district_table::DistrictAccordion;
pub use loading::Loading;
pub use nav::Nav;
pub use sort_icon::SortIndicator;
pub use state_table::StateTable;
pub use summary::SummaryCards;
