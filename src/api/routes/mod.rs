//! API Routes
//!
//! Route handlers organized by functionality.

pub mod districts;
pub mod export;
pub mod health;
pub mod payloads;
