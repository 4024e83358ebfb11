//! API Access
//!
//! HTTP client for the Statewise data service.

pub mod client;

pub use client::{fetch_stats, fetch_statewise, get_api_base, updates_url};
