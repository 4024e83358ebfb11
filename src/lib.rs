//! # Statewise
//!
//! Data service for a regional case-statistics dashboard. Serves the
//! state-wise and demographic payloads, sorted district tables, and a live
//! stream of content-update notifications.
//!
//! ## Features
//!
//! - **Sorted district tables**: `Unknown` always last, toggleable direction
//! - **Pluggable sources**: JSON files on disk or an upstream HTTP service
//! - **Background refresh**: payloads re-fetched on an interval
//! - **Real-time**: WebSocket notifications when content changes
//!
//! ## Modules
//!
//! - [`source`]: Where the payloads come from
//! - [`store`]: Served snapshot and update notifications
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Content update stream
//! - [`config`]: TOML configuration with environment overrides
//!
//! Sorting and the table view model live in [`statewise_core`], shared with
//! the web dashboard.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use statewise::source::FileSource;
//! use statewise::store::{DataStore, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = DataStore::new(StoreConfig::default());
//!     let source = FileSource::new("./statewise_data");
//!
//!     store.refresh(&source).await?;
//!
//!     if let Some(snapshot) = store.snapshot().await {
//!         println!("Loaded {} states", snapshot.statewise.statewise.len());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod source;
pub mod store;
pub mod websocket;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::{
    Config, ConfigError, ConfigOrigin, LoadReport, LoggingConfig, ServerConfig, SourceConfig,
    SourceKind,
};

pub use source::{FileSource, HttpSource, SourceError, SourceResult, StatsSource};

pub use store::{
    ContentEvent, DataStore, RefreshOutcome, Snapshot, StoreConfig, UpdateNotifier,
    UpdateSubscription,
};
