//! Payload Sources
//!
//! Where the dashboard documents come from. The data service never shapes
//! the payloads itself; a source returns them ready to serve.
//!
//! - [`FileSource`]: JSON files on disk
//! - [`HttpSource`]: an upstream HTTP service

mod error;
mod file;
mod http;

pub use error::{SourceError, SourceResult};
pub use file::{FileSource, STATEWISE_FILE, STATS_FILE};
pub use http::HttpSource;

use async_trait::async_trait;
use statewise_core::{DemographicStats, StateWiseData};
use std::sync::Arc;
use std::time::Duration;

use crate::config::{SourceConfig, SourceKind};

/// A provider of dashboard payloads
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Human-readable origin, used in logs
    fn describe(&self) -> String;

    /// Fetch the state-wise document
    async fn fetch_statewise(&self) -> SourceResult<StateWiseData>;

    /// Fetch the demographic stats document
    async fn fetch_stats(&self) -> SourceResult<DemographicStats>;
}

/// Build the source described by the configuration
pub fn from_config(config: &SourceConfig) -> SourceResult<Arc<dyn StatsSource>> {
    match config.kind {
        SourceKind::File => Ok(Arc::new(FileSource::new(&config.data_dir))),
        SourceKind::Http => {
            let url = config
                .url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .ok_or_else(|| SourceError::Config("source.url is required for the http source".to_string()))?;
            let source = HttpSource::new(url, Duration::from_secs(config.request_timeout_secs))?;
            Ok(Arc::new(source))
        }
    }
}
