//! File Source
//!
//! Reads the dashboard documents from a directory.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use statewise_core::{DemographicStats, StateWiseData};
use std::path::{Path, PathBuf};

use super::error::{SourceError, SourceResult};
use super::StatsSource;

/// File name of the state-wise document
pub const STATEWISE_FILE: &str = "statewise.json";
/// File name of the demographic stats document
pub const STATS_FILE: &str = "stats.json";

/// Payloads stored as JSON files in one directory
#[derive(Debug, Clone)]
pub struct FileSource {
    data_dir: PathBuf,
}

impl FileSource {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn read_json<T: DeserializeOwned>(
        &self,
        file: &str,
        document: &'static str,
    ) -> SourceResult<T> {
        let path = self.data_dir.join(file);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|error| SourceError::Io { path: path.clone(), error })?;

        tracing::debug!(path = ?path, bytes = bytes.len(), "Read payload file");

        serde_json::from_slice(&bytes).map_err(|error| SourceError::Parse { document, error })
    }
}

#[async_trait]
impl StatsSource for FileSource {
    fn describe(&self) -> String {
        self.data_dir.display().to_string()
    }

    async fn fetch_statewise(&self) -> SourceResult<StateWiseData> {
        self.read_json(STATEWISE_FILE, "statewise").await
    }

    async fn fetch_stats(&self) -> SourceResult<DemographicStats> {
        self.read_json(STATS_FILE, "stats").await
    }
}
