//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_enable_export")]
    pub enable_export: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_enable_export() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "http://127.0.0.1:8084".to_string(),
            ],
            enable_export: default_enable_export(),
        }
    }
}

/// Where dashboard payloads come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// `statewise.json` and `stats.json` in `data_dir`
    #[default]
    File,
    /// `{url}/statewise` and `{url}/stats` on an upstream service
    Http,
}

/// Data source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,

    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("statewise").to_string_lossy().to_string())
        .unwrap_or_else(|| "./statewise_data".to_string())
}

fn default_refresh_interval() -> u64 {
    300 // 5 minutes
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            kind: SourceKind::default(),
            data_dir: default_data_dir(),
            url: None,
            refresh_interval_secs: default_refresh_interval(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, highest priority first
    pub fn default_paths() -> Vec<PathBuf> {
        [
            dirs::config_dir().map(|p| p.join("statewise").join("config.toml")),
            Some(PathBuf::from("/etc/statewise/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Load from default locations or environment
    pub fn load_default() -> (Self, LoadReport) {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first readable config among `paths`.
    ///
    /// Missing files are passed over silently; files that fail to load are
    /// recorded in the report. Runs before logging is set up, so nothing is
    /// logged here.
    pub fn load_first(paths: &[PathBuf]) -> (Self, LoadReport) {
        let mut skipped = Vec::new();

        for path in paths.iter().filter(|p| p.exists()) {
            match Self::load_with_env(path) {
                Ok(config) => {
                    let report = LoadReport {
                        origin: ConfigOrigin::File(path.clone()),
                        skipped,
                    };
                    return (config, report);
                }
                Err(e) => skipped.push(e),
            }
        }

        let report = LoadReport {
            origin: ConfigOrigin::Defaults,
            skipped,
        };
        (Self::from_env(), report)
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("STATEWISE_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("STATEWISE_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Source overrides
        if let Ok(data_dir) = std::env::var("STATEWISE_DATA_DIR") {
            self.source.kind = SourceKind::File;
            self.source.data_dir = data_dir;
        }
        if let Ok(url) = std::env::var("STATEWISE_SOURCE_URL") {
            self.source.kind = SourceKind::Http;
            self.source.url = Some(url);
        }
        if let Ok(secs) = std::env::var("STATEWISE_REFRESH_SECS") {
            if let Ok(s) = secs.parse() {
                self.source.refresh_interval_secs = s;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("STATEWISE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("STATEWISE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Where a loaded config came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOrigin {
    File(PathBuf),
    Defaults,
}

/// Outcome of searching the config locations
#[derive(Debug)]
pub struct LoadReport {
    pub origin: ConfigOrigin,
    /// Files that exist but could not be loaded
    pub skipped: Vec<ConfigError>,
}

impl LoadReport {
    /// Report for a config given explicitly on the command line
    pub fn from_file(path: &Path) -> Self {
        Self {
            origin: ConfigOrigin::File(path.to_path_buf()),
            skipped: Vec::new(),
        }
    }

    /// Emit the search outcome; call once logging is up
    pub fn log(&self) {
        for error in &self.skipped {
            tracing::warn!("{}", error);
        }
        match &self.origin {
            ConfigOrigin::File(path) => tracing::info!("Loaded config from {:?}", path),
            ConfigOrigin::Defaults => {
                tracing::info!("Using default config with environment overrides")
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Statewise Configuration
#
# Environment variables override these settings:
# - STATEWISE_HOST
# - STATEWISE_PORT
# - STATEWISE_DATA_DIR      (switches the source to "file")
# - STATEWISE_SOURCE_URL    (switches the source to "http")
# - STATEWISE_REFRESH_SECS
# - STATEWISE_LOG_LEVEL
# - STATEWISE_LOG_FORMAT

[server]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty = allow any)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Enable the CSV export endpoint
enable_export = true

[source]
# "file" reads statewise.json and stats.json from data_dir,
# "http" fetches {url}/statewise and {url}/stats
kind = "file"

# Directory holding the payload files
data_dir = "./statewise_data"

# Upstream base URL (http source only)
# url = "https://example.org/api"

# How often to refresh payloads (seconds)
refresh_interval_secs = 300

# Upstream request timeout (seconds)
request_timeout_secs = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.source.kind, SourceKind::File);
        assert_eq!(config.source.refresh_interval_secs, 300);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.is_json());
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.source.data_dir, "./statewise_data");
        assert!(config.server.enable_export);
        assert!(config.source.url.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::parse(
            r#"
            [source]
            kind = "http"
            url = "http://upstream.local/api"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.kind, SourceKind::Http);
        assert_eq!(config.source.url.as_deref(), Some("http://upstream.local/api"));
        assert_eq!(config.server.port, 8082);
        assert!(config.logging.is_json());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/statewise.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_first_skips_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.toml");
        let good = dir.path().join("good.toml");
        std::fs::write(&broken, "[server\nport = 1").unwrap();
        std::fs::write(&good, "[logging]\nlevel = \"debug\"").unwrap();

        let paths = vec![dir.path().join("missing.toml"), broken.clone(), good.clone()];
        let (config, report) = Config::load_first(&paths);

        assert_eq!(report.origin, ConfigOrigin::File(good));
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(&report.skipped[0], ConfigError::Parse { path, .. } if *path == broken));
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_first_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let (_, report) = Config::load_first(&[dir.path().join("missing.toml")]);

        assert_eq!(report.origin, ConfigOrigin::Defaults);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = \"not a port\"").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
