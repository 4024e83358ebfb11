//! Statewise CLI
//!
//! Command-line interface for the Statewise data service:
//! - Run the API server
//! - Print a state's sorted district table
//! - Generate a default config file
//!
//! # Configuration
//!
//! Read from `--config`, or from the default locations
//! (`~/.config/statewise/config.toml`, `/etc/statewise/config.toml`,
//! `./config.toml`). `STATEWISE_*` environment variables override file
//! values; `RUST_LOG` overrides the configured log level.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use statewise::api::dto::{DistrictQuery, DistrictTableResponse};
use statewise::api::routes::{districts::district_table, export::format_csv};
use statewise::api::{serve, ApiConfig, AppState};
use statewise::config::{generate_default_config, Config, LoadReport, LoggingConfig};
use statewise::source;
use statewise::store::{DataStore, StoreConfig};

#[derive(Parser)]
#[command(name = "statewise")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Data service for a regional case-statistics dashboard")]
#[command(long_about = "Statewise serves state-wise and demographic payloads to the dashboard,\nsorted district tables, and live content-update notifications.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the sorted district table of a state
    Districts {
        /// State name or code
        state: String,
        /// Metric to sort by
        #[arg(short, long, default_value = "confirmed")]
        sort: String,
        /// Sort order (desc, asc)
        #[arg(short, long, default_value = "desc")]
        order: String,
        /// Extra metric columns (comma-separated)
        #[arg(long)]
        columns: Option<String>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Config generation needs neither logging nor a loaded config
    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let (config, report) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            (config, LoadReport::from_file(path))
        }
        None => Config::load_default(),
    };

    init_logging(&config.logging);
    report.log();

    match cli.command {
        Commands::Serve { host, port } => run_server(config, host, port).await,
        Commands::Districts {
            state,
            sort,
            order,
            columns,
            format,
        } => {
            let query = DistrictQuery {
                sort: Some(sort),
                order: Some(order),
                columns,
            };
            print_districts(&config, &state, &query, format).await
        }
        Commands::Config { .. } => Ok(()),
    }
}

/// Install the tracing subscriber described by the logging config
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("statewise={},tower_http=info", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn run_server(config: Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    tracing::info!("Starting Statewise API server v{}", env!("CARGO_PKG_VERSION"));

    let mut api_config = ApiConfig::from(&config.server);
    if let Some(host) = host {
        api_config.host = host;
    }
    if let Some(port) = port {
        api_config.port = port;
    }

    let source = source::from_config(&config.source).context("building payload source")?;
    tracing::info!("Payload source: {}", source.describe());

    let store = Arc::new(DataStore::new(StoreConfig {
        refresh_interval: Duration::from_secs(config.source.refresh_interval_secs),
        ..Default::default()
    }));

    // First tick loads the initial snapshot; readiness flips once it lands
    let refresh_handle = store.start_background_refresh(Arc::clone(&source));

    let state = AppState::new(Arc::clone(&store), api_config.clone());
    serve(state, &api_config).await?;

    tracing::info!("Stopping background refresh...");
    store.shutdown().await;
    refresh_handle.abort();

    tracing::info!("Statewise API server stopped");
    Ok(())
}

async fn print_districts(
    config: &Config,
    state: &str,
    query: &DistrictQuery,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let source = source::from_config(&config.source).context("building payload source")?;
    let store = DataStore::new(StoreConfig::default());
    store
        .refresh(source.as_ref())
        .await
        .with_context(|| format!("loading payloads from {}", source.describe()))?;

    let snapshot = store
        .snapshot()
        .await
        .context("no snapshot after refresh")?;
    let response = district_table(&snapshot, state, query)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Csv => print!("{}", String::from_utf8(format_csv(&response)?)?),
        OutputFormat::Table => print_table(&response),
    }

    Ok(())
}

fn print_table(response: &DistrictTableResponse) {
    println!(
        "{} ({} districts, sorted by {} {})",
        response.state, response.total, response.sort, response.order
    );

    if response.table.is_empty() {
        println!("No district data");
        return;
    }

    // Header
    for (i, cell) in response.table.headers.iter().enumerate() {
        let title = match cell.sort_icon {
            Some(icon) => format!("{} {}", cell.title, icon.glyph()),
            None => cell.title.clone(),
        };
        if i == 0 {
            print!("{:<24}", title);
        } else {
            print!(" | {:>12}", title);
        }
    }
    println!();

    // Separator
    println!("{}", "-".repeat(24 + (response.table.headers.len() - 1) * 15));

    // Data rows
    for row in &response.table.rows {
        print!("{:<24}", row.name);
        for value in &row.values {
            print!(" | {:>12}", value);
        }
        println!();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing config to {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}
