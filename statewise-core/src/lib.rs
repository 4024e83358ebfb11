//! # Statewise Core
//!
//! Shared building blocks for the Statewise regional statistics dashboard.
//! Everything here is pure and synchronous so it can run both inside the
//! data service and inside the WASM front end.
//!
//! ## Modules
//!
//! - [`metrics`]: District records and lenient integer coercion
//! - [`sort`]: District comparator and the sort-toggle state machine
//! - [`table`]: View model for the district accordion table
//! - [`payload`]: State-wise and demographic payloads served to the dashboard
//! - [`shell`]: Load sequencing for the dashboard shell
//! - [`theme`]: Light/dark theme value
//!
//! ## Example
//!
//! ```rust
//! use statewise_core::{DistrictMap, DistrictMetrics, SortDirection, sort_districts};
//!
//! let mut districts = DistrictMap::new();
//! districts.insert("A".into(), DistrictMetrics::new().with("confirmed", 10));
//! districts.insert("B".into(), DistrictMetrics::new().with("confirmed", "30"));
//! districts.insert("Unknown".into(), DistrictMetrics::new().with("confirmed", 999));
//!
//! let order = sort_districts(&districts, SortDirection::Descending, "confirmed");
//! assert_eq!(order, vec!["B", "A", "Unknown"]);
//! ```

pub mod error;
pub mod metrics;
pub mod payload;
pub mod shell;
pub mod sort;
pub mod table;
pub mod theme;

pub use error::{CoreError, CoreResult};
pub use metrics::{coerce_integer, parse_integer_prefix, DistrictMap, DistrictMetrics, UNKNOWN_DISTRICT};
pub use payload::{CaseSummary, Count, DemographicStats, StateSummary, StateWiseData, TestedSummary};
pub use shell::{DashboardState, LoadPhase, ShellError};
pub use sort::{sort_districts, SortDirection, SortState, DEFAULT_SORT_KEY};
pub use table::{fold_class, render_sort_icon, BodyRow, Column, HeaderCell, SortIcon, TableView};
pub use theme::Theme;
