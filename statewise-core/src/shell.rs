//! Dashboard Shell State
//!
//! Load sequencing for the dashboard root: the state-wise document is
//! applied first, then the demographic stats; only then is the dashboard
//! ready. Also tracks the "content updated in the background" alert.

use thiserror::Error;

use crate::payload::{DemographicStats, StateWiseData};

/// Which payload the shell is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    FetchingStatewise,
    FetchingStats,
    Ready,
}

/// Shell sequencing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// A payload arrived before the one it depends on
    #[error("Out of order: expected {expected}, got {got}")]
    OutOfOrder {
        expected: &'static str,
        got: &'static str,
    },
}

/// State owned by the dashboard root
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    phase: LoadPhase,
    statewise: Option<StateWiseData>,
    stats: Option<DemographicStats>,
    content_updated: bool,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::FetchingStatewise,
            statewise: None,
            stats: None,
            content_updated: false,
        }
    }

    /// Apply the state-wise document.
    ///
    /// During the initial load this advances to [`LoadPhase::FetchingStats`];
    /// once ready it simply replaces the data.
    pub fn apply_statewise(&mut self, data: StateWiseData) {
        self.statewise = Some(data);
        if self.phase == LoadPhase::FetchingStatewise {
            self.phase = LoadPhase::FetchingStats;
        }
    }

    /// Apply the demographic stats. Rejected until state-wise data is in.
    pub fn apply_stats(&mut self, stats: DemographicStats) -> Result<(), ShellError> {
        if self.phase == LoadPhase::FetchingStatewise {
            return Err(ShellError::OutOfOrder {
                expected: "statewise",
                got: "stats",
            });
        }
        self.stats = Some(stats);
        self.phase = LoadPhase::Ready;
        Ok(())
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase != LoadPhase::Ready
    }

    pub fn statewise(&self) -> Option<&StateWiseData> {
        self.statewise.as_ref()
    }

    pub fn stats(&self) -> Option<&DemographicStats> {
        self.stats.as_ref()
    }

    /// Newer content is available; show the reload alert
    pub fn mark_content_updated(&mut self) {
        self.content_updated = true;
    }

    pub fn dismiss_update_alert(&mut self) {
        self.content_updated = false;
    }

    pub fn show_update_alert(&self) -> bool {
        self.content_updated
    }
}
