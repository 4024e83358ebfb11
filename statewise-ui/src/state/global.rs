//! Global Application State
//!
//! Reactive state management using Leptos signals. The dashboard payloads
//! live in a single [`DashboardState`] so load sequencing stays in one place.

use leptos::*;
use statewise_core::DashboardState;

use crate::api;

/// How long an error toast stays up
const ERROR_TIMEOUT_MS: u32 = 5000;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    /// Payloads and load phase
    pub dashboard: RwSignal<DashboardState>,
    /// A payload fetch is running
    pub fetching: RwSignal<bool>,
    /// Update stream connection status
    pub ws_connected: RwSignal<bool>,
    /// When the served content last changed (ms since epoch)
    pub last_update: RwSignal<Option<i64>>,
    /// Error toast to display
    pub error: RwSignal<Option<Notice>>,
    next_notice: StoredValue<u64>,
}

/// A toast message; the id tells repeated messages apart
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Clear `current` if it still holds notice `id`
pub(crate) fn expire_notice(current: &mut Option<Notice>, id: u64) {
    if current.as_ref().is_some_and(|notice| notice.id == id) {
        *current = None;
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let state = GlobalState {
        dashboard: create_rw_signal(DashboardState::new()),
        fetching: create_rw_signal(false),
        ws_connected: create_rw_signal(false),
        last_update: create_rw_signal(None),
        error: create_rw_signal(None),
        next_notice: store_value(0),
    };

    provide_context(state);
    state
}

impl GlobalState {
    /// Fetch the state-wise document, then the stats document.
    ///
    /// Stats are only requested once state-wise data is in; a failure stops
    /// the sequence and leaves the dashboard in its current phase. A call
    /// while a fetch is running is ignored.
    pub fn load(self) {
        if self.fetching.get_untracked() {
            return;
        }
        self.fetching.set(true);

        spawn_local(async move {
            self.fetch_payloads().await;
            self.fetching.set(false);
        });
    }

    async fn fetch_payloads(self) {
        match api::fetch_statewise().await {
            Ok(data) => self.dashboard.update(|d| d.apply_statewise(data)),
            Err(e) => {
                self.show_error(&format!("Failed to load state data: {}", e));
                return;
            }
        }

        match api::fetch_stats().await {
            Ok(stats) => {
                let mut applied = Ok(());
                self.dashboard.update(|d| applied = d.apply_stats(stats));
                if let Err(e) = applied {
                    self.show_error(&e.to_string());
                }
            }
            Err(e) => self.show_error(&format!("Failed to load stats: {}", e)),
        }
    }

    /// The server has content at `version`.
    ///
    /// A dashboard still waiting on its first load fetches it directly;
    /// a loaded one shows the update alert instead.
    pub fn content_available(self, version: u64) -> bool {
        if version > 0 && self.dashboard.with_untracked(|d| d.is_loading()) {
            self.load();
            return false;
        }
        version > 0
    }

    /// Newer content is on the server
    pub fn content_updated(&self) {
        self.dashboard.update(|d| d.mark_content_updated());
    }

    /// Dismiss the update alert and pull the new content
    pub fn reload(self) {
        self.dashboard.update(|d| d.dismiss_update_alert());
        self.load();
    }

    /// Show an error message (auto-clears after timeout)
    pub fn show_error(&self, message: &str) {
        web_sys::console::error_1(&message.into());

        let id = self.next_notice.get_value();
        self.next_notice.set_value(id + 1);
        self.error.set(Some(Notice {
            id,
            message: message.to_string(),
        }));

        // A newer notice outlives this timer
        let error_signal = self.error;
        gloo_timers::callback::Timeout::new(ERROR_TIMEOUT_MS, move || {
            error_signal.update(|current| expire_notice(current, id));
        })
        .forget();
    }

    /// Clear error message
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}
