//! Snapshot Store
//!
//! Holds the payloads currently served to dashboards and refreshes them from
//! a [`StatsSource`].
//!
//! A refresh fetches the state-wise document first and the stats document
//! second. The snapshot is replaced only when both succeed, so a failing
//! upstream never leaves a half-updated pair behind; the previous snapshot
//! keeps serving.

mod updates;

pub use updates::{ContentEvent, UpdateNotifier, UpdateSubscription};

use chrono::{DateTime, Utc};
use statewise_core::{DemographicStats, StateWiseData};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::interval;

use crate::source::{SourceResult, StatsSource};

/// Payloads served at one point in time
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub statewise: StateWiseData,
    pub stats: DemographicStats,
    /// Incremented on every content change, starting at 1
    pub version: u64,
    pub fetched_at: DateTime<Utc>,
}

/// Result of a refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// First snapshot loaded; subscribers waiting on it were notified
    Loaded { version: u64, notified: usize },
    /// Content changed; subscribers were notified
    Updated { version: u64, notified: usize },
    /// Upstream content identical to the served snapshot
    Unchanged { version: u64 },
}

impl RefreshOutcome {
    pub fn version(&self) -> u64 {
        match *self {
            RefreshOutcome::Loaded { version, .. }
            | RefreshOutcome::Updated { version, .. }
            | RefreshOutcome::Unchanged { version } => version,
        }
    }
}

/// Shortest interval the background refresh will tick at
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(10);

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Interval between background refreshes (at least
    /// [`MIN_REFRESH_INTERVAL`])
    pub refresh_interval: Duration,
    /// Buffered update events per subscriber
    pub update_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(300),
            update_capacity: 16,
        }
    }
}

/// Current snapshot plus update notifications
pub struct DataStore {
    snapshot: RwLock<Option<Arc<Snapshot>>>,
    notifier: UpdateNotifier,
    config: StoreConfig,
    shutdown: RwLock<bool>,
}

impl DataStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            snapshot: RwLock::new(None),
            notifier: UpdateNotifier::new(config.update_capacity),
            config,
            shutdown: RwLock::new(false),
        }
    }

    /// Store pre-loaded with payloads (version 1)
    pub fn with_snapshot(
        config: StoreConfig,
        statewise: StateWiseData,
        stats: DemographicStats,
    ) -> Self {
        let snapshot = Snapshot {
            statewise,
            stats,
            version: 1,
            fetched_at: Utc::now(),
        };

        Self {
            snapshot: RwLock::new(Some(Arc::new(snapshot))),
            notifier: UpdateNotifier::new(config.update_capacity),
            config,
            shutdown: RwLock::new(false),
        }
    }

    /// Currently served snapshot, if any has loaded
    pub async fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.snapshot.read().await.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.snapshot.read().await.is_some()
    }

    /// Version of the served snapshot (0 before the first load)
    pub async fn version(&self) -> u64 {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|s| s.version)
            .unwrap_or(0)
    }

    /// Subscribe to content updates
    pub fn subscribe(&self) -> UpdateSubscription {
        self.notifier.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.notifier.subscriber_count()
    }

    /// Fetch both payloads and swap them in if they changed
    pub async fn refresh(&self, source: &dyn StatsSource) -> SourceResult<RefreshOutcome> {
        let statewise = source.fetch_statewise().await?;
        let stats = source.fetch_stats().await?;

        let mut guard = self.snapshot.write().await;

        let previous_version = match guard.as_ref() {
            Some(current) if current.statewise == statewise && current.stats == stats => {
                tracing::debug!(version = current.version, "Payloads unchanged");
                return Ok(RefreshOutcome::Unchanged {
                    version: current.version,
                });
            }
            Some(current) => Some(current.version),
            None => None,
        };

        let version = previous_version.map_or(1, |v| v + 1);
        let fetched_at = Utc::now();

        tracing::info!(
            version,
            states = statewise.statewise.len(),
            districts = statewise.district_count(),
            source = %source.describe(),
            "Snapshot refreshed"
        );

        *guard = Some(Arc::new(Snapshot {
            statewise,
            stats,
            version,
            fetched_at,
        }));
        drop(guard);

        // Dashboards that connected while the service was still loading
        // are waiting on this first event too
        let notified = self.notifier.publish(ContentEvent {
            version,
            timestamp: fetched_at.timestamp_millis(),
        });

        Ok(match previous_version {
            None => RefreshOutcome::Loaded { version, notified },
            Some(_) => RefreshOutcome::Updated { version, notified },
        })
    }

    /// Start the background refresh task
    ///
    /// The first tick fires immediately. Failures are logged and the
    /// previous snapshot stays in place.
    pub fn start_background_refresh(
        self: &Arc<Self>,
        source: Arc<dyn StatsSource>,
    ) -> tokio::task::JoinHandle<()> {
        let store = Arc::clone(self);
        let refresh_interval = store.config.refresh_interval.max(MIN_REFRESH_INTERVAL);

        tokio::spawn(async move {
            let mut ticker = interval(refresh_interval);

            loop {
                ticker.tick().await;

                if *store.shutdown.read().await {
                    break;
                }

                match store.refresh(source.as_ref()).await {
                    Ok(outcome) => {
                        tracing::debug!(?outcome, "Background refresh complete");
                    }
                    Err(e) => {
                        tracing::error!(source = %source.describe(), "Background refresh failed: {}", e);
                    }
                }
            }

            tracing::info!("Background refresh stopped");
        })
    }

    /// Stop background refreshing after the current tick
    pub async fn shutdown(&self) {
        *self.shutdown.write().await = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceError, StatsSource};
    use async_trait::async_trait;
    use statewise_core::{Count, StateSummary};
    use std::sync::Mutex;

    /// Source returning whatever the test sets
    struct StubSource {
        confirmed: Mutex<u64>,
        fail_stats: Mutex<bool>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl StubSource {
        fn new(confirmed: u64) -> Self {
            Self {
                confirmed: Mutex::new(confirmed),
                fail_stats: Mutex::new(false),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl StatsSource for StubSource {
        fn describe(&self) -> String {
            "stub".to_string()
        }

        async fn fetch_statewise(&self) -> SourceResult<StateWiseData> {
            self.calls.lock().unwrap().push("statewise");
            let mut data = StateWiseData::default();
            let mut state = StateSummary {
                state: "Goa".to_string(),
                ..Default::default()
            };
            state.cases.confirmed = Count(*self.confirmed.lock().unwrap());
            data.statewise.push(state);
            Ok(data)
        }

        async fn fetch_stats(&self) -> SourceResult<DemographicStats> {
            self.calls.lock().unwrap().push("stats");
            if *self.fail_stats.lock().unwrap() {
                return Err(SourceError::Config("stats unavailable".to_string()));
            }
            Ok(DemographicStats::default())
        }
    }

    #[tokio::test]
    async fn test_first_refresh_loads() {
        let store = DataStore::new(StoreConfig::default());
        let source = StubSource::new(5);
        assert!(!store.is_ready().await);

        let outcome = store.refresh(&source).await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Loaded { version: 1, notified: 0 });
        assert!(store.is_ready().await);
        assert_eq!(*source.calls.lock().unwrap(), vec!["statewise", "stats"]);
    }

    #[tokio::test]
    async fn test_subscriber_before_first_load_is_notified() {
        let store = DataStore::new(StoreConfig::default());
        let mut sub = store.subscribe();
        assert_eq!(store.version().await, 0);

        let outcome = store.refresh(&StubSource::new(5)).await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Loaded { version: 1, notified: 1 });

        let event = tokio::time::timeout(Duration::from_millis(200), sub.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.version, 1);
    }

    #[tokio::test]
    async fn test_unchanged_does_not_notify() {
        let store = DataStore::new(StoreConfig::default());
        let source = StubSource::new(5);
        store.refresh(&source).await.unwrap();

        let _sub = store.subscribe();
        let outcome = store.refresh(&source).await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Unchanged { version: 1 });
    }

    #[tokio::test]
    async fn test_change_notifies_subscribers() {
        let store = DataStore::new(StoreConfig::default());
        let source = StubSource::new(5);
        store.refresh(&source).await.unwrap();

        let mut sub = store.subscribe();
        *source.confirmed.lock().unwrap() = 9;

        let outcome = store.refresh(&source).await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Updated { version: 2, notified: 1 });

        let event = sub.recv().await.unwrap();
        assert_eq!(event.version, 2);
        assert_eq!(store.version().await, 2);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let store = DataStore::new(StoreConfig::default());
        let source = StubSource::new(5);
        store.refresh(&source).await.unwrap();

        *source.confirmed.lock().unwrap() = 9;
        *source.fail_stats.lock().unwrap() = true;
        assert!(store.refresh(&source).await.is_err());

        let snapshot = store.snapshot().await.unwrap();
        assert_eq!(snapshot.version, 1);
        assert_eq!(snapshot.statewise.statewise[0].cases.confirmed, Count(5));
    }

    #[tokio::test]
    async fn test_with_snapshot_is_ready() {
        let store = DataStore::with_snapshot(
            StoreConfig::default(),
            StateWiseData::default(),
            DemographicStats::default(),
        );
        assert!(store.is_ready().await);
        assert_eq!(store.version().await, 1);
    }

    #[tokio::test]
    async fn test_background_refresh_zero_interval() {
        let store = Arc::new(DataStore::new(StoreConfig {
            refresh_interval: Duration::ZERO,
            update_capacity: 4,
        }));
        let source: Arc<dyn StatsSource> = Arc::new(StubSource::new(1));

        let handle = store.start_background_refresh(source);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.is_ready().await);

        store.shutdown().await;
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_background_refresh_loads_and_stops() {
        let store = Arc::new(DataStore::new(StoreConfig {
            refresh_interval: Duration::from_millis(10),
            update_capacity: 4,
        }));
        let source: Arc<dyn StatsSource> = Arc::new(StubSource::new(1));

        let handle = store.start_background_refresh(source);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.is_ready().await);

        store.shutdown().await;
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .unwrap()
            .unwrap();
    }
}
