use crate::config::{Configuration, SettingsStore};
use crate::resolver::{StatusSnapshot, StatusSource};
use chrono::{Local, NaiveDateTime};
use parking_lot::RwLock;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type SnapshotCell = Arc<RwLock<Option<Arc<StatusSnapshot>>>>;

/// Owns the latest snapshot and is the only writer of it.
#[derive(Clone)]
pub struct Coordinator {
    source: Arc<dyn StatusSource>,
    settings: SettingsStore,
    latest: SnapshotCell,
}

/// Read-only handle on the latest snapshot, handed to presentation adapters.
#[derive(Clone)]
pub struct SnapshotReader {
    latest: SnapshotCell,
}

impl SnapshotReader {
    /// `None` until the first refresh completes.
    pub fn current(&self) -> Option<Arc<StatusSnapshot>> {
        self.latest.read().clone()
    }
}

impl Coordinator {
    pub fn new(source: Arc<dyn StatusSource>, settings: SettingsStore) -> Self {
        Self {
            source,
            settings,
            latest: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_config(source: Arc<dyn StatusSource>, config: Configuration) -> Self {
        Self::new(source, SettingsStore::new(config))
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn reader(&self) -> SnapshotReader {
        SnapshotReader {
            latest: self.latest.clone(),
        }
    }

    pub fn current(&self) -> Option<Arc<StatusSnapshot>> {
        self.latest.read().clone()
    }

    pub fn refresh(&self) -> Arc<StatusSnapshot> {
        self.refresh_at(Local::now().naive_local())
    }

    /// Resolve the day of `now` and replace the stored snapshot.
    ///
    /// Errors and panics raised by the source never escape: they are logged
    /// and replaced by [`StatusSnapshot::fallback`].
    pub fn refresh_at(&self, now: NaiveDateTime) -> Arc<StatusSnapshot> {
        let config = self.settings.get();
        let today = now.date();
        tracing::info!(%now, "updating school holiday status");

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.source.resolve(today, &config, now)
        }));
        let snapshot = match outcome {
            Ok(Ok(snapshot)) => snapshot,
            Ok(Err(err)) => {
                tracing::error!(error = %err, "error calculating school holidays status");
                StatusSnapshot::fallback(today, config.language, now)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::error!(error = %message, "school holidays resolution panicked");
                StatusSnapshot::fallback(today, config.language, now)
            }
        };

        let snapshot = Arc::new(snapshot);
        *self.latest.write() = Some(snapshot.clone());
        snapshot
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        text.to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "unknown panic".to_string()
    }
}
