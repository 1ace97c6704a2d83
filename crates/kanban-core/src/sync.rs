use crate::error::CoreError;
use crate::models::Task;
use crate::repository::SnapshotStore;
use chrono::NaiveDate;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub const DEFAULT_FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Writes the full state of a day to the snapshot store in one transaction.
#[derive(Clone)]
pub struct SnapshotSynchronizer {
    store: Arc<dyn SnapshotStore>,
    timeout: Duration,
}

impl SnapshotSynchronizer {
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self {
            store,
            timeout: DEFAULT_FLUSH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the snapshot for `date` with `tasks` and marks the date.
    ///
    /// Storage failures and timeouts both come back as
    /// [`CoreError::Persistence`].
    pub async fn flush(&self, date: NaiveDate, tasks: &[Task]) -> Result<(), CoreError> {
        let started = Instant::now();
        let result = self.bounded(self.store.replace_snapshot(date, tasks)).await;

        match result {
            Ok(()) => {
                tracing::debug!(
                    %date,
                    tasks = tasks.len(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "snapshot flushed"
                );
                Ok(())
            }
            Err(err) => {
                tracing::error!(%date, operation = "flush", tasks = tasks.len(), error = ?err, "snapshot flush failed");
                Err(CoreError::persistence("flush", date, err))
            }
        }
    }

    /// Reads the stored snapshot for `date`, bounded by the same timeout.
    pub async fn load(&self, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        self.bounded(self.store.find_snapshot(date))
            .await
            .map_err(|err| {
                tracing::error!(%date, operation = "load", error = ?err, "snapshot load failed");
                CoreError::persistence("load", date, err)
            })
    }

    /// Whether `date` has ever been flushed, even with no tasks.
    pub async fn has_marker(&self, date: NaiveDate) -> Result<bool, CoreError> {
        self.bounded(self.store.has_marker(date)).await.map_err(|err| {
            tracing::error!(%date, operation = "read marker", error = ?err, "snapshot marker read failed");
            CoreError::persistence("read marker of", date, err)
        })
    }

    /// Every flushed date, oldest first. Not tied to one date, so failures
    /// come back unwrapped.
    pub async fn marked_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        self.bounded(self.store.find_marked_dates())
            .await
            .inspect_err(|err| {
                tracing::error!(operation = "list dates", error = ?err, "snapshot date listing failed");
            })
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, CoreError>>,
    ) -> Result<T, CoreError> {
        tokio::time::timeout(self.timeout, operation)
            .await
            .unwrap_or(Err(CoreError::Timeout(self.timeout)))
    }
}
