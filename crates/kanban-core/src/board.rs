use crate::cache::CurrentDayCache;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::models::{NewTaskData, Task, TaskStatus, UpdateTaskData};
use crate::sync::SnapshotSynchronizer;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Process-wide board state: the open day, its live cache, and whether the
/// cache holds changes the store has not yet accepted.
#[derive(Debug)]
struct BoardState {
    day: NaiveDate,
    cache: CurrentDayCache,
    dirty: bool,
}

/// The single owner of the current-day cache.
///
/// Every mutation holds the state lock across "mutate cache, flush day", and
/// rollover takes the same lock, so flushes for this process never interleave
/// and the store always trails the cache by at most one failed flush.
pub struct Board {
    state: Mutex<BoardState>,
    sync: SnapshotSynchronizer,
    clock: Arc<dyn Clock>,
}

impl Board {
    /// Builds the board for the clock's current day, loading whatever the
    /// store already holds for it.
    pub async fn open(sync: SnapshotSynchronizer, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let day = clock.today();
        let tasks = sync.load(day).await?;
        tracing::info!(%day, tasks = tasks.len(), "current-day cache loaded");

        Ok(Self {
            state: Mutex::new(BoardState {
                day,
                cache: CurrentDayCache::from_tasks(tasks),
                dirty: false,
            }),
            sync,
            clock,
        })
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    pub fn synchronizer(&self) -> &SnapshotSynchronizer {
        &self.sync
    }

    /// The date live mutations are currently flushed under.
    pub async fn open_day(&self) -> NaiveDate {
        self.state.lock().await.day
    }

    pub async fn current(&self) -> Vec<Task> {
        self.state.lock().await.cache.list().to_vec()
    }

    /// True when the last flush failed and the store lags the cache.
    pub async fn is_dirty(&self) -> bool {
        self.state.lock().await.dirty
    }

    pub async fn create_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        self.mutate("create", |cache| Ok(cache.add(data))).await
    }

    pub async fn update_task(&self, id: &str, data: UpdateTaskData) -> Result<Task, CoreError> {
        self.mutate("update", |cache| cache.update_fields(id, data)).await
    }

    pub async fn set_status(&self, id: &str, status: TaskStatus) -> Result<Task, CoreError> {
        self.mutate("set_status", |cache| cache.set_status(id, status)).await
    }

    pub async fn delete_task(&self, id: &str) -> Result<(), CoreError> {
        self.mutate("delete", |cache| cache.remove(id).map(|_| ())).await
    }

    /// Flushes the open day as it stands. Used to retry after a failed flush.
    pub async fn flush(&self) -> Result<(), CoreError> {
        let mut guard = self.state.lock().await;
        self.flush_locked(&mut guard).await
    }

    /// End-of-day transition: flush the open day, then clear the cache and
    /// open the following date.
    ///
    /// On a failed flush nothing is cleared and the board is marked dirty, so
    /// the next mutation or reload retries the flush for the same day.
    ///
    /// Returns the date that was closed, or `None` when the open day is
    /// already ahead of the clock and there was nothing to close.
    pub async fn finalize_day(&self) -> Result<Option<NaiveDate>, CoreError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        let day = state.day;

        if day > self.clock.today() {
            tracing::debug!(%day, "open day already ahead of the clock, finalize skipped");
            return Ok(None);
        }

        if let Err(err) = self.flush_locked(state).await {
            // A clean day still owes its marker.
            state.dirty = true;
            tracing::error!(%day, operation = "finalize", error = %err, "finalize aborted, cache kept");
            return Err(err);
        }

        let closed = state.cache.len();
        state.cache.clear();
        state.day = day.succ_opt().unwrap_or(day);
        tracing::info!(%day, tasks = closed, next_day = %state.day, "day finalized");
        Ok(Some(day))
    }

    /// Start-of-day transition: open the clock's current date and load its
    /// stored snapshot (empty if none).
    ///
    /// A dirty cache is flushed first; if that fails the reload is skipped so
    /// the pending state is not overwritten.
    pub async fn reload_day(&self) -> Result<NaiveDate, CoreError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if state.dirty {
            if let Err(err) = self.flush_locked(state).await {
                tracing::error!(day = %state.day, operation = "reload", error = %err, "pending flush failed, reload skipped");
                return Err(err);
            }
        }

        let today = self.clock.today();
        let tasks = self.sync.load(today).await?;
        tracing::info!(day = %today, tasks = tasks.len(), "current-day cache reloaded");
        state.day = today;
        state.cache.replace(tasks);
        Ok(today)
    }

    /// The live cache contents if `date` is the open day.
    pub(crate) async fn live_snapshot(&self, date: NaiveDate) -> Option<Vec<Task>> {
        let state = self.state.lock().await;
        (state.day == date).then(|| state.cache.list().to_vec())
    }

    async fn mutate<T, F>(&self, operation: &'static str, apply: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut CurrentDayCache) -> Result<T, CoreError>,
    {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let value = apply(&mut state.cache)?;
        state.dirty = true;

        if let Err(err) = self.flush_locked(state).await {
            tracing::warn!(day = %state.day, operation, "mutation applied in memory but not persisted");
            return Err(err);
        }
        Ok(value)
    }

    async fn flush_locked(&self, state: &mut BoardState) -> Result<(), CoreError> {
        self.sync.flush(state.day, state.cache.list()).await?;
        state.dirty = false;
        Ok(())
    }
}
