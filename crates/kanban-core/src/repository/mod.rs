use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::Task;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod snapshots;

/// Durable, date-keyed storage for daily task snapshots and their markers.
///
/// Rows for one date are only ever written as a whole through
/// [`SnapshotStore::replace_snapshot`]; there is no per-task write path.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Atomically replaces every record dated `date` with `tasks` (in order)
    /// and upserts the marker for `date`.
    async fn replace_snapshot(&self, date: NaiveDate, tasks: &[Task]) -> Result<(), CoreError>;

    /// Records stored for `date`, in cache order. Empty when none exist.
    async fn find_snapshot(&self, date: NaiveDate) -> Result<Vec<Task>, CoreError>;

    /// Whether `date` has ever been processed by a flush.
    async fn has_marker(&self, date: NaiveDate) -> Result<bool, CoreError>;

    /// All processed dates, oldest first.
    async fn find_marked_dates(&self) -> Result<Vec<NaiveDate>, CoreError>;
}

/// SQLite implementation of [`SnapshotStore`].
#[derive(Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}
