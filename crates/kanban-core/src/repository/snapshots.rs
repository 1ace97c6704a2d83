use crate::error::CoreError;
use crate::models::{DailySnapshot, Task};
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, Transaction};

/// SQLite caps bound parameters per statement; seven binds per row keeps each
/// chunk well under the limit.
const INSERT_CHUNK_ROWS: usize = 100;

#[async_trait]
impl super::SnapshotStore for SqliteRepository {
    async fn replace_snapshot(&self, date: NaiveDate, tasks: &[Task]) -> Result<(), CoreError> {
        let mut tx = self.pool().begin().await?;

        sqlx::query("DELETE FROM tasks WHERE snapshot_date = $1")
            .bind(date)
            .execute(&mut *tx)
            .await?;

        Self::insert_snapshot_rows(&mut tx, date, tasks).await?;

        sqlx::query("INSERT INTO daily_snapshots (date) VALUES ($1) ON CONFLICT (date) DO NOTHING")
            .bind(date)
            .execute(&mut *tx)
            .await?;

        // Dropping the transaction on any error above rolls the whole day back.
        tx.commit().await?;
        Ok(())
    }

    async fn find_snapshot(&self, date: NaiveDate) -> Result<Vec<Task>, CoreError> {
        let tasks = sqlx::query_as(
            r#"SELECT id, title, status, type, priority
            FROM tasks
            WHERE snapshot_date = $1
            ORDER BY position
            "#,
        )
        .bind(date)
        .fetch_all(self.pool())
        .await?;
        Ok(tasks)
    }

    async fn has_marker(&self, date: NaiveDate) -> Result<bool, CoreError> {
        let marker: Option<DailySnapshot> =
            sqlx::query_as("SELECT date FROM daily_snapshots WHERE date = $1")
                .bind(date)
                .fetch_optional(self.pool())
                .await?;
        Ok(marker.is_some())
    }

    async fn find_marked_dates(&self) -> Result<Vec<NaiveDate>, CoreError> {
        let markers: Vec<DailySnapshot> =
            sqlx::query_as("SELECT date FROM daily_snapshots ORDER BY date")
                .fetch_all(self.pool())
                .await?;
        Ok(markers.into_iter().map(|m| m.date).collect())
    }
}

impl SqliteRepository {
    async fn insert_snapshot_rows(
        tx: &mut Transaction<'_, Sqlite>,
        date: NaiveDate,
        tasks: &[Task],
    ) -> Result<(), CoreError> {
        for (chunk_index, chunk) in tasks.chunks(INSERT_CHUNK_ROWS).enumerate() {
            let offset = chunk_index * INSERT_CHUNK_ROWS;
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO tasks (id, title, status, type, priority, snapshot_date, position) ",
            );
            builder.push_values(chunk.iter().enumerate(), |mut row, (index, task)| {
                row.push_bind(&task.id)
                    .push_bind(&task.title)
                    .push_bind(task.status)
                    .push_bind(&task.task_type)
                    .push_bind(task.priority)
                    .push_bind(date)
                    .push_bind((offset + index) as i64);
            });
            builder.build().execute(&mut **tx).await?;
        }
        Ok(())
    }
}
