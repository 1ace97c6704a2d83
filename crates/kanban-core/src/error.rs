use chrono::NaiveDate;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A snapshot read or write failed. Carries enough context to replay the
    /// operation by hand.
    #[error("Failed to {operation} snapshot for {date}")]
    Persistence {
        operation: &'static str,
        date: NaiveDate,
        #[source]
        source: Box<CoreError>,
    },

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

impl CoreError {
    pub fn persistence(operation: &'static str, date: NaiveDate, source: CoreError) -> Self {
        match source {
            // Already wrapped further down the stack.
            err @ CoreError::Persistence { .. } => err,
            other => CoreError::Persistence {
                operation,
                date,
                source: Box::new(other),
            },
        }
    }
}
