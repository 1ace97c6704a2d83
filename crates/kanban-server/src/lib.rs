//! HTTP surface and configuration for the kanban day board.

pub mod api;
pub mod config;

use config::Config;
use kanban_core::board::Board;
use kanban_core::clock::{Clock, SystemClock};
use kanban_core::db;
use kanban_core::error::CoreError;
use kanban_core::repository::SqliteRepository;
use kanban_core::sync::SnapshotSynchronizer;
use std::sync::Arc;

/// Connects to the configured database and opens the board for today.
pub async fn open_board(config: &Config) -> Result<Board, CoreError> {
    open_board_with_clock(config, Arc::new(SystemClock)).await
}

pub async fn open_board_with_clock(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<Board, CoreError> {
    let pool = db::establish_connection(&config.database_path).await?;
    let sync = SnapshotSynchronizer::new(Arc::new(SqliteRepository::new(pool)))
        .with_timeout(config.flush_timeout());
    Board::open(sync, clock).await
}
