//! # Kanban Core Library
//!
//! The day-snapshot engine behind the kanban board: a live current-day task
//! list, transactional per-date snapshots in SQLite, a scheduled daily
//! rollover, and resolution of any date to either live or archived state.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Tasks, statuses, priorities and snapshot markers
//! - [`repository`]: The [`repository::SnapshotStore`] trait and its SQLite implementation
//! - [`cache`]: The ordered in-memory list for the open day
//! - [`sync`]: Whole-day transactional flush with a timeout
//! - [`board`]: The shared board state; every mutation flushes before returning
//! - [`history`]: Live-or-archived resolution of a requested date
//! - [`rollover`]: Finalize/reload triggers and their driver loop
//! - [`clock`]: UTC time source, fixed clock for tests
//! - [`error`]: Error types with persistence context
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kanban_core::{
//!     board::Board, clock::SystemClock, db,
//!     models::{NewTaskData, TaskPriority, TaskStatus},
//!     repository::SqliteRepository, sync::SnapshotSynchronizer,
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("kanban.db").await?;
//!     let sync = SnapshotSynchronizer::new(Arc::new(SqliteRepository::new(pool)));
//!     let board = Board::open(sync, Arc::new(SystemClock)).await?;
//!
//!     let task = board
//!         .create_task(NewTaskData {
//!             title: "Trouble SLA".to_string(),
//!             status: TaskStatus::Backlog,
//!             task_type: "Bug".to_string(),
//!             priority: TaskPriority::High,
//!         })
//!         .await?;
//!     println!("Created task: {}", task.title);
//!
//!     Ok(())
//! }
//! ```

pub mod board;
pub mod cache;
pub mod clock;
pub mod db;
pub mod error;
pub mod history;
pub mod models;
pub mod repository;
pub mod rollover;
pub mod sync;
