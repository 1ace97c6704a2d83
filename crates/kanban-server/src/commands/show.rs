use anyhow::Result;
use kanban_core::models::SnapshotSource;
use kanban_server::config::Config;

use crate::cli::HistoryCommand;
use crate::views::table::{display_dates, display_tasks};

pub async fn current(config: &Config) -> Result<()> {
    let board = kanban_server::open_board(config).await?;
    println!("Tasks for {}", board.open_day().await);
    display_tasks(&board.current().await);
    Ok(())
}

pub async fn history(config: &Config, command: HistoryCommand) -> Result<()> {
    let board = kanban_server::open_board(config).await?;
    let view = board.resolve_str(&command.date).await?;

    let label = match view.source {
        SnapshotSource::Live => "live",
        SnapshotSource::Archived => "snapshot",
    };
    println!("Tasks for {} ({})", view.date, label);
    display_tasks(&view.tasks);
    Ok(())
}

pub async fn dates(config: &Config) -> Result<()> {
    let board = kanban_server::open_board(config).await?;
    display_dates(&board.processed_dates().await?);
    Ok(())
}
