use clap::{Parser, Subcommand};

/// A personal kanban board with daily snapshots
#[derive(Parser, Debug)]
#[command(name = "kanban", author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the snapshot database (overrides configuration)
    #[clap(long, global = true)]
    pub database: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the REST server and the daily rollover scheduler
    Serve(ServeCommand),
    /// Show today's tasks as stored
    Current,
    /// Show the tasks recorded for a date
    History(HistoryCommand),
    /// List every date that has a snapshot
    Dates,
}

#[derive(Parser, Debug, Clone)]
pub struct ServeCommand {
    /// Address to bind
    #[clap(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Do not run the finalize/reload triggers
    #[clap(long)]
    pub no_scheduler: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct HistoryCommand {
    /// Date to show, as YYYY-MM-DD
    pub date: String,
}
