use clap::Parser;
use kanban_core::error::CoreError;
use kanban_server::config::Config;
use owo_colors::{OwoColorize, Style};
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod views;

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();
    init_tracing(&cli.command);

    let mut config = match Config::new() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} Invalid configuration: {}", "Warning:".yellow().bold(), e);
            Config::default()
        }
    };
    if let Some(database) = cli.database {
        config.database_path = database;
    }

    let result = match cli.command {
        cli::Commands::Serve(command) => commands::serve::serve(config, command).await,
        cli::Commands::Current => commands::show::current(&config).await,
        cli::Commands::History(command) => commands::show::history(&config, command).await,
        cli::Commands::Dates => commands::show::dates(&config).await,
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so table output on stdout stays clean. `RUST_LOG`
/// overrides the per-command default.
fn init_tracing(command: &cli::Commands) {
    let default_level = match command {
        cli::Commands::Serve(_) => "info",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Persistence { operation, date, source } => {
                eprintln!(
                    "{} Failed to {} snapshot for {}: {}",
                    "Error:".style(error_style),
                    operation,
                    date.yellow(),
                    source
                );
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {:#}", "Error:".style(error_style), err);
    }
}
