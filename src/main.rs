use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};

use satwatch::adapter::console::ConsoleScreen;
use satwatch::app::{App, AppState};
use satwatch::config::Config;
use satwatch::port::Screen;

/// Lightning wallet balance watcher and display
#[derive(Parser, Debug)]
#[command(name = "satwatch")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "satwatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Top-level subcommands for the satwatch CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the balance watcher (default)
    Run,

    /// Check configuration and connectivity, then exit
    Check,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            // Fatal and terminal: render the halted panel and leave the
            // rest to the operator.
            ConsoleScreen::default().halted(&err.to_string());
            std::process::exit(1);
        }
    };

    config.init_logging();

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            if !satwatch::app::run_checks(&config).await {
                std::process::exit(1);
            }
        }
        Commands::Run => {
            info!("satwatch starting");

            let state = Arc::new(AppState::new());
            tokio::select! {
                result = App::run(config, state.clone()) => {
                    if let Err(e) = result {
                        error!(error = %e, "Fatal error");
                        std::process::exit(1);
                    }
                }
                _ = signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
            }

            if let Some(snapshot) = state.snapshot() {
                info!(
                    sats = snapshot.sats.value(),
                    stale = state.is_stale(),
                    "Last known balance"
                );
            }
            info!("satwatch stopped");
        }
    }
}
