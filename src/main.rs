use std::io;

use tracing_subscriber::EnvFilter;
use workday_calendar::storage::config::APP_DIR;

mod cli;
use cli::{CliMode, USAGE, parse_cli_mode, run_export_mode, session_options};
mod tui;
use tui::run_tui;

#[tokio::main]
async fn main() -> Result<(), io::Error> {
    setup_logging();

    let cli_mode = match parse_cli_mode() {
        Ok(mode) => mode,
        Err(err) => {
            eprintln!("Error: {}", err);
            println!("{}", USAGE);
            return Ok(());
        }
    };

    match cli_mode {
        CliMode::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliMode::Export { file, year, target, sample } => {
            if let Err(e) = run_export_mode(file, year, target, sample) {
                eprintln!("Export failed: {:#}", e);
                tracing::error!("Export failed: {:#}", e);
            }
            Ok(())
        }
        CliMode::Default { file, year, sample } => run_tui(session_options(file, year, sample)).await,
    }
}

fn setup_logging() {
    let log_dir = dirs::config_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| std::path::PathBuf::from("."));

    std::fs::create_dir_all(&log_dir).ok();

    let file_appender = tracing_appender::rolling::daily(log_dir, "workday-calendar.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_target(false)
        .init();

    std::mem::forget(_guard);

    tracing::info!("workday-calendar started");
}
