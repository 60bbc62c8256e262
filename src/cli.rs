use std::{env, path::PathBuf};

use chrono::{Datelike, Local};

use workday_calendar::{
    app::AppState,
    export::{self, ExportTarget},
    storage::{config::Config, gateway::{hydrate, resolve_data_file, JsonFileStore}},
};

use crate::tui::{add_sample_data, SessionOptions};

pub const USAGE: &str =
    "Usage: workday-calendar [--file PATH] [--year YYYY] [--sample] [--export [YYYY|YYYY-MM]]";

#[derive(Debug, PartialEq)]
pub enum CliMode {
    Default { file: Option<PathBuf>, year: Option<i32>, sample: bool },
    Export { file: Option<PathBuf>, year: i32, target: ExportTarget, sample: bool },
    Help,
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliMode, String> {
    let mut sample = false;
    let mut file = None;
    let mut year = None;
    let mut export_spec: Option<Option<String>> = None;
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sample" => {
                sample = true;
            }
            "--file" => {
                let path = args.next().ok_or("--file requires a path")?;
                file = Some(PathBuf::from(path));
            }
            "--year" => {
                let value = args.next().ok_or("--year requires a year")?;
                let parsed = value
                    .parse::<i32>()
                    .map_err(|_| format!("Invalid year '{}'. Use YYYY.", value))?;
                year = Some(parsed);
            }
            "--export" => {
                let value = match args.peek() {
                    Some(next) if !next.starts_with("--") => args.next(),
                    _ => None,
                };
                export_spec = Some(value);
            }
            "--help" | "-h" => return Ok(CliMode::Help),
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
    }

    let Some(spec) = export_spec else {
        return Ok(CliMode::Default { file, year, sample });
    };

    let default_year = year.unwrap_or_else(|| Local::now().year());
    let (year, target) = match spec {
        None => (default_year, ExportTarget::Year),
        Some(spec) => parse_export_spec(&spec)?,
    };
    Ok(CliMode::Export { file, year, target, sample })
}

/// `YYYY` exports a year, `YYYY-MM` a single month.
fn parse_export_spec(spec: &str) -> Result<(i32, ExportTarget), String> {
    let invalid = || format!("Invalid export '{}'. Use YYYY or YYYY-MM.", spec);

    match spec.split_once('-') {
        None => spec.parse::<i32>().map(|y| (y, ExportTarget::Year)).map_err(|_| invalid()),
        Some((year, month)) => {
            let year = year.parse::<i32>().map_err(|_| invalid())?;
            let month = month.parse::<u32>().map_err(|_| invalid())?;
            if !(1..=12).contains(&month) {
                return Err(invalid());
            }
            Ok((year, ExportTarget::Month(month)))
        }
    }
}

pub fn session_options(file: Option<PathBuf>, year: Option<i32>, sample: bool) -> SessionOptions {
    SessionOptions { file, year, sample }
}

/// Writes a snapshot without starting the terminal UI.
pub fn run_export_mode(file: Option<PathBuf>, year: i32, target: ExportTarget, sample: bool) -> anyhow::Result<()> {
    let config = Config::load_or_create()?;
    let data_path = resolve_data_file(file.as_deref().or(config.storage.data_file.as_deref()));
    let store = JsonFileStore::new(&data_path);
    let (document, load_error) = hydrate(&store);
    if let Some(message) = load_error {
        eprintln!("{}", message);
    }

    let mut app = AppState::new(document);
    if sample {
        add_sample_data(&mut app);
    }

    let path = export::write_snapshot(&app.document, year, target, &config.export_dir())?;
    println!("Exported {}", path.display());
    Ok(())
}
