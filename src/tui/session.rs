use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as TermEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    Terminal,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use workday_calendar::{
    app::{AppState, Request},
    export::{self, ExportTarget},
    input,
    storage::{
        config::Config,
        gateway::{DocumentStore, JsonFileStore, PersistenceError, hydrate, resolve_data_file},
        DebouncedWriter,
    },
    ui::theme::Theme,
};
use crate::tui::{
    presentation::ui,
    sample_data::add_sample_data,
};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

type ExportResult = Result<PathBuf, String>;

#[derive(Debug, Default)]
pub struct SessionOptions {
    pub file: Option<PathBuf>,
    pub year: Option<i32>,
    pub sample: bool,
}

pub async fn run_tui(options: SessionOptions) -> Result<(), io::Error> {
    let mut config = Config::load_or_create()
        .map_err(|e| io::Error::other(e.to_string()))?;

    let data_path = resolve_data_file(options.file.as_deref().or(config.storage.data_file.as_deref()));
    let store: Arc<dyn DocumentStore> = Arc::new(JsonFileStore::new(&data_path));
    let (document, load_error) = hydrate(store.as_ref());

    let theme = Theme::get_by_name(&config.ui.theme);
    let mut app = AppState::new(document).with_theme(theme);
    app.show_week_numbers = config.ui.show_week_numbers;
    app.data_file = data_path;
    if let Some(year) = options.year {
        app.set_year(year);
    }
    if let Some(message) = load_error {
        app.error(message);
    }
    if options.sample {
        add_sample_data(&mut app);
    }

    let mut writer = DebouncedWriter::new(store, config.storage.debounce());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &mut writer, &mut config).await;

    if let Err(e) = writer.flush() {
        tracing::error!("Final save failed: {}", e);
        eprintln!("Final save failed: {}", e);
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    writer: &mut DebouncedWriter,
    config: &mut Config,
) -> io::Result<()> {
    let (export_tx, mut export_rx) = mpsc::unbounded_channel::<ExportResult>();
    let mut saved_revision = app.revision();

    loop {
        if let Some(message) = writer.take_error() {
            app.error(message);
        }
        drain_exports(&mut export_rx, app);

        terminal.draw(|f| ui(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        if let TermEvent::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.status = None;
            input::dispatch(key.code, app);
        }

        if app.revision() != saved_revision {
            writer.schedule(app.document.clone());
            saved_revision = app.revision();
        }

        for request in app.take_requests() {
            match request {
                Request::Quit => return Ok(()),
                Request::SaveNow => save_now(app, writer),
                Request::Export(target) => spawn_export(app, config, target, export_tx.clone()),
                Request::OpenDataFile(path) => open_data_file(app, writer, config, &path),
                Request::SetTheme(name) => set_theme(app, config, &name),
            }
        }
    }
}

fn save_now(app: &mut AppState, writer: &mut DebouncedWriter) {
    writer.schedule(app.document.clone());
    match writer.flush() {
        Ok(()) => app.info(format!("Saved to {}", app.data_file.display())),
        Err(e) => {
            tracing::error!("Save failed: {}", e);
            app.error(format!("Save failed: {}", e));
        }
    }
}

fn spawn_export(app: &mut AppState, config: &Config, target: ExportTarget, tx: UnboundedSender<ExportResult>) {
    let document = app.document.clone();
    let year = app.year;
    let dir = config.export_dir();
    app.info(format!("Exporting {}...", export::file_name(target, year)));

    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || export::write_snapshot(&document, year, target, &dir))
            .await
            .map_err(|e| e.to_string())
            .and_then(|written| written.map_err(|e| e.to_string()));
        if let Err(e) = &result {
            tracing::error!("Export failed: {}", e);
        }
        let _ = tx.send(result);
    });
}

fn drain_exports(rx: &mut UnboundedReceiver<ExportResult>, app: &mut AppState) {
    while let Ok(result) = rx.try_recv() {
        match result {
            Ok(path) => app.info(format!("Exported {}", path.display())),
            Err(e) => app.error(format!("Export failed: {}", e)),
        }
    }
}

/// Points persistence at `path`. An existing file is loaded; otherwise the
/// current document is written there. A file that cannot be read leaves the
/// session on its previous store.
fn open_data_file(app: &mut AppState, writer: &mut DebouncedWriter, config: &mut Config, path: &Path) {
    match switch_store(app, writer, path) {
        Ok(message) => {
            app.data_file = path.to_path_buf();
            config.storage.data_file = Some(path.to_path_buf());
            if let Err(e) = config.save() {
                tracing::warn!("Could not remember data file in config: {}", e);
            }
            app.info(message);
        }
        Err(e) => {
            tracing::error!("Cannot use {}: {}", path.display(), e);
            app.error(format!("Cannot use {}: {}", path.display(), e));
        }
    }
}

fn switch_store(app: &mut AppState, writer: &mut DebouncedWriter, path: &Path) -> Result<String, PersistenceError> {
    let store = JsonFileStore::new(path);

    let loaded = if path.exists() {
        let mut document = store.load()?;
        document.dedupe_assignments();
        Some(document)
    } else {
        store.save(&app.document)?;
        None
    };

    if let Err(e) = writer.replace_store(Arc::new(store)) {
        tracing::error!("Pending save to previous file failed: {}", e);
    }

    match loaded {
        Some(document) => {
            app.replace_document(document);
            Ok(format!("Loaded {}", path.display()))
        }
        None => Ok(format!("Saved to {}", path.display())),
    }
}

fn set_theme(app: &mut AppState, config: &mut Config, name: &str) {
    if !Theme::available_themes().iter().any(|t| t.eq_ignore_ascii_case(name)) {
        app.error(format!(
            "Unknown theme '{}'. Available: {}",
            name,
            Theme::available_themes().join(", ")
        ));
        return;
    }

    app.theme = Theme::get_by_name(name);
    config.ui.theme = app.theme.name.clone();
    if let Err(e) = config.save() {
        tracing::warn!("Could not save theme to config: {}", e);
    }
    app.info(format!("Theme: {}", app.theme.name));
}

#[cfg(test)]
mod tests {
    use super::*;
    use workday_calendar::document::{ColorToken, Document, Hue, PersonDraft, Shade};

    fn document_with(name: &str) -> Document {
        let mut document = Document::default();
        document
            .upsert_person(PersonDraft::new(name, Some(ColorToken::new(Hue::Amber, Shade::S300))), None)
            .unwrap();
        document
    }

    #[tokio::test]
    async fn switching_to_existing_file_loads_it() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("old.json");
        let new_path = dir.path().join("new.json");
        JsonFileStore::new(&new_path).save(&document_with("Anna")).unwrap();

        let mut app = AppState::new(document_with("Ben"));
        let mut writer = DebouncedWriter::new(Arc::new(JsonFileStore::new(&old_path)), Duration::from_secs(30));

        switch_store(&mut app, &mut writer, &new_path).unwrap();

        assert_eq!(app.document.persons()[0].name, "Anna");
        assert_eq!(writer.store().location(), new_path);
    }

    #[tokio::test]
    async fn switching_to_missing_file_writes_current_document() {
        let dir = tempfile::tempdir().unwrap();
        let new_path = dir.path().join("nested").join("fresh.json");

        let mut app = AppState::new(document_with("Ben"));
        let mut writer = DebouncedWriter::new(
            Arc::new(JsonFileStore::new(dir.path().join("old.json"))),
            Duration::from_secs(30),
        );

        switch_store(&mut app, &mut writer, &new_path).unwrap();

        let saved = JsonFileStore::new(&new_path).load().unwrap();
        assert_eq!(saved.persons()[0].name, "Ben");
    }

    #[tokio::test]
    async fn malformed_target_keeps_previous_store() {
        let dir = tempfile::tempdir().unwrap();
        let old_path = dir.path().join("old.json");
        let bad_path = dir.path().join("bad.json");
        std::fs::write(&bad_path, "{ not json").unwrap();

        let mut app = AppState::new(document_with("Ben"));
        let mut writer = DebouncedWriter::new(Arc::new(JsonFileStore::new(&old_path)), Duration::from_secs(30));

        let result = switch_store(&mut app, &mut writer, &bad_path);

        assert!(matches!(result, Err(PersistenceError::Malformed(_))));
        assert_eq!(writer.store().location(), old_path);
        assert_eq!(app.document.persons()[0].name, "Ben");
    }

    #[tokio::test]
    async fn export_results_reach_status_bar() {
        let (tx, mut rx) = mpsc::unbounded_channel::<ExportResult>();
        let mut app = AppState::new(Document::default());

        tx.send(Err("disk full".to_string())).unwrap();
        drain_exports(&mut rx, &mut app);

        assert_eq!(app.status.unwrap().text, "Export failed: disk full");
    }
}
