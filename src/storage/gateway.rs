use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::document::{CalendarState, Document};
use crate::storage::config::APP_DIR;

pub const DATA_FILE_NAME: &str = "calendar.json";
pub const HOME_FILE_NAME: &str = ".workday-calendar.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Data file not found: {0}")]
    NotFound(PathBuf),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed data file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reads and writes the whole [`Document`].
#[cfg_attr(test, mockall::automock)]
pub trait DocumentStore: Send + Sync {
    fn load(&self) -> Result<Document, PersistenceError>;
    fn save(&self, document: &Document) -> Result<(), PersistenceError>;
    fn location(&self) -> PathBuf;

    /// Copies the stored data aside so a later save cannot destroy it.
    /// Returns where the copy went, or `None` if the store keeps no copies.
    fn backup(&self) -> Result<Option<PathBuf>, PersistenceError> {
        Ok(None)
    }
}

/// Picks the data file: explicit path, then the platform data directory,
/// then the home directory, then the working directory.
pub fn resolve_data_file(configured: Option<&Path>) -> PathBuf {
    resolve_from(configured, dirs::data_dir(), dirs::home_dir())
}

fn resolve_from(configured: Option<&Path>, data_dir: Option<PathBuf>, home_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = configured {
        return path.to_path_buf();
    }
    if let Some(dir) = data_dir {
        return dir.join(APP_DIR).join(DATA_FILE_NAME);
    }
    if let Some(home) = home_dir {
        return home.join(HOME_FILE_NAME);
    }
    PathBuf::from(DATA_FILE_NAME)
}

/// Parses a data file, accepting the older state-only layout where `DATA`
/// and `menu` sit at the top level.
pub fn parse_document(content: &str) -> Result<Document, PersistenceError> {
    let value: Value = serde_json::from_str(content)?;

    let is_legacy = value.as_object().is_some_and(|obj| {
        !obj.contains_key("state")
            && !obj.contains_key("colors")
            && (obj.contains_key("DATA") || obj.contains_key("menu"))
    });

    if is_legacy {
        tracing::info!("Reading legacy state-only data file");
        let state: CalendarState = serde_json::from_value(value)?;
        return Ok(Document { state, ..Document::default() });
    }

    Ok(serde_json::from_value(value)?)
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `calendar.json` → `calendar.json.bak`
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".bak");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io { path: self.path.clone(), source }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document, PersistenceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PersistenceError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(self.io_error(e)),
        };
        parse_document(&content)
    }

    fn save(&self, document: &Document) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }

        let content = serde_json::to_string_pretty(document)?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(e))?;
        tracing::debug!("Saved {} assignments to {}", document.workdays().len(), self.path.display());
        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.path.clone()
    }

    fn backup(&self) -> Result<Option<PathBuf>, PersistenceError> {
        let target = self.backup_path();
        std::fs::copy(&self.path, &target).map_err(|e| self.io_error(e))?;
        Ok(Some(target))
    }
}

/// Startup read: any failure degrades to an empty document. Returns the
/// document and, when loading failed for a reason other than a missing
/// file, a message to surface. The unreadable file is backed up first,
/// since the next save replaces it.
pub fn hydrate(store: &dyn DocumentStore) -> (Document, Option<String>) {
    match store.load() {
        Ok(mut document) => {
            let dropped = document.dedupe_assignments();
            if dropped > 0 {
                tracing::warn!("Dropped {} duplicate assignments while loading", dropped);
            }
            tracing::info!(
                "Loaded {} persons and {} assignments from {}",
                document.persons().len(),
                document.workdays().len(),
                store.location().display()
            );
            (document, None)
        }
        Err(PersistenceError::NotFound(path)) => {
            tracing::info!("No data file at {}, starting empty", path.display());
            (Document::default(), None)
        }
        Err(e) => {
            tracing::error!("Failed to load data file: {}", e);
            let message = match store.backup() {
                Ok(Some(copy)) => {
                    tracing::warn!("Kept unreadable data file as {}", copy.display());
                    format!("Load failed: {}. Original kept at {}", e, copy.display())
                }
                Ok(None) => format!("Load failed: {}", e),
                Err(backup_err) => {
                    tracing::error!("Could not back up data file: {}", backup_err);
                    format!("Load failed: {}. Backup failed: {}", e, backup_err)
                }
            };
            (Document::default(), Some(message))
        }
    }
}
