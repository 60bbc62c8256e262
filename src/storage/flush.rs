use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::document::Document;
use crate::storage::gateway::{DocumentStore, PersistenceError};

/// A scheduled snapshot tagged with the order it was scheduled in.
type Snapshot = (u64, Document);

/// Coalesces bursts of edits into one write.
///
/// Each [`schedule`](Self::schedule) replaces the pending snapshot and
/// restarts the timer. Writes are serialised and a snapshot older than the
/// one already on disk is never written, so a slow background save cannot
/// land after a [`flush`](Self::flush). Must be used from within a tokio
/// runtime.
pub struct DebouncedWriter {
    store: Arc<dyn DocumentStore>,
    delay: Duration,
    generation: u64,
    pending: Arc<Mutex<Option<Snapshot>>>,
    // generation of the newest snapshot written; held for the whole save
    written: Arc<Mutex<u64>>,
    last_error: Arc<Mutex<Option<String>>>,
    timer: Option<JoinHandle<()>>,
}

impl DebouncedWriter {
    pub fn new(store: Arc<dyn DocumentStore>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            generation: 0,
            pending: Arc::new(Mutex::new(None)),
            written: Arc::new(Mutex::new(0)),
            last_error: Arc::new(Mutex::new(None)),
            timer: None,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn schedule(&mut self, document: Document) {
        self.generation += 1;
        if let Ok(mut pending) = self.pending.lock() {
            *pending = Some((self.generation, document));
        }

        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let store = Arc::clone(&self.store);
        let pending = Arc::clone(&self.pending);
        let written = Arc::clone(&self.written);
        let last_error = Arc::clone(&self.last_error);
        let delay = self.delay;

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let snapshot = pending.lock().ok().and_then(|mut slot| slot.take());
            let Some(snapshot) = snapshot else { return };

            let result = tokio::task::spawn_blocking(move || write_in_order(&*store, &written, snapshot)).await;
            let message = match result {
                Ok(Ok(())) => None,
                Ok(Err(e)) => Some(format!("Save failed: {}", e)),
                Err(e) => Some(format!("Save task failed: {}", e)),
            };
            if let Some(message) = message {
                tracing::error!("{}", message);
                if let Ok(mut slot) = last_error.lock() {
                    *slot = Some(message);
                }
            }
        }));
    }

    pub fn has_pending(&self) -> bool {
        self.pending.lock().map(|slot| slot.is_some()).unwrap_or(false)
    }

    /// Cancels the timer and writes any pending snapshot right away. Waits
    /// for a background save that is already running.
    pub fn flush(&mut self) -> Result<(), PersistenceError> {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }

        let snapshot = self.pending.lock().ok().and_then(|mut slot| slot.take());
        match snapshot {
            Some(snapshot) => write_in_order(self.store.as_ref(), &self.written, snapshot),
            None => {
                drop(self.written.lock());
                Ok(())
            }
        }
    }

    /// Switches to another store. Anything pending goes to the old one first.
    pub fn replace_store(&mut self, store: Arc<dyn DocumentStore>) -> Result<(), PersistenceError> {
        let flushed = self.flush();
        self.store = store;
        flushed
    }

    /// The most recent background save failure, if any.
    pub fn take_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn write_in_order(
    store: &dyn DocumentStore,
    written: &Mutex<u64>,
    (generation, document): Snapshot,
) -> Result<(), PersistenceError> {
    let mut written = written.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if generation <= *written {
        tracing::debug!("Skipping snapshot {} superseded by {}", generation, *written);
        return Ok(());
    }
    store.save(&document)?;
    *written = generation;
    Ok(())
}

impl Drop for DebouncedWriter {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::error!("Final save failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ColorToken, Hue, PersonDraft, Shade};
    use std::path::PathBuf;

    #[derive(Default)]
    struct RecordingStore {
        saves: Mutex<Vec<Document>>,
        fail: bool,
        slow_for: Option<&'static str>,
    }

    impl RecordingStore {
        fn count(&self) -> usize {
            self.saves.lock().unwrap().len()
        }

        fn last(&self) -> Option<Document> {
            self.saves.lock().unwrap().last().cloned()
        }
    }

    impl DocumentStore for RecordingStore {
        fn load(&self) -> Result<Document, PersistenceError> {
            Ok(Document::default())
        }

        fn save(&self, document: &Document) -> Result<(), PersistenceError> {
            if self.fail {
                return Err(PersistenceError::NotFound(PathBuf::from("/readonly/data.json")));
            }
            if self.slow_for.is_some_and(|name| document.persons()[0].name == name) {
                std::thread::sleep(Duration::from_millis(300));
            }
            self.saves.lock().unwrap().push(document.clone());
            Ok(())
        }

        fn location(&self) -> PathBuf {
            PathBuf::from("memory")
        }
    }

    fn document_named(name: &str) -> Document {
        let mut doc = Document::default();
        doc.upsert_person(PersonDraft::new(name, Some(ColorToken::new(Hue::Lime, Shade::S200))), None)
            .unwrap();
        doc
    }

    #[tokio::test]
    async fn burst_of_edits_is_written_once() {
        let store = Arc::new(RecordingStore::default());
        let mut writer = DebouncedWriter::new(store.clone(), Duration::from_millis(40));

        writer.schedule(document_named("a"));
        writer.schedule(document_named("b"));
        writer.schedule(document_named("c"));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.count(), 1);
        assert_eq!(store.last().unwrap().persons()[0].name, "c");
        assert!(!writer.has_pending());
    }

    #[tokio::test]
    async fn nothing_is_written_before_the_delay() {
        let store = Arc::new(RecordingStore::default());
        let mut writer = DebouncedWriter::new(store.clone(), Duration::from_secs(30));

        writer.schedule(document_named("a"));
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert_eq!(store.count(), 0);
        assert!(writer.has_pending());
        writer.flush().unwrap();
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn flush_without_pending_is_noop() {
        let store = Arc::new(RecordingStore::default());
        let mut writer = DebouncedWriter::new(store.clone(), Duration::from_millis(10));

        writer.flush().unwrap();

        assert_eq!(store.count(), 0);
    }

    #[tokio::test]
    async fn dropping_writer_flushes_pending_snapshot() {
        let store = Arc::new(RecordingStore::default());
        {
            let mut writer = DebouncedWriter::new(store.clone(), Duration::from_secs(30));
            writer.schedule(document_named("last"));
        }

        assert_eq!(store.count(), 1);
        assert_eq!(store.last().unwrap().persons()[0].name, "last");
    }

    #[tokio::test]
    async fn background_failure_is_reported_once() {
        let store = Arc::new(RecordingStore { fail: true, ..Default::default() });
        let mut writer = DebouncedWriter::new(store.clone(), Duration::from_millis(10));

        writer.schedule(document_named("a"));
        tokio::time::sleep(Duration::from_millis(150)).await;

        let error = writer.take_error().unwrap();
        assert!(error.starts_with("Save failed"));
        assert!(writer.take_error().is_none());
    }

    #[tokio::test]
    async fn flush_is_not_overtaken_by_a_running_background_save() {
        let store = Arc::new(RecordingStore { slow_for: Some("stale"), ..Default::default() });
        {
            let mut writer = DebouncedWriter::new(store.clone(), Duration::from_millis(10));
            writer.schedule(document_named("stale"));
            tokio::time::sleep(Duration::from_millis(50)).await;

            writer.schedule(document_named("latest"));
            writer.flush().unwrap();
        }
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(store.last().unwrap().persons()[0].name, "latest");
    }

    #[test]
    fn superseded_snapshot_is_skipped() {
        let store = RecordingStore::default();
        let written = Mutex::new(2);

        write_in_order(&store, &written, (1, document_named("old"))).unwrap();
        write_in_order(&store, &written, (3, document_named("new"))).unwrap();

        assert_eq!(store.count(), 1);
        assert_eq!(store.last().unwrap().persons()[0].name, "new");
        assert_eq!(*written.lock().unwrap(), 3);
    }
}
