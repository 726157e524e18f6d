//! Selection file watching for `watch` mode
//!
//! Uses the `notify` crate with debouncing to detect edits to the selection
//! file, so the configuration can be regenerated and redelivered.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::generator::without_date;

type DebounceResult = Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>;

/// Debounced watcher for a single file
///
/// Watches the file's parent directory, since editors commonly save by
/// writing a temporary file and renaming it over the original.
pub struct SelectionWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    rx: Receiver<DebounceResult>,
    path: PathBuf,
}

impl SelectionWatcher {
    /// Start watching `path`
    ///
    /// Events are debounced with a 500ms delay to coalesce editor saves.
    pub fn new(path: PathBuf) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();

        let debounce_duration = Duration::from_millis(500);
        let mut debouncer = new_debouncer(debounce_duration, tx)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching selection file: {}", path.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drain pending events (non-blocking); `true` if the file changed
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        while let Ok(result) = self.rx.try_recv() {
            changed |= self.concerns_file(result);
        }
        changed
    }

    /// Block until the file changes or `timeout` elapses
    ///
    /// Returns `None` once the watcher has shut down.
    pub fn wait_changed(&self, timeout: Duration) -> Option<bool> {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => Some(self.concerns_file(result) | self.poll_changed()),
            Err(RecvTimeoutError::Timeout) => Some(false),
            Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    fn concerns_file(&self, result: DebounceResult) -> bool {
        match result {
            Ok(events) => events.iter().any(|event| {
                !matches!(event.kind, DebouncedEventKind::AnyContinuous)
                    && self.is_watched_path(&event.path)
            }),
            Err(e) => {
                tracing::warn!("Selection watcher error: {:?}", e);
                false
            }
        }
    }

    fn is_watched_path(&self, changed: &Path) -> bool {
        changed == self.path || changed.file_name() == self.path.file_name()
    }
}

/// Remembers the last delivered configuration
///
/// Two generations that differ only in their date line count as equal, so a
/// touch of the selection file does not trigger a redelivery.
#[derive(Debug, Default)]
pub struct OutputTracker {
    last: Option<String>,
}

impl OutputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `generated`; `true` if it differs from the previous one
    pub fn update(&mut self, generated: &str) -> bool {
        let stripped = without_date(generated);
        if self.last.as_deref() == Some(stripped.as_str()) {
            return false;
        }
        self.last = Some(stripped);
        true
    }
}
