use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Cap on each rolling log; oldest entries are evicted first.
pub const MAX_HISTORY_ENTRIES: usize = 40;

/// Rolling record of recently served puzzles, consulted before accepting a
/// new one and appended to on acceptance. Loaded once at startup and never
/// rolled back.
pub trait HistoryStore {
    fn contains_theme(&self, theme_key: &str) -> bool;
    fn contains_words(&self, content_key: &str) -> bool;
    /// Appends an accepted puzzle's normalized theme keys and group content
    /// keys, trimming each log to the most recent [`MAX_HISTORY_ENTRIES`].
    fn record(&mut self, theme_keys: &[String], content_keys: &[String]);
}

/// The two capped logs, most-recent-last.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct HistoryLog {
    themes: VecDeque<String>,
    groups: VecDeque<String>,
}

impl HistoryLog {
    fn append(&mut self, theme_keys: &[String], content_keys: &[String]) {
        for key in theme_keys {
            self.themes.push_back(key.clone());
        }
        for key in content_keys {
            self.groups.push_back(key.clone());
        }
        while self.themes.len() > MAX_HISTORY_ENTRIES {
            self.themes.pop_front();
        }
        while self.groups.len() > MAX_HISTORY_ENTRIES {
            self.groups.pop_front();
        }
    }
}

/// Process-local history with no persistence.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    log: HistoryLog,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recent_themes(&self) -> impl Iterator<Item = &str> {
        self.log.themes.iter().map(String::as_str)
    }

    pub fn recent_groups(&self) -> impl Iterator<Item = &str> {
        self.log.groups.iter().map(String::as_str)
    }
}

impl HistoryStore for MemoryHistory {
    fn contains_theme(&self, theme_key: &str) -> bool {
        self.log.themes.iter().any(|t| t == theme_key)
    }

    fn contains_words(&self, content_key: &str) -> bool {
        self.log.groups.iter().any(|g| g == content_key)
    }

    fn record(&mut self, theme_keys: &[String], content_keys: &[String]) {
        self.log.append(theme_keys, content_keys);
    }
}

/// History backed by a JSON document on disk: read once when opened,
/// rewritten after every accepted puzzle. A missing file starts empty;
/// unreadable state is logged and discarded rather than failing the caller.
#[derive(Debug)]
pub struct FileHistory {
    path: PathBuf,
    log: HistoryLog,
}

impl FileHistory {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let log = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(log) => log,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "discarding unreadable history");
                    HistoryLog::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HistoryLog::default(),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "failed to read history");
                HistoryLog::default()
            }
        };
        Self { path, log }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn recent_themes(&self) -> impl Iterator<Item = &str> {
        self.log.themes.iter().map(String::as_str)
    }

    pub fn recent_groups(&self) -> impl Iterator<Item = &str> {
        self.log.groups.iter().map(String::as_str)
    }

    fn persist(&self) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(err) = fs::create_dir_all(parent) {
                    warn!(path = %self.path.display(), error = %err, "failed to create history directory");
                    return;
                }
            }
        }
        match serde_json::to_vec_pretty(&self.log) {
            Ok(bytes) => {
                if let Err(err) = fs::write(&self.path, bytes) {
                    warn!(path = %self.path.display(), error = %err, "failed to write history");
                }
            }
            Err(err) => warn!(error = %err, "failed to serialize history"),
        }
    }
}

impl HistoryStore for FileHistory {
    fn contains_theme(&self, theme_key: &str) -> bool {
        self.log.themes.iter().any(|t| t == theme_key)
    }

    fn contains_words(&self, content_key: &str) -> bool {
        self.log.groups.iter().any(|g| g == content_key)
    }

    fn record(&mut self, theme_keys: &[String], content_keys: &[String]) {
        self.log.append(theme_keys, content_keys);
        self.persist();
    }
}
