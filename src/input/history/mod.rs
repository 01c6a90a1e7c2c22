mod file_ops;

use std::{fmt, path::PathBuf};

use self::file_ops::FileOps;

pub const DEFAULT_MAX_ENTRIES: usize = 1000;

#[derive(Debug)]
pub enum HistoryError {
    Io(std::io::Error),
}

impl From<std::io::Error> for HistoryError {
    fn from(err: std::io::Error) -> Self {
        HistoryError::Io(err)
    }
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::Io(e) => write!(f, "history file error: {}", e),
        }
    }
}

impl std::error::Error for HistoryError {}

/// Accepted input lines in the order they were entered, plus a recall cursor.
///
/// The cursor lives in `[0, len]`; `len` means "past the newest entry", which
/// is where an empty, in-progress line sits. Every append puts it back there.
pub struct HistoryStore {
    entries: Vec<String>,
    cursor: usize,
    max_entries: usize,
    file_ops: Option<FileOps>,
}

impl HistoryStore {
    /// In-memory history with no backing file.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            max_entries: max_entries.max(1),
            file_ops: None,
        }
    }

    pub fn load(history_file: PathBuf, max_entries: usize) -> Result<Self, HistoryError> {
        let file_ops = FileOps::new(history_file);
        let mut entries = file_ops.load_entries()?;
        let max_entries = max_entries.max(1);
        if entries.len() > max_entries {
            entries.drain(..entries.len() - max_entries);
        }

        Ok(Self {
            cursor: entries.len(),
            entries,
            max_entries,
            file_ops: Some(file_ops),
        })
    }

    pub fn file_path(&self) -> Option<&std::path::Path> {
        self.file_ops.as_ref().map(FileOps::path)
    }

    /// Appends a non-empty line and persists the history. Blank lines are ignored.
    pub fn push(&mut self, line: &str) -> Result<(), HistoryError> {
        if line.trim().is_empty() {
            return Ok(());
        }

        self.entries.push(line.to_string());
        if self.entries.len() > self.max_entries {
            let excess = self.entries.len() - self.max_entries;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len();

        if let Some(file_ops) = &self.file_ops {
            file_ops.write_entries(&self.entries)?;
        }
        Ok(())
    }

    /// Steps the cursor towards older entries, stopping at the oldest.
    pub fn previous(&mut self) -> Option<&str> {
        if self.entries.is_empty() {
            return None;
        }
        self.cursor = self.cursor.saturating_sub(1);
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Steps towards newer entries. Returns `None` once the cursor is back past
    /// the newest entry.
    pub fn next(&mut self) -> Option<&str> {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
        self.entries.get(self.cursor).map(String::as_str)
    }

    pub fn reset_cursor(&mut self) {
        self.cursor = self.entries.len();
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}
