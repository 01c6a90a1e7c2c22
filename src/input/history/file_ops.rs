use std::{
    fs::{self, File},
    io::{BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use super::HistoryError;

pub struct FileOps {
    file_path: PathBuf,
}

impl FileOps {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// A missing file is an empty history.
    pub fn load_entries(&self) -> Result<Vec<String>, HistoryError> {
        let mut entries = Vec::new();

        if self.file_path.exists() {
            let file = File::open(&self.file_path)?;
            let reader = BufReader::new(file);

            for line in reader.lines() {
                let line = line?;
                if !line.trim().is_empty() {
                    entries.push(line);
                }
            }
        }

        Ok(entries)
    }

    /// Rewrites the whole file with `entries`, one per line.
    pub fn write_entries(&self, entries: &[String]) -> Result<(), HistoryError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = File::create(&self.file_path)?;
        for entry in entries {
            writeln!(file, "{}", entry)?;
        }
        file.flush()?;
        Ok(())
    }
}
