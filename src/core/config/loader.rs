use std::{fs, path::Path};

use super::ConfigError;

pub struct ConfigLoader<'a> {
    path: &'a Path,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(path: &'a Path) -> Self {
        Self { path }
    }

    /// The startup file's command lines; blank lines and `#` comments are
    /// dropped. A missing file has no lines.
    pub fn load_lines(&self) -> Result<Vec<String>, ConfigError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(self.path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(String::from)
            .collect())
    }
}
