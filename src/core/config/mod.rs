use std::{fmt, path::PathBuf};

mod loader;
mod paths;

pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::core::env::EnvironmentStore;
use crate::flags::Flags;
use crate::input::history::DEFAULT_MAX_ENTRIES;

/// Startup settings: where the rc and history files live and how much
/// history to keep.
#[derive(Debug, Clone)]
pub struct Config {
    pub paths: ConfigPaths,
    pub history_limit: usize,
}

impl Config {
    pub fn new(env: &EnvironmentStore, flags: &Flags) -> Result<Self, ConfigError> {
        let rc_override = flags.get_value("config").map(PathBuf::from);
        Ok(Config {
            paths: ConfigPaths::new(env, rc_override)?,
            history_limit: DEFAULT_MAX_ENTRIES,
        })
    }

    pub fn startup_lines(&self) -> Result<Vec<String>, ConfigError> {
        ConfigLoader::new(&self.paths.rc_path).load_lines()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    IoError(std::io::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_flags() {
        let env = EnvironmentStore::from_vars([("HOME", "/home/testuser")]);
        let mut flags = Flags::new();
        flags
            .parse(&["--config".to_string(), "/tmp/custom.rc".to_string()])
            .unwrap();

        let config = Config::new(&env, &flags).unwrap();
        assert_eq!(config.paths.rc_path, PathBuf::from("/tmp/custom.rc"));
        assert_eq!(config.history_limit, DEFAULT_MAX_ENTRIES);
    }
}
