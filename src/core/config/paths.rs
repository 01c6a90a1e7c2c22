use super::ConfigError;
use crate::core::env::EnvironmentStore;
use std::path::PathBuf;

const RC_FILE: &str = ".pyroshellrc";
const HISTORY_FILE: &str = ".pyroshell_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    /// Files under the home directory, `HOME` first, then the platform's
    /// idea of it. `rc_override` replaces the startup file.
    pub fn new(env: &EnvironmentStore, rc_override: Option<PathBuf>) -> Result<Self, ConfigError> {
        let home_path = env
            .home()
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            rc_path: rc_override.unwrap_or_else(|| home_path.join(RC_FILE)),
            history_path: home_path.join(HISTORY_FILE),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_paths() {
        let env = EnvironmentStore::from_vars([("HOME", "/home/testuser")]);
        let paths = ConfigPaths::new(&env, None).unwrap();

        assert_eq!(paths.rc_path, PathBuf::from("/home/testuser/.pyroshellrc"));
        assert_eq!(
            paths.history_path,
            PathBuf::from("/home/testuser/.pyroshell_history")
        );
    }

    #[test]
    fn test_rc_override() {
        let env = EnvironmentStore::from_vars([("HOME", "/home/testuser")]);
        let paths = ConfigPaths::new(&env, Some(PathBuf::from("/etc/pyro.rc"))).unwrap();
        assert_eq!(paths.rc_path, PathBuf::from("/etc/pyro.rc"));
        assert_eq!(
            paths.history_path,
            PathBuf::from("/home/testuser/.pyroshell_history")
        );
    }
}
