use std::process::{Command, Stdio};

use super::ProcessError;
use crate::core::env::EnvironmentStore;

/// Runs the text of a `$( ... )` span and hands back what it printed.
pub trait CommandCapture {
    fn capture(&self, command: &str, env: &EnvironmentStore) -> Result<String, ProcessError>;
}

/// Runs substitutions through `sh -c` with the session environment.
#[derive(Debug, Clone)]
pub struct ShellCapture {
    shell: String,
}

impl Default for ShellCapture {
    fn default() -> Self {
        Self::new("sh")
    }
}

impl ShellCapture {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl CommandCapture for ShellCapture {
    fn capture(&self, command: &str, env: &EnvironmentStore) -> Result<String, ProcessError> {
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .env_clear()
            .envs(env.iter())
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(ProcessError::Capture)?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }
}
