use crate::input::history::HistoryError;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    HistoryError(HistoryError),
    FlagError(String),
    CtrlC(String),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::CtrlC(err.to_string())
    }
}

impl From<HistoryError> for ShellError {
    fn from(err: HistoryError) -> Self {
        ShellError::HistoryError(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::HistoryError(e) => write!(f, "History error: {}", e),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::CtrlC(msg) => write!(f, "Ctrl-C error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::history::HistoryStore;

    fn push_into_unwritable(dir: &std::path::Path) -> Result<(), ShellError> {
        // The history file's parent is a regular file, so the rewrite fails.
        let blocker = dir.join("blocker");
        std::fs::write(&blocker, "")?;
        let mut history = HistoryStore::load(blocker.join("history"), 10)?;
        history.push("ls")?;
        Ok(())
    }

    #[test]
    fn test_history_failure_propagates_through_question_mark() {
        let dir = tempfile::tempdir().unwrap();
        let err = push_into_unwritable(dir.path()).unwrap_err();
        assert!(matches!(err, ShellError::HistoryError(_)));
        assert!(err.to_string().starts_with("History error:"));
    }
}
