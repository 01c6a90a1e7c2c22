mod raw;
mod readline;
pub mod terminal;

pub use raw::RawEditor;
pub use readline::RustylineEditor;

use crate::core::Session;
use crate::error::ShellError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// The line was abandoned with Ctrl-C; prompt again.
    Interrupted,
    /// No more input; the session ends.
    Eof,
}

/// One line of interactive input per call. Committed non-empty lines are
/// pushed onto the session history before they are returned.
pub trait LineEditor {
    fn read_line(&mut self, prompt: &str, session: &mut Session) -> Result<ReadOutcome, ShellError>;
}

fn commit(line: &str, session: &mut Session) {
    if let Err(e) = session.history.push(line) {
        session.reporter.warn(format_args!("couldn't save history: {}", e));
    }
}
