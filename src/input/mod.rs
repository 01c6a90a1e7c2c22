pub mod completer;
pub mod editor;
pub mod history;

pub use completer::{CompletionEngine, CompletionSet, ShellHelper};
pub use editor::{LineEditor, RawEditor, ReadOutcome, RustylineEditor};
pub use history::{HistoryError, HistoryStore};
