use std::fmt::Display;

use crate::flags::Flags;
use crate::highlight::SyntaxHighlighter;

/// Where diagnostics go: stderr, coloured, silenced by `--quiet`, with
/// per-stage tracing under `--debug`.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    quiet: bool,
    debug: bool,
    highlighter: SyntaxHighlighter,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(false, false)
    }
}

impl Reporter {
    pub fn new(quiet: bool, debug: bool) -> Self {
        Self {
            quiet,
            debug,
            highlighter: SyntaxHighlighter::new(),
        }
    }

    pub fn from_flags(flags: &Flags) -> Self {
        Self::new(flags.is_set("quiet"), flags.is_set("debug"))
    }

    /// Reports nothing; used where output would only be noise.
    pub fn silent() -> Self {
        Self {
            quiet: true,
            debug: false,
            highlighter: SyntaxHighlighter::plain(),
        }
    }

    pub fn highlighter(&self) -> SyntaxHighlighter {
        self.highlighter
    }

    pub fn error(&self, message: impl Display) {
        if !self.quiet {
            let text = format!("pyroshell: {}", message);
            eprintln!("{}", self.highlighter.highlight_error(&text));
        }
    }

    pub fn warn(&self, message: impl Display) {
        if !self.quiet {
            eprintln!("pyroshell: warning: {}", message);
        }
    }

    pub fn debug(&self, stage: &str, detail: impl Display) {
        if self.debug {
            eprintln!("[debug] {}: {}", stage, detail);
        }
    }
}
