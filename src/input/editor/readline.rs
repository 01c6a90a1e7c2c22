use rustyline::{
    config::{CompletionType, Config},
    error::ReadlineError,
    history::FileHistory,
    Editor,
};

use super::{commit, LineEditor, ReadOutcome};
use crate::core::Session;
use crate::error::ShellError;
use crate::input::completer::ShellHelper;

/// Line editing through rustyline: its own history recall and key handling,
/// our completion and highlighting. Repeated Tab cycles through candidates.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, FileHistory>,
}

impl RustylineEditor {
    pub fn new(session: &Session) -> Result<Self, ShellError> {
        let config = Config::builder()
            .completion_type(CompletionType::Circular)
            .auto_add_history(false)
            .build();

        let mut editor = Editor::<ShellHelper, FileHistory>::with_config(config)?;
        editor.set_helper(Some(ShellHelper::new(session.reporter.highlighter())));

        for entry in session.history.entries() {
            editor.add_history_entry(entry.as_str())?;
        }

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str, session: &mut Session) -> Result<ReadOutcome, ShellError> {
        if let Some(helper) = self.editor.helper_mut() {
            helper.sync_env(&session.env);
        }

        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    if let Err(e) = self.editor.add_history_entry(line.as_str()) {
                        session.reporter.warn(format_args!("couldn't add to history: {}", e));
                    }
                }
                commit(&line, session);
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(e.into()),
        }
    }
}
