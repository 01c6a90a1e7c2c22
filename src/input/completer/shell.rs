use std::borrow::Cow;

use super::{word_start, CompletionSet};
use crate::core::env::EnvironmentStore;
use crate::highlight::SyntaxHighlighter;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// rustyline helper: completion from [`CompletionSet`] plus highlighting.
///
/// rustyline owns its helper, so the parts of the environment completion
/// needs are copied in before each prompt with [`ShellHelper::sync_env`].
#[derive(Clone)]
pub struct ShellHelper {
    search_path: Option<String>,
    home: Option<String>,
    highlighter: SyntaxHighlighter,
}

impl Default for ShellHelper {
    fn default() -> Self {
        Self::new(SyntaxHighlighter::new())
    }
}

impl ShellHelper {
    pub fn new(highlighter: SyntaxHighlighter) -> Self {
        ShellHelper {
            search_path: None,
            home: None,
            highlighter,
        }
    }

    pub fn sync_env(&mut self, env: &EnvironmentStore) {
        self.search_path = env.search_path().map(str::to_string);
        self.home = env.home().map(str::to_string);
    }

    fn candidates(&self, prefix: &str) -> Vec<Pair> {
        CompletionSet::compute(prefix, self.search_path.as_deref(), self.home.as_deref())
            .into_iter()
            .map(|replacement| Pair {
                display: replacement.trim_end().to_string(),
                replacement,
            })
            .collect()
    }
}

impl Helper for ShellHelper {}

impl Highlighter for ShellHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Validator for ShellHelper {}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_up_to_cursor = &line[..pos];
        let start = word_start(line_up_to_cursor);
        Ok((start, self.candidates(&line_up_to_cursor[start..])))
    }
}
