mod command;
mod path;
mod shell;

pub use command::is_executable;
pub use shell::ShellHelper;

use crate::core::env::EnvironmentStore;

/// Every completion for one prefix, computed once and sorted.
///
/// Built fresh per request; nothing here survives into a request for a
/// different prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionSet {
    prefix: String,
    candidates: Vec<String>,
}

impl CompletionSet {
    /// Bare names also search `search_path` for executables; every prefix
    /// searches its parent directory on disk. Unreadable directories are
    /// skipped silently.
    pub fn compute(prefix: &str, search_path: Option<&str>, home: Option<&str>) -> Self {
        let mut candidates = Vec::new();

        if !prefix.contains('/') {
            command::complete_command(prefix, search_path, &mut candidates);
        }
        path::complete_path(prefix, home, &mut candidates);

        candidates.sort();
        candidates.dedup();

        Self {
            prefix: prefix.to_string(),
            candidates,
        }
    }

    pub fn for_env(prefix: &str, env: &EnvironmentStore) -> Self {
        Self::compute(prefix, env.search_path(), env.home())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The `index`-th candidate, or `None` once the list is exhausted.
    pub fn nth(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(String::as_str)
    }
}

impl IntoIterator for CompletionSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

/// "Give me candidate N for this prefix" front end over [`CompletionSet`].
///
/// Index 0, or any prefix other than the one last asked about, recomputes the
/// set from scratch.
#[derive(Debug, Default)]
pub struct CompletionEngine {
    current: Option<CompletionSet>,
}

impl CompletionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn candidate(&mut self, prefix: &str, index: usize, env: &EnvironmentStore) -> Option<String> {
        let stale = match &self.current {
            Some(set) => index == 0 || set.prefix() != prefix,
            None => true,
        };
        if stale {
            self.current = Some(CompletionSet::for_env(prefix, env));
        }

        self.current
            .as_ref()
            .and_then(|set| set.nth(index))
            .map(str::to_string)
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

/// Byte offset where the whitespace-delimited word ending at `line.len()` starts.
pub fn word_start(line: &str) -> usize {
    line.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(idx, c)| idx + c.len_utf8())
}
