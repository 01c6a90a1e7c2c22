use crate::core::env::EnvironmentStore;
use crate::input::history::{HistoryStore, DEFAULT_MAX_ENTRIES};
use crate::report::Reporter;

/// Everything one interactive session mutates, passed by reference through
/// expansion, tokenizing, dispatch and the editor.
pub struct Session {
    pub env: EnvironmentStore,
    pub history: HistoryStore,
    pub reporter: Reporter,
    /// Exit status of the last command that ran; 0 before any has.
    pub last_status: i32,
}

impl Session {
    pub fn new(env: EnvironmentStore, history: HistoryStore, reporter: Reporter) -> Self {
        Self {
            env,
            history,
            reporter,
            last_status: 0,
        }
    }

    /// In-memory session over `env` that reports nothing.
    pub fn detached(env: EnvironmentStore) -> Self {
        Self::new(env, HistoryStore::new(DEFAULT_MAX_ENTRIES), Reporter::silent())
    }
}
