use super::{Builtin, CommandError};
use crate::core::Session;
use crate::input::history::HistoryStore;
use std::io::{self, Write};

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }

    /// Numbered listing, optionally only the last `count` entries.
    fn write_entries(
        &self,
        history: &HistoryStore,
        count: Option<usize>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        let entries = history.entries();
        let skip = count.map_or(0, |n| entries.len().saturating_sub(n));
        for (idx, entry) in entries.iter().enumerate().skip(skip) {
            writeln!(out, "{:>5}  {}", idx + 1, entry)?;
        }
        out.flush()
    }
}

impl Builtin for HistoryCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let count = match args.first() {
            None => None,
            Some(n) => Some(n.parse::<usize>().map_err(|_| {
                CommandError::InvalidArguments(format!("history: numeric argument required: {}", n))
            })?),
        };

        self.write_entries(&session.history, count, &mut io::stdout().lock())?;
        Ok(())
    }
}
