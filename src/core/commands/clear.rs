use super::{Builtin, CommandError};
use crate::core::Session;
use std::io::{self, Write};

/// Cursor home, erase screen, erase scrollback.
const CLEAR_SEQUENCE: &[u8] = b"\x1b[H\x1b[2J\x1b[3J";

#[derive(Clone, Default)]
pub struct ClearCommand;

impl ClearCommand {
    pub fn new() -> Self {
        Self
    }

    fn clear(&self, out: &mut impl Write) -> io::Result<()> {
        out.write_all(CLEAR_SEQUENCE)?;
        out.flush()
    }
}

impl Builtin for ClearCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<(), CommandError> {
        self.clear(&mut io::stdout().lock())?;
        Ok(())
    }
}
