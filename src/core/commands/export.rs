use super::{Builtin, CommandError};
use crate::core::env::{is_valid_name, parse_assignment, EnvError};
use crate::core::Session;

#[derive(Clone, Default)]
pub struct ExportCommand;

impl ExportCommand {
    pub fn new() -> Self {
        Self
    }

    /// `NAME=VALUE` sets and exports; a bare `NAME` already in the store
    /// exports its current value.
    fn export_one(&self, arg: &str, session: &mut Session) -> Result<(), EnvError> {
        if !arg.contains('=') && is_valid_name(arg) {
            if let Some(value) = session.env.get(arg).map(str::to_string) {
                return session.env.export(arg, &value);
            }
        }

        let (name, value) = parse_assignment(arg)?;
        session.env.export(name, value)
    }
}

impl Builtin for ExportCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "export syntax: export NAME=VALUE ...".into(),
            ));
        }

        // Well-formed arguments are applied even when others are rejected.
        let rejected: Vec<String> = args
            .iter()
            .filter_map(|arg| self.export_one(arg, session).err())
            .map(|e| e.to_string())
            .collect();

        if rejected.is_empty() {
            Ok(())
        } else {
            Err(CommandError::InvalidArguments(format!(
                "export: {}",
                rejected.join("; ")
            )))
        }
    }
}
