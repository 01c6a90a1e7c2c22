use super::{Builtin, CommandError};
use crate::core::Session;
use crate::expand::expand_tilde;
use std::env;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    fn target(&self, args: &[String], session: &Session) -> Result<String, CommandError> {
        let home = session.env.home();
        match args.first() {
            None => home.map(str::to_string).ok_or(CommandError::HomeNotSet),
            Some(dir) if dir.starts_with('~') => {
                if home.is_none() {
                    return Err(CommandError::HomeNotSet);
                }
                Ok(expand_tilde(dir, home).into_owned())
            }
            Some(dir) => Ok(dir.clone()),
        }
    }
}

impl Builtin for CdCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        let target = self.target(args, session)?;
        let previous = env::current_dir().ok();

        env::set_current_dir(&target)
            .map_err(|e| CommandError::ExecutionError(format!("cd: {}: {}", target, e)))?;

        if let Some(previous) = previous {
            session.env.set("OLDPWD", &previous.to_string_lossy())?;
        }
        if let Ok(current) = env::current_dir() {
            session.env.set("PWD", &current.to_string_lossy())?;
        }
        Ok(())
    }
}
