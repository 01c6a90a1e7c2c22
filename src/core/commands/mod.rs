use std::collections::BTreeMap;

mod cd;
mod clear;
mod export;
mod history;

pub use cd::CdCommand;
pub use clear::ClearCommand;
pub use export::ExportCommand;
pub use history::HistoryCommand;

use crate::core::env::EnvError;
use crate::core::Session;
use crate::process::{ProcessError, ProcessRunner};

const BUILTINS: [&str; 4] = ["cd", "clear", "export", "history"];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(&name)
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    ExecutionError(String),
    HomeNotSet,
    IoError(std::io::Error),
    ProcessError(ProcessError),
    EnvError(EnvError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
            CommandError::ExecutionError(msg) => write!(f, "{}", msg),
            CommandError::HomeNotSet => write!(f, "cd: HOME not set"),
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "{}", err),
            CommandError::EnvError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

impl From<EnvError> for CommandError {
    fn from(err: EnvError) -> Self {
        CommandError::EnvError(err)
    }
}

/// A command handled inside the interpreter's own process. `args` excludes
/// the command name.
pub trait Builtin {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Clear(ClearCommand),
    Export(ExportCommand),
    History(HistoryCommand),
}

impl Builtin for CommandType {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<(), CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, session),
            CommandType::Clear(cmd) => cmd.execute(args, session),
            CommandType::Export(cmd) => cmd.execute(args, session),
            CommandType::History(cmd) => cmd.execute(args, session),
        }
    }
}

/// Routes a command by its first word: builtins run here, everything else
/// goes to the [`ProcessRunner`].
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_runner: ProcessRunner,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("clear", CommandType::Clear(ClearCommand::new()));
        commands.insert("export", CommandType::Export(ExportCommand::new()));
        commands.insert("history", CommandType::History(HistoryCommand::new()));

        Self {
            commands,
            process_runner: ProcessRunner::new(),
        }
    }

    /// Runs `args` and returns its exit status. Builtins succeed with 0; their
    /// failures come back as errors for the caller to report.
    pub fn execute(&self, args: &[String], session: &mut Session) -> Result<i32, CommandError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(0);
        };

        match self.commands.get(name.as_str()) {
            Some(cmd) => cmd.execute(rest, session).map(|()| 0),
            None => Ok(self.process_runner.run(args, &session.env)?),
        }
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}
