use std::fmt;

pub mod capture;
pub mod executor;

pub use capture::{CommandCapture, ShellCapture};
pub use executor::{resolve_program, ProcessRunner};

/// Exit status reported for a name that could not be found.
pub const STATUS_NOT_FOUND: i32 = 127;
/// Exit status reported for a file that was found but could not be executed.
pub const STATUS_NOT_EXECUTABLE: i32 = 126;

#[derive(Debug)]
pub enum ProcessError {
    EmptyCommand,
    ForkFailed(std::io::Error),
    WaitFailed(std::io::Error),
    InvalidArgument(String),
    Capture(std::io::Error),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::EmptyCommand => write!(f, "empty command"),
            ProcessError::ForkFailed(e) => write!(f, "fork failed: {}", e),
            ProcessError::WaitFailed(e) => write!(f, "wait failed: {}", e),
            ProcessError::InvalidArgument(arg) => {
                write!(f, "argument contains a NUL byte: {:?}", arg)
            }
            ProcessError::Capture(e) => write!(f, "command substitution failed: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
