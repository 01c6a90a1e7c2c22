mod vars;

pub use vars::{is_valid_name, EnvironmentStore};
pub(crate) use vars::parse_assignment;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    EmptyName,
    InvalidName(String),
    MissingSeparator(String),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::EmptyName => write!(f, "variable name cannot be empty"),
            EnvError::InvalidName(name) => write!(f, "not a valid identifier: {}", name),
            EnvError::MissingSeparator(arg) => write!(f, "expected NAME=VALUE, got: {}", arg),
        }
    }
}

impl std::error::Error for EnvError {}
