pub mod error;
pub mod flags;
pub mod report;
pub mod shell;

pub mod core;
pub mod expand;
pub mod highlight;
pub mod input;
pub mod process;

/// Serialises tests that change the process working directory.
#[cfg(test)]
pub(crate) static CWD_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
