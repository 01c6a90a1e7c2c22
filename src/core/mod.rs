pub mod commands;
pub mod config;
pub mod env;
pub mod session;

pub use session::Session;
