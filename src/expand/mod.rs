//! Textual rewriting applied to a whole input line before it is split.
//!
//! Stages run in a fixed order over the full line, each seeing what the
//! previous one produced: tilde, then command substitution, then variables.

mod substitution;
mod tilde;
mod variables;

pub use substitution::substitute_commands;
pub use tilde::expand_tilde;
pub use variables::expand_variables;

use crate::core::env::EnvironmentStore;
use crate::process::{CommandCapture, ProcessError, ShellCapture};
use crate::report::Reporter;

pub struct Preprocessor {
    capture: Box<dyn CommandCapture>,
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new(Box::new(ShellCapture::default()))
    }
}

impl Preprocessor {
    pub fn new(capture: Box<dyn CommandCapture>) -> Self {
        Self { capture }
    }

    pub fn run(&self, line: &str, env: &EnvironmentStore, reporter: &Reporter) -> String {
        let line = expand_tilde(line, env.home());

        let line = if line.contains("$(") {
            substitute_commands(&line, env, self.capture.as_ref(), &mut |cmd: &str, err: &ProcessError| {
                reporter.error(format_args!("$({}): {}", cmd, err))
            })
        } else {
            line.into_owned()
        };

        expand_variables(&line, env).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> EnvironmentStore {
        EnvironmentStore::from_vars([
            ("HOME", "/home/u"),
            ("USER", "u"),
            ("PATH", "/usr/bin:/bin"),
        ])
    }

    fn preprocess(line: &str) -> String {
        Preprocessor::default().run(line, &env(), &Reporter::silent())
    }

    #[test]
    fn test_identity_without_tilde_or_dollar() {
        for line in ["", "ls -la /tmp", "echo a && echo b | wc", "FOO=bar echo test"] {
            assert_eq!(preprocess(line), line);
        }
    }

    #[test]
    fn test_command_substitution_trims_newline() {
        assert_eq!(preprocess("echo $(echo hi) done"), "echo hi done");
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(preprocess("~/$USER"), "/home/u/u");
        assert_eq!(preprocess("echo $(echo '$USER')"), "echo u");
        assert_eq!(preprocess("echo $HOME/$USER $UNKNOWN"), "echo /home/u/u $UNKNOWN");
    }

    #[test]
    fn test_unstartable_substitution_left_in_place() {
        let preprocessor = Preprocessor::new(Box::new(ShellCapture::new("/does/not/exist/sh")));
        let out = preprocessor.run("echo $(date) $USER", &env(), &Reporter::silent());
        assert_eq!(out, "echo $(date) u");
    }
}
