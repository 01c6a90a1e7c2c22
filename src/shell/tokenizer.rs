use crate::core::env::{parse_assignment, EnvironmentStore};

/// Fully expanded argument vector; element 0 names the program or builtin.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Command {
    args: Vec<String>,
}

impl Command {
    pub fn new(args: Vec<String>) -> Self {
        Self { args }
    }

    pub fn name(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.args)
    }
}

/// Turns one segment's words into a [`Command`].
///
/// Leading `NAME=VALUE` words are assignments: they go straight into `env`
/// and are dropped from the command. Once a command word has been seen,
/// words containing `=` are ordinary arguments.
pub fn tokenize<'a, I>(words: I, env: &mut EnvironmentStore) -> Command
where
    I: IntoIterator<Item = &'a str>,
{
    let mut args = Vec::new();

    for word in words {
        if args.is_empty() {
            if let Ok((name, value)) = parse_assignment(word) {
                if env.set(name, value).is_ok() {
                    continue;
                }
            }
        }
        args.push(word.to_string());
    }

    Command::new(args)
}
