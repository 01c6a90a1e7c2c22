use crate::core::commands::CommandExecutor;
use crate::core::Session;
use crate::expand::Preprocessor;

use super::pipeline::Pipeline;
use super::tokenizer::tokenize;

/// Preprocess, split, tokenize and dispatch one line of input.
pub struct LineExecutor {
    preprocessor: Preprocessor,
    dispatcher: CommandExecutor,
}

impl Default for LineExecutor {
    fn default() -> Self {
        Self::new(Preprocessor::default(), CommandExecutor::new())
    }
}

impl LineExecutor {
    pub fn new(preprocessor: Preprocessor, dispatcher: CommandExecutor) -> Self {
        Self {
            preprocessor,
            dispatcher,
        }
    }

    /// Runs every stage of `line` whose condition holds and returns the status
    /// of the last one that ran. Errors are reported, never propagated.
    pub fn execute_line(&self, line: &str, session: &mut Session) -> i32 {
        if line.trim().is_empty() {
            return session.last_status;
        }

        let reporter = session.reporter;
        reporter.debug("input", line);

        let expanded = self.preprocessor.run(line, &session.env, &reporter);
        reporter.debug("expanded", &expanded);

        let pipeline = Pipeline::parse(&expanded);
        if let Some(dropped) = pipeline.truncated() {
            reporter.debug("pipe", format_args!("pipelines are not supported, ignoring `{}`", dropped));
        }

        let mut status = 0;
        let mut ran_any = false;
        for stage in pipeline.stages() {
            if !stage.condition.should_run(status) {
                reporter.debug("skip", stage.words.join(" "));
                continue;
            }

            let command = tokenize(stage.words.iter().copied(), &mut session.env);
            ran_any = true;
            if command.is_empty() {
                status = 0;
                continue;
            }
            reporter.debug("command", &command);

            status = match self.dispatcher.execute(command.args(), session) {
                Ok(code) => code,
                Err(e) => {
                    reporter.error(e);
                    1
                }
            };
            reporter.debug("status", status);
        }

        if ran_any {
            session.last_status = status;
        }
        session.last_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::EnvironmentStore;

    fn session() -> Session {
        Session::detached(EnvironmentStore::from_vars([
            ("PATH", "/usr/bin:/bin"),
            ("HOME", "/home/u"),
        ]))
    }

    #[test]
    fn test_assignment_then_expansion_on_next_line() {
        let executor = LineExecutor::default();
        let mut session = session();

        assert_eq!(executor.execute_line("GREETING=hi", &mut session), 0);
        assert_eq!(session.env.get("GREETING"), Some("hi"));
        assert_eq!(
            executor.execute_line("test $(echo 0) = 0", &mut session),
            0
        );
        assert_eq!(
            executor.execute_line("test $GREETING = hi", &mut session),
            0
        );
    }

    #[test]
    fn test_short_circuit_uses_real_status() {
        let executor = LineExecutor::default();
        let mut session = session();

        executor.execute_line("false && MARK_AND=ran", &mut session);
        assert!(!session.env.contains("MARK_AND"));
        assert_eq!(session.last_status, 1);

        executor.execute_line("true && MARK_AND2=ran", &mut session);
        assert_eq!(session.env.get("MARK_AND2"), Some("ran"));

        executor.execute_line("true || MARK_OR=ran", &mut session);
        assert!(!session.env.contains("MARK_OR"));

        executor.execute_line("false || MARK_OR2=ran", &mut session);
        assert_eq!(session.env.get("MARK_OR2"), Some("ran"));

        executor.execute_line("false && true || MARK_CHAIN=ran", &mut session);
        assert_eq!(session.env.get("MARK_CHAIN"), Some("ran"));
    }

    #[test]
    fn test_pipe_drops_remainder() {
        let executor = LineExecutor::default();
        let mut session = session();
        executor.execute_line("true | MARK_PIPE=ran", &mut session);
        assert!(!session.env.contains("MARK_PIPE"));
        assert_eq!(session.last_status, 0);
    }

    #[test]
    fn test_builtin_failure_is_status_one() {
        let executor = LineExecutor::default();
        let mut session = session();
        assert_eq!(executor.execute_line("export =bad", &mut session), 1);
        assert_eq!(
            executor.execute_line("pyro-no-such-program", &mut session),
            127
        );
    }

    #[test]
    fn test_blank_line_keeps_status() {
        let executor = LineExecutor::default();
        let mut session = session();
        executor.execute_line("false", &mut session);
        assert_eq!(executor.execute_line("   ", &mut session), 1);
    }
}
