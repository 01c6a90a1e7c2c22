mod executor;
mod pipeline;
mod tokenizer;

pub use executor::LineExecutor;
pub use pipeline::{Pipeline, PipelineOperator, PipelineStage, RunCondition};
pub use tokenizer::{tokenize, Command};

use crate::{
    core::{config::Config, env::EnvironmentStore, Session},
    error::ShellError,
    flags::Flags,
    input::{HistoryStore, LineEditor, RawEditor, ReadOutcome, RustylineEditor},
    report::Reporter,
};

pub const PROMPT: &str = "PyroShell$ ";

pub struct Shell {
    editor: Box<dyn LineEditor>,
    session: Session,
    executor: LineExecutor,
    config: Option<Config>,
}

impl Shell {
    pub fn new(flags: Flags) -> Result<Self, ShellError> {
        let env = EnvironmentStore::from_os();
        let reporter = Reporter::from_flags(&flags);

        let config = match Config::new(&env, &flags) {
            Ok(config) => Some(config),
            Err(e) => {
                reporter.warn(format_args!("{}; no startup file or saved history", e));
                None
            }
        };

        let history = match &config {
            Some(config) => HistoryStore::load(config.paths.history_path.clone(), config.history_limit)
                .unwrap_or_else(|e| {
                    reporter.warn(format_args!("{}; history kept in memory only", e));
                    HistoryStore::new(config.history_limit)
                }),
            None => HistoryStore::new(crate::input::history::DEFAULT_MAX_ENTRIES),
        };

        if let Some(path) = history.file_path() {
            reporter.debug("history", path.display());
        }

        let session = Session::new(env, history, reporter);
        let editor: Box<dyn LineEditor> = if flags.is_set("raw") {
            Box::new(RawEditor::stdio())
        } else {
            Box::new(RustylineEditor::new(&session)?)
        };

        // Children share the terminal's process group; the shell itself
        // must outlive their Ctrl-C.
        ctrlc::set_handler(move || {
            println!();
        })?;

        Ok(Self::with_parts(editor, session, LineExecutor::default(), config))
    }

    pub fn with_parts(
        editor: Box<dyn LineEditor>,
        session: Session,
        executor: LineExecutor,
        config: Option<Config>,
    ) -> Self {
        Shell {
            editor,
            session,
            executor,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn execute_line(&mut self, line: &str) -> i32 {
        self.executor.execute_line(line, &mut self.session)
    }

    fn run_startup_file(&mut self) {
        let Some(config) = &self.config else {
            return;
        };

        match config.startup_lines() {
            Ok(lines) => {
                self.session
                    .reporter
                    .debug("startup", config.paths.rc_path.display());
                for line in lines {
                    self.execute_line(&line);
                }
            }
            Err(e) => self.session.reporter.warn(format_args!(
                "couldn't read {}: {}",
                config.paths.rc_path.display(),
                e
            )),
        }
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        self.run_startup_file();

        loop {
            match self.editor.read_line(PROMPT, &mut self.session) {
                Ok(ReadOutcome::Line(line)) => {
                    if line == "exit" {
                        break;
                    }
                    self.execute_line(&line);
                }
                Ok(ReadOutcome::Interrupted) => continue,
                Ok(ReadOutcome::Eof) => break,
                Err(e) => {
                    self.session.reporter.error(e);
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ConfigPaths;
    use std::collections::VecDeque;
    use std::fs;

    struct ScriptedEditor {
        lines: VecDeque<ReadOutcome>,
    }

    impl ScriptedEditor {
        fn new(outcomes: Vec<ReadOutcome>) -> Box<Self> {
            Box::new(Self {
                lines: outcomes.into(),
            })
        }
    }

    impl LineEditor for ScriptedEditor {
        fn read_line(&mut self, _prompt: &str, session: &mut Session) -> Result<ReadOutcome, ShellError> {
            let outcome = self.lines.pop_front().unwrap_or(ReadOutcome::Eof);
            if let ReadOutcome::Line(line) = &outcome {
                session.history.push(line)?;
            }
            Ok(outcome)
        }
    }

    fn line(text: &str) -> ReadOutcome {
        ReadOutcome::Line(text.to_string())
    }

    fn shell(outcomes: Vec<ReadOutcome>, config: Option<Config>) -> Shell {
        let env = EnvironmentStore::from_vars([("PATH", "/usr/bin:/bin"), ("HOME", "/nonexistent")]);
        Shell::with_parts(
            ScriptedEditor::new(outcomes),
            Session::detached(env),
            LineExecutor::default(),
            config,
        )
    }

    #[test]
    fn test_exit_stops_before_later_lines() {
        let mut shell = shell(
            vec![line("BEFORE=1"), line("exit"), line("AFTER=1")],
            None,
        );
        shell.run().unwrap();
        assert_eq!(shell.session().env.get("BEFORE"), Some("1"));
        assert!(!shell.session().env.contains("AFTER"));
    }

    #[test]
    fn test_exit_is_matched_literally() {
        let mut shell = shell(
            vec![line("CMD=exit"), line("$CMD"), line("STILL=here")],
            None,
        );
        shell.run().unwrap();
        assert_eq!(shell.session().env.get("STILL"), Some("here"));
    }

    #[test]
    fn test_interrupt_continues_and_eof_ends() {
        let mut shell = shell(
            vec![ReadOutcome::Interrupted, line("A=1"), ReadOutcome::Eof, line("B=1")],
            None,
        );
        shell.run().unwrap();
        assert!(shell.session().env.contains("A"));
        assert!(!shell.session().env.contains("B"));
        assert_eq!(shell.session().history.entries(), &["A=1".to_string()]);
    }

    #[test]
    fn test_startup_file_runs_first() {
        let dir = tempfile::tempdir().unwrap();
        let rc_path = dir.path().join("rc");
        fs::write(&rc_path, "# comment\nexport FROM_RC=yes\nSEEN=$FROM_RC\n").unwrap();

        let config = Config {
            paths: ConfigPaths {
                rc_path,
                history_path: dir.path().join("history"),
            },
            history_limit: 10,
        };
        let mut shell = shell(vec![line("AFTER=$SEEN")], Some(config));
        shell.run().unwrap();

        assert_eq!(shell.session().env.get("AFTER"), Some("yes"));
        assert_eq!(shell.session().history.len(), 1);
    }
}
