use crate::core::env::EnvironmentStore;
use crate::process::{CommandCapture, ProcessError};

/// Replaces every `$( ... )` span with the captured output of its command.
///
/// Parentheses are matched by depth, so inner spans run first and their
/// output becomes part of the outer command. A span whose command cannot be
/// started is kept as written and `on_error` is told about it; an unclosed
/// `$(` is kept as written. Inserted output is not scanned again.
pub fn substitute_commands<F>(
    line: &str,
    env: &EnvironmentStore,
    capture: &dyn CommandCapture,
    on_error: &mut F,
) -> String
where
    F: FnMut(&str, &ProcessError),
{
    let mut out = String::with_capacity(line.len());
    let mut rest = line;

    while let Some(start) = rest.find("$(") {
        out.push_str(&rest[..start]);
        let body = &rest[start + 2..];

        let Some(close) = matching_paren(body) else {
            out.push_str(&rest[start..]);
            return out;
        };

        let raw = &body[..close];
        let command = substitute_commands(raw, env, capture, on_error);
        match capture.capture(&command, env) {
            Ok(output) => out.push_str(&output),
            Err(e) => {
                on_error(&command, &e);
                out.push_str(&rest[start..start + 2 + close + 1]);
            }
        }
        rest = &body[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Byte index of the `)` closing an already-open parenthesis.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Echoes `echo ARGS` commands back, fails on `fail`, prints a new span
    /// for `emit`.
    struct FakeCapture {
        seen: RefCell<Vec<String>>,
    }

    impl FakeCapture {
        fn new() -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandCapture for FakeCapture {
        fn capture(&self, command: &str, _env: &EnvironmentStore) -> Result<String, ProcessError> {
            self.seen.borrow_mut().push(command.to_string());
            if command == "fail" {
                return Err(ProcessError::Capture(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no shell",
                )));
            }
            if command == "emit" {
                return Ok("$(echo again)".to_string());
            }
            Ok(command.strip_prefix("echo ").unwrap_or("").to_string())
        }
    }

    fn run(line: &str, capture: &FakeCapture) -> (String, Vec<String>) {
        let mut errors = Vec::new();
        let env = EnvironmentStore::new();
        let out = substitute_commands(line, &env, capture, &mut |cmd: &str, _: &ProcessError| {
            errors.push(cmd.to_string())
        });
        (out, errors)
    }

    #[test]
    fn test_sequential_spans() {
        let capture = FakeCapture::new();
        let (out, errors) = run("a $(echo b) c $(echo d)", &capture);
        assert_eq!(out, "a b c d");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_nested_spans_run_inner_first() {
        let capture = FakeCapture::new();
        let (out, _) = run("x $(echo $(echo inner) outer)", &capture);
        assert_eq!(out, "x inner outer");
        assert_eq!(
            *capture.seen.borrow(),
            vec!["echo inner".to_string(), "echo inner outer".to_string()]
        );
    }

    #[test]
    fn test_failed_span_kept_and_reported() {
        let capture = FakeCapture::new();
        let (out, errors) = run("before $(fail) after $(echo ok)", &capture);
        assert_eq!(out, "before $(fail) after ok");
        assert_eq!(errors, vec!["fail".to_string()]);
    }

    #[test]
    fn test_unclosed_span_verbatim() {
        let capture = FakeCapture::new();
        let (out, _) = run("echo $(echo oops", &capture);
        assert_eq!(out, "echo $(echo oops");
        assert!(capture.seen.borrow().is_empty());
    }

    #[test]
    fn test_output_not_rescanned() {
        let capture = FakeCapture::new();
        let (out, _) = run("a $(emit) b", &capture);
        assert_eq!(out, "a $(echo again) b");
        assert_eq!(*capture.seen.borrow(), vec!["emit".to_string()]);
    }
}
