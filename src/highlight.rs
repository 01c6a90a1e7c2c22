use inksac::prelude::*;

use crate::core::commands::is_builtin;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn plain() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colours the command word, operators and expansions. Whitespace is kept
    /// as typed so the cursor position rustyline computes stays valid.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut out = String::with_capacity(input.len());
        let mut command_seen = false;
        let mut rest = input;

        while !rest.is_empty() {
            let ws_len = rest.len() - rest.trim_start().len();
            out.push_str(&rest[..ws_len]);
            rest = &rest[ws_len..];
            if rest.is_empty() {
                break;
            }

            let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..word_len];
            rest = &rest[word_len..];

            let styled = if matches!(word, "&&" | "||" | "|") {
                command_seen = false;
                self.paint(word, Style::builder().foreground(Color::Yellow).bold().build())
            } else if !command_seen && is_assignment(word) {
                self.paint(word, Style::builder().foreground(Color::Green).build())
            } else if !command_seen {
                command_seen = true;
                let style = if is_builtin(word) || word == "exit" {
                    Style::builder().foreground(Color::Blue).bold().build()
                } else {
                    Style::builder().foreground(Color::Cyan).bold().build()
                };
                self.paint(word, style)
            } else if word.contains('$') || word.starts_with('~') {
                self.paint(word, Style::builder().foreground(Color::Magenta).build())
            } else if word.starts_with('-') {
                self.paint(word, Style::builder().foreground(Color::Yellow).build())
            } else {
                word.to_string()
            };
            out.push_str(&styled);
        }

        out
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        self.paint(error, error_style)
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();
        self.paint(hint, hint_style)
    }

    fn paint(&self, text: &str, style: Style) -> String {
        text.style(style).to_string()
    }
}

fn is_assignment(word: &str) -> bool {
    word.split_once('=')
        .is_some_and(|(name, _)| crate::core::env::is_valid_name(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_highlighter_is_identity() {
        let highlighter = SyntaxHighlighter::plain();
        let line = "FOO=1  ls -la $HOME && cd ~";
        assert_eq!(highlighter.highlight_command(line), line);
        assert_eq!(highlighter.highlight_error("boom"), "boom");
        assert_eq!(highlighter.highlight_hint("hint"), "hint");
    }

    #[test]
    fn test_assignment_detection() {
        assert!(is_assignment("FOO=bar"));
        assert!(!is_assignment("--color=auto"));
        assert!(!is_assignment("plain"));
    }
}
