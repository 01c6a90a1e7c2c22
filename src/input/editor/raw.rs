use std::io::{self, Read, Write};
use std::os::unix::io::RawFd;

use super::terminal::{is_terminal, RawMode};
use super::{commit, LineEditor, ReadOutcome};
use crate::core::Session;
use crate::error::ShellError;
use crate::input::completer::{word_start, CompletionEngine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
    Tab,
    Interrupt,
    /// Ctrl-D.
    EndOfTransmission,
    /// The input stream is exhausted.
    EndOfInput,
    Ignored,
}

/// Tab presses on an unchanged buffer walk the candidate list.
struct TabCycle {
    start: usize,
    prefix: String,
    index: usize,
    spliced: String,
}

/// Byte-at-a-time editor: Backspace, Up/Down history recall and Tab
/// completion, redrawn by hand. When reading from a terminal it switches it
/// to raw mode for the duration of each line.
pub struct RawEditor<R, W> {
    input: R,
    output: W,
    tty_fd: Option<RawFd>,
    completion: CompletionEngine,
    tab: Option<TabCycle>,
}

impl RawEditor<io::Stdin, io::Stdout> {
    pub fn stdio() -> Self {
        let fd = libc::STDIN_FILENO;
        let tty_fd = is_terminal(fd).then_some(fd);
        Self::with_terminal(io::stdin(), io::stdout(), tty_fd)
    }
}

impl<R: Read, W: Write> RawEditor<R, W> {
    /// Editor over arbitrary streams; the terminal mode is left alone.
    pub fn new(input: R, output: W) -> Self {
        Self::with_terminal(input, output, None)
    }

    fn with_terminal(input: R, output: W, tty_fd: Option<RawFd>) -> Self {
        Self {
            input,
            output,
            tty_fd,
            completion: CompletionEngine::new(),
            tab: None,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.input.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    fn read_key(&mut self) -> io::Result<Key> {
        let Some(byte) = self.read_byte()? else {
            return Ok(Key::EndOfInput);
        };

        Ok(match byte {
            b'\r' | b'\n' => Key::Enter,
            0x7f | 0x08 => Key::Backspace,
            b'\t' => Key::Tab,
            0x03 => Key::Interrupt,
            0x04 => Key::EndOfTransmission,
            0x1b => self.read_escape()?,
            b if b < 0x20 => Key::Ignored,
            b if b < 0x80 => Key::Char(char::from(b)),
            lead => self.read_utf8(lead)?,
        })
    }

    /// CSI sequences: arrows up and down are recognised, the rest swallowed.
    fn read_escape(&mut self) -> io::Result<Key> {
        if self.read_byte()? != Some(b'[') {
            return Ok(Key::Ignored);
        }

        let mut byte = self.read_byte()?;
        // Parameter bytes, e.g. the `3` in Delete's `ESC [ 3 ~`.
        while let Some(b'0'..=b'9' | b';') = byte {
            byte = self.read_byte()?;
        }

        Ok(match byte {
            Some(b'A') => Key::Up,
            Some(b'B') => Key::Down,
            _ => Key::Ignored,
        })
    }

    fn read_utf8(&mut self, lead: u8) -> io::Result<Key> {
        let width = match lead {
            0xc0..=0xdf => 2,
            0xe0..=0xef => 3,
            0xf0..=0xf7 => 4,
            _ => return Ok(Key::Ignored),
        };

        let mut bytes = vec![lead];
        for _ in 1..width {
            match self.read_byte()? {
                Some(b) => bytes.push(b),
                None => return Ok(Key::Ignored),
            }
        }

        Ok(std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.chars().next())
            .map_or(Key::Ignored, Key::Char))
    }

    fn redraw(&mut self, prompt: &str, buffer: &str) -> io::Result<()> {
        write!(self.output, "\r\x1b[K{}{}", prompt, buffer)?;
        self.output.flush()
    }

    fn finish_line(&mut self) -> io::Result<()> {
        self.output.write_all(b"\r\n")?;
        self.output.flush()
    }

    fn complete(&mut self, buffer: &mut String, session: &Session) -> io::Result<()> {
        let mut cycle = match self.tab.take() {
            Some(mut cycle) if cycle.spliced == *buffer => {
                cycle.index += 1;
                cycle
            }
            _ => {
                let start = word_start(buffer);
                TabCycle {
                    start,
                    prefix: buffer[start..].to_string(),
                    index: 0,
                    spliced: String::new(),
                }
            }
        };

        buffer.truncate(cycle.start);
        match self.completion.candidate(&cycle.prefix, cycle.index, &session.env) {
            Some(candidate) => {
                buffer.push_str(&candidate);
                cycle.spliced = buffer.clone();
                self.tab = Some(cycle);
            }
            None => {
                buffer.push_str(&cycle.prefix);
                self.completion.reset();
                self.output.write_all(b"\x07")?;
            }
        }
        Ok(())
    }

    fn edit(&mut self, prompt: &str, session: &mut Session) -> io::Result<ReadOutcome> {
        session.history.reset_cursor();
        self.tab = None;
        let mut buffer = String::new();
        self.redraw(prompt, &buffer)?;

        loop {
            let key = self.read_key()?;
            if key != Key::Tab {
                self.tab = None;
            }

            match key {
                Key::Enter => {
                    self.finish_line()?;
                    commit(&buffer, session);
                    return Ok(ReadOutcome::Line(buffer));
                }
                Key::EndOfInput => {
                    self.finish_line()?;
                    return Ok(ReadOutcome::Eof);
                }
                Key::EndOfTransmission if buffer.is_empty() => {
                    self.finish_line()?;
                    return Ok(ReadOutcome::Eof);
                }
                Key::Interrupt => {
                    self.output.write_all(b"^C")?;
                    self.finish_line()?;
                    return Ok(ReadOutcome::Interrupted);
                }
                Key::Backspace => {
                    if buffer.pop().is_some() {
                        self.redraw(prompt, &buffer)?;
                    }
                }
                Key::Up => {
                    if let Some(entry) = session.history.previous() {
                        buffer = entry.to_string();
                        self.redraw(prompt, &buffer)?;
                    }
                }
                Key::Down => {
                    if session.history.cursor() < session.history.len() {
                        buffer = session.history.next().unwrap_or_default().to_string();
                        self.redraw(prompt, &buffer)?;
                    }
                }
                Key::Tab => {
                    self.complete(&mut buffer, session)?;
                    self.redraw(prompt, &buffer)?;
                }
                Key::Char(c) => {
                    buffer.push(c);
                    let mut utf8 = [0u8; 4];
                    self.output.write_all(c.encode_utf8(&mut utf8).as_bytes())?;
                    self.output.flush()?;
                }
                Key::EndOfTransmission | Key::Ignored => {}
            }
        }
    }
}

impl<R: Read, W: Write> LineEditor for RawEditor<R, W> {
    fn read_line(&mut self, prompt: &str, session: &mut Session) -> Result<ReadOutcome, ShellError> {
        let _raw_mode = match self.tty_fd {
            Some(fd) => Some(RawMode::enable(fd)?),
            None => None,
        };
        Ok(self.edit(prompt, session)?)
    }
}
