use std::io::{self, stdin, stdout, IsTerminal, Write};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

use crate::io::Console;

use log::error;

// The controlling terminal, in raw mode so keys arrive one at a time without echo.
// Raw mode is left when this is dropped. Without a terminal on stdin nothing is
// changed until a key is actually read.
pub struct TerminalConsole;

impl TerminalConsole {
    pub fn new() -> io::Result<Self> {
        if stdin().is_terminal() {
            terminal::enable_raw_mode()?;
        }
        Ok(TerminalConsole)
    }

    // Ok(None) for keys with no ASCII equivalent.
    fn translate(key: KeyEvent) -> io::Result<Option<u8>> {
        if key.kind != KeyEventKind::Press {
            return Ok(None);
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Raw mode swallows SIGINT.
                KeyCode::Char('c') => Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
                KeyCode::Char(c) if c.is_ascii_alphabetic() => Ok(Some((c.to_ascii_lowercase() as u8) & 0x1f)),
                _ => Ok(None),
            };
        }

        Ok(match key.code {
            KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
            KeyCode::Enter => Some(b'\n'),
            KeyCode::Tab => Some(b'\t'),
            KeyCode::Backspace => Some(0x08),
            KeyCode::Esc => Some(0x1b),
            _ => None,
        })
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        if !terminal::is_raw_mode_enabled().unwrap_or(false) {
            return;
        }
        if let Err(e) = terminal::disable_raw_mode() {
            error!("Terminal: failed to leave raw mode: {e}");
        }
    }
}

impl Console for TerminalConsole {
    fn poll_key(&self, timeout: Duration) -> io::Result<Option<u8>> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)? {
                return Ok(None);
            }
            if let Event::Key(key) = event::read()? {
                if let Some(val) = Self::translate(key)? {
                    return Ok(Some(val));
                }
            }
            if remaining.is_zero() {
                return Ok(None);
            }
        }
    }

    fn read_char(&self) -> io::Result<u8> {
        loop {
            if let Event::Key(key) = event::read()? {
                if let Some(val) = Self::translate(key)? {
                    return Ok(val);
                }
            }
        }
    }

    fn write_char(&self, val: u8) -> io::Result<()> {
        let mut out = stdout().lock();
        // No output post-processing in raw mode.
        if val == b'\n' {
            out.write_all(b"\r\n")
        } else {
            out.write_all(&[val])
        }
    }

    fn flush(&self) -> io::Result<()> {
        stdout().lock().flush()
    }
}
