//! Interactive session
//!
//! A session owns the input and output handles for the whole interactive
//! run. It is opened at startup, passed explicitly to the menu, and closed
//! once at exit. Tests drive it over in-memory buffers.

use std::fmt::Display;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use super::errors::{CliError, CliResult};

/// Question/answer channel between the user and the menu
pub struct Session<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl Session<StdinLock<'static>, Stdout> {
    /// Opens a session on the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Opens a session over arbitrary handles
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    /// Prints `query` without a newline and reads one answer line.
    ///
    /// The line terminator is stripped; nothing else is. Bytes that are not
    /// UTF-8 become U+FFFD. Returns `None` once input is exhausted.
    pub fn ask(&mut self, query: &str) -> CliResult<Option<String>> {
        self.ensure_open()?;
        write!(self.output, "{}", query)?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with(b"\n") {
            line.pop();
            if line.ends_with(b"\r") {
                line.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Prints one line
    pub fn say(&mut self, line: impl Display) -> CliResult<()> {
        self.ensure_open()?;
        writeln!(self.output, "{}", line)?;
        Ok(())
    }

    /// Flushes output and ends the session. Idempotent.
    pub fn close(&mut self) -> CliResult<()> {
        if !self.closed {
            self.output.flush()?;
            self.closed = true;
        }
        Ok(())
    }

    /// Returns whether the session has been closed
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the underlying handles
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    fn ensure_open(&self) -> CliResult<()> {
        if self.closed {
            return Err(CliError::io_error("Session already closed"));
        }
        Ok(())
    }
}
