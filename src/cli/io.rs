//! Line-oriented JSON I/O for the exec command
//!
//! - Input: one JSON request per line; blank lines are skipped
//! - Output: one JSON response per line
//! - A line that is not UTF-8 is handed back undecoded so the caller can
//!   answer it and move on

use std::io::{BufRead, Write};
use std::iter;
use std::string::FromUtf8Error;

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// One request line, or the bytes that failed to decode
pub type RequestLine = Result<String, FromUtf8Error>;

/// Iterates non-blank request lines with their terminators stripped.
///
/// Only a failure of the input stream itself is an `Err`.
pub fn read_requests<R: BufRead>(mut input: R) -> impl Iterator<Item = CliResult<RequestLine>> {
    iter::from_fn(move || loop {
        let mut line = Vec::new();
        match input.read_until(b'\n', &mut line) {
            Ok(0) => return None,
            Ok(_) => {
                if line.ends_with(b"\n") {
                    line.pop();
                    if line.ends_with(b"\r") {
                        line.pop();
                    }
                }
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                return Some(Ok(String::from_utf8(line)));
            }
            Err(e) => return Some(Err(CliError::from(e))),
        }
    })
}

/// Write a success response
pub fn write_response<W: Write>(output: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    serde_json::to_writer(&mut *output, &response)?;
    writeln!(output)?;
    output.flush()?;

    Ok(())
}

/// Write a raw JSON string
pub fn write_json<W: Write>(output: &mut W, json_str: &str) -> CliResult<()> {
    writeln!(output, "{}", json_str)?;
    output.flush()?;

    Ok(())
}
