//! Interactive confirmation for destructive commands.

use std::io::{BufRead, Write};

/// Ask a yes/no question, defaulting to no.
///
/// Only "y" or "yes" (any case) confirm. End of input or a read error
/// counts as a refusal.
pub fn confirm<R: BufRead, W: Write>(prompt: &str, input: &mut R, output: &mut W) -> bool {
    if write!(output, "{} [y/N] ", prompt).is_err() || output.flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => false,
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
    }
}
