//! Interactive prompts on stdin/stdout

use colored::*;
use std::io::{self, BufRead, Write};

pub const NETWORK_QUESTION: &str = "Include hostname and IP address? (Y/N):";
pub const CONTINUE_PROMPT: &str = "Press ENTER to continue...";

/// Only a lone "y" (any case, surrounding whitespace ignored) is a yes
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Read one line; EOF and read errors count as an empty answer
fn read_line(input: &mut impl BufRead) -> String {
    let mut line = String::new();
    if let Err(err) = input.read_line(&mut line) {
        tracing::debug!(error = %err, "failed to read answer, treating it as empty");
        line.clear();
    }
    line
}

/// Ask whether hostname and IP address belong in the report
pub fn ask_network_info(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "{} ", NETWORK_QUESTION.bright_yellow())?;
    out.flush()?;

    let answer = read_line(input);
    Ok(is_affirmative(&answer))
}

/// Block until the user presses Enter (or stdin closes)
pub fn wait_for_enter(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{}", CONTINUE_PROMPT.bright_white())?;
    out.flush()?;

    read_line(input);
    Ok(())
}
