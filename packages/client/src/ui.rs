//! UI utilities for the client.

use std::io::Write;

/// Prompt shown by the line editor
pub const PROMPT: &str = "gameroom> ";

/// Print rendered lines above the prompt, then redisplay the prompt
pub fn print_lines(lines: &[String]) {
    if lines.is_empty() {
        return;
    }
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        writeln!(stdout, "\n{}", line).ok();
    }
    write!(stdout, "{}", PROMPT).ok();
    stdout.flush().ok();
}
