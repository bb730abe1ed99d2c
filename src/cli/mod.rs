//! CLI command definitions and user prompts.
//!
//! Uses clap derive macros for argument definitions. Alerts, notices and
//! confirmations go to stderr so stdout carries only rendered views.

pub mod args;

use std::io::{self, BufRead, Write};

use colored::Colorize;

/// Print a blocking alert (an error the user must see) to stderr.
pub fn alert(message: &str) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "  {} {}", "✖".red().bold(), message.red());
    let _ = handle.flush();
}

/// Print a success or status line to stderr.
pub fn notice(message: &str) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    let _ = writeln!(handle, "  {} {}", "✔".green().bold(), message);
    let _ = handle.flush();
}

/// Print a secondary hint to stderr.
pub fn hint(message: &str) {
    eprintln!("  {}", message.dimmed());
}

/// Ask a yes/no question. Anything but `y`/`yes` (any case) is no,
/// including end of input.
pub fn confirm<R: BufRead, W: Write>(question: &str, mut input: R, mut output: W) -> io::Result<bool> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
