//! Colored terminal output helpers.
//!
//! Data goes to stdout, diagnostics to stderr. The `colored` crate handles
//! NO_COLOR / CLICOLOR / CLICOLOR_FORCE on its own.

use std::fmt;

use colored::Colorize;

/// Plain data line, uncolored.
pub fn info(msg: impl fmt::Display) {
    println!("{}", msg);
}

/// Indented detail line under a header, uncolored.
pub fn detail(msg: impl fmt::Display) {
    println!("  {}", msg);
}

/// Section header, cyan bold.
pub fn header(msg: impl fmt::Display) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Completed action with a green verb label, e.g. `Created: <path>`.
pub fn action(label: &str, msg: impl fmt::Display) {
    println!("{}: {}", label.green(), msg);
}

/// Per-item pass marker, green check.
pub fn success(msg: impl fmt::Display) {
    println!("{} {}", "✓".green(), msg);
}

/// Indented pass marker for records inside a listing.
pub fn success_detail(msg: impl fmt::Display) {
    println!("  {} {}", "✓".green(), msg);
}

/// Indented fail marker for records inside a listing, red cross.
pub fn failure(msg: impl fmt::Display) {
    println!("  {} {}", "✗".red(), msg);
}

/// Warning to stderr, yellow prefix.
pub fn warning(msg: impl fmt::Display) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Error to stderr, red bold prefix.
pub fn error(msg: impl fmt::Display) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}
