//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic for the command line.
//! Functions here have no side effects beyond printing.

use crate::boundary::BoundaryWarning;
use crate::resolver::ResolutionResult;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Summarise a tag resolution in one line.
pub fn format_resolution(result: &ResolutionResult) -> String {
    match &result.tag {
        Some(tag) => format!(
            "{} + {} commit(s) on {}",
            tag, result.distance, result.branch
        ),
        None => format!(
            "no matching tag, {} commit(s) on {}",
            result.distance, result.branch
        ),
    }
}

/// Display the tag resolution.
pub fn display_resolution(result: &ResolutionResult) {
    display_status(&format!(
        "Resolved {}",
        style(format_resolution(result)).bold()
    ));
}
