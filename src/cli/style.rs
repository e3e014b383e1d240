//! Terminal styling helpers
//!
//! Colors are only emitted when stdout supports them.

use indicatif::ProgressStyle;
use owo_colors::{OwoColorize, Stream::Stdout};
use std::fmt::Display;

/// Check mark used for success lines and merged cells
pub const CHECK: &str = "✓";

/// Cross used for unmerged cells
pub const CROSS: &str = "✗";

/// Semantic colors for CLI output
pub trait Stylize: Display {
    /// Bold
    fn emphasis(&self) -> String {
        let text = self.to_string();
        text.if_supports_color(Stdout, |t| t.bold()).to_string()
    }

    /// Cyan, for names and counts
    fn accent(&self) -> String {
        let text = self.to_string();
        text.if_supports_color(Stdout, |t| t.cyan()).to_string()
    }

    /// Dimmed, for secondary information
    fn muted(&self) -> String {
        let text = self.to_string();
        text.if_supports_color(Stdout, |t| t.dimmed()).to_string()
    }

    /// Green
    fn success(&self) -> String {
        let text = self.to_string();
        text.if_supports_color(Stdout, |t| t.green()).to_string()
    }

    /// Yellow
    fn warn(&self) -> String {
        let text = self.to_string();
        text.if_supports_color(Stdout, |t| t.yellow()).to_string()
    }

    /// Red
    fn error(&self) -> String {
        let text = self.to_string();
        text.if_supports_color(Stdout, |t| t.red()).to_string()
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Dimmed arrow for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner used while network calls are in flight
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
