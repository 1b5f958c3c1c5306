//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the escapes when the stream
//! is not a color-capable terminal.

use indicatif::ProgressStyle;
use owo_colors::OwoColorize;
use std::fmt::Display;

/// Check mark used in summaries
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize {
    /// Bold text
    fn emphasis(&self) -> String;
    /// Cyan text for names and counts
    fn accent(&self) -> String;
    /// Dimmed text for secondary information
    fn muted(&self) -> String;
    /// Green text
    fn success(&self) -> String;
    /// Yellow text
    fn warn(&self) -> String;
}

impl<T: Display> Stylize for T {
    fn emphasis(&self) -> String {
        format!("{}", self.bold())
    }

    fn accent(&self) -> String {
        format!("{}", self.cyan())
    }

    fn muted(&self) -> String {
        format!("{}", self.dimmed())
    }

    fn success(&self) -> String {
        format!("{}", self.green())
    }

    fn warn(&self) -> String {
        format!("{}", self.yellow())
    }
}

/// Green check mark
pub fn check() -> String {
    CHECK.success()
}

/// Dimmed arrow for list items
pub fn arrow() -> String {
    "→".muted()
}

/// Spinner style for long-running git operations
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", ""])
}

/// Render `url` as a terminal hyperlink labelled `text` when stdout supports
/// it, otherwise as plain `text (url)`
pub fn hyperlink(text: &str, url: &str) -> String {
    if supports_hyperlinks::on(supports_hyperlinks::Stream::Stdout) {
        terminal_link::Link::new(text, url).to_string()
    } else if text == url {
        url.to_string()
    } else {
        format!("{text} ({url})")
    }
}
