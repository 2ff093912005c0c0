// src/output.rs

//! Categorized console status lines
//!
//! Every human-facing line goes through [`Category`], which maps to a
//! fixed marker and color. There is no global color state; styling is
//! decided per call and `console` drops it when stdout is not a terminal.

use console::{Style, style};

/// Kind of status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// A stage is starting or something neutral happened
    Info,
    /// Nothing to do, or an action completed
    Success,
    /// Findings that need attention but were not acted on
    Warning,
    /// An action failed
    Error,
    /// Static guidance text
    Detail,
    /// An action is in progress
    Progress,
}

impl Category {
    /// Bracketed marker printed before the message
    pub fn marker(self) -> &'static str {
        match self {
            Category::Info => "[*]",
            Category::Success => "[\u{2714}]",
            Category::Warning => "[*]",
            Category::Error => "[X]",
            Category::Detail => "[I]",
            Category::Progress => "[>]",
        }
    }

    fn style(self) -> Style {
        match self {
            Category::Info => Style::new().blue(),
            Category::Success => Style::new().green(),
            Category::Warning => Style::new().yellow(),
            Category::Error => Style::new().red(),
            Category::Detail => Style::new().dim(),
            Category::Progress => Style::new().color256(208),
        }
    }
}

/// Render a status line without printing it
pub fn format_line(category: Category, message: &str) -> String {
    let marker = category.style().apply_to(category.marker());
    if category == Category::Detail {
        format!(" {} {}", marker, style(message).dim())
    } else {
        format!(" {} {}", marker, message)
    }
}

/// Print a status line to stdout
pub fn report(category: Category, message: &str) {
    println!("{}", format_line(category, message));
}

/// Print a blank line followed by a stage heading
pub fn heading(message: &str) {
    println!();
    report(Category::Info, message);
}

/// Highlight a package name inside a message
pub fn package(name: &str) -> String {
    style(name).color256(208).to_string()
}

/// De-emphasized text, used for version transitions and outcomes
pub fn muted(text: &str) -> String {
    style(text).dim().to_string()
}

/// "s" when `count` calls for a plural noun
pub fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(Category::Info.marker(), "[*]");
        assert_eq!(Category::Success.marker(), "[✔]");
        assert_eq!(Category::Error.marker(), "[X]");
        assert_eq!(Category::Detail.marker(), "[I]");
        assert_eq!(Category::Progress.marker(), "[>]");
    }

    #[test]
    fn test_format_line_contains_marker_and_message() {
        console::set_colors_enabled(false);
        let line = format_line(Category::Success, "No outdated packages found.");
        assert_eq!(line, " [✔] No outdated packages found.");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(0), "s");
        assert_eq!(plural(1), "");
        assert_eq!(plural(2), "s");
    }
}
