//! Styling for terminal output.
//!
//! Uses the anstyle ecosystem:
//! - anstream for auto-detecting color support
//! - anstyle for composable styling

use anstyle::{AnsiColor, Color, Style};

/// Auto-detecting println that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::println;

/// Auto-detecting eprintln that respects NO_COLOR, CLICOLOR_FORCE, and terminal capabilities
pub use anstream::eprintln;

/// Error style (red) - use as `{ERROR}text{ERROR:#}`
pub const ERROR: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red)));

/// Error style (red + bold) for the interesting part of an error line
pub const ERROR_BOLD: Style = ERROR.bold();

/// Hint style (dimmed) - use as `{HINT}text{HINT:#}`
pub const HINT: Style = Style::new().dimmed();

/// Gutter style for quoted command output
pub const GUTTER: Style = Style::new().dimmed();

/// Error emoji - use with ERROR style: `eprintln!("{ERROR_EMOJI} {ERROR}message{ERROR:#}");`
pub const ERROR_EMOJI: &str = "❌";

/// Hint emoji - use with HINT style: `eprintln!("{HINT_EMOJI} {HINT}message{HINT:#}");`
pub const HINT_EMOJI: &str = "💡";

/// Quote multi-line text (usually a child's stderr) behind a `│` gutter.
///
/// Trailing blank lines are dropped; an empty input yields an empty string.
pub fn format_with_gutter(content: &str) -> String {
    content
        .trim_end()
        .lines()
        .map(|line| format!("{GUTTER}│{GUTTER:#} {line}\n"))
        .collect()
}
