//! Output formatting for CLI commands.
//!
//! Human-readable text with semantic colors and icons, plus JSON for
//! programmatic use. Color theme:
//!   - Success/Completed: green
//!   - Active:            yellow (in_progress, high priority)
//!   - Error/Blocked:     red    (blocked status, critical priority)
//!   - Info/Reference:    cyan   (task IDs, testing)
//!   - Muted:             dimmed (field labels, low priority)
//!   - Emphasis:          bold   (phase headers)

use crate::domain::{TaskPriority, TaskStatus};
use colored::Colorize;
use serde::Serialize;
use std::env;
use std::io::{self, Write};

const DEFAULT_TERMINAL_WIDTH: u16 = 80;
const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// Configuration for output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,
    /// Whether to use ASCII-only icons instead of Unicode.
    pub use_ascii: bool,
    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create a new OutputConfig with explicit values.
    pub fn new(max_width: usize, use_ascii: bool, use_colors: bool) -> Self {
        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Create an OutputConfig by reading from environment variables.
    ///
    /// Reads:
    /// - `BACKLOG_MAX_WIDTH`: Maximum content width (default: 80)
    /// - `BACKLOG_ASCII`: Set to "1" or "true" for ASCII-only icons
    /// - `NO_COLOR`: Standard env var to disable colors (any value disables)
    /// - `BACKLOG_COLOR`: Set to "0" or "false" to disable colors
    pub fn from_env() -> Self {
        let max_width = match env::var("BACKLOG_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => match s.parse() {
                Ok(width) => width,
                Err(_) => {
                    tracing::warn!(
                        env_var = "BACKLOG_MAX_WIDTH",
                        value = %s,
                        default = DEFAULT_MAX_CONTENT_WIDTH,
                        "Invalid value, using default"
                    );
                    DEFAULT_MAX_CONTENT_WIDTH
                }
            },
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let use_ascii = match env::var("BACKLOG_ASCII") {
            Ok(v) if v == "1" || v.eq_ignore_ascii_case("true") => true,
            Ok(v) if v == "0" || v.eq_ignore_ascii_case("false") || v.is_empty() => false,
            Ok(v) => {
                tracing::warn!(
                    env_var = "BACKLOG_ASCII",
                    value = %v,
                    "Invalid value (expected '1', 'true', '0', or 'false'), using default"
                );
                false
            }
            Err(_) => false,
        };

        // Respect NO_COLOR (https://no-color.org/); BACKLOG_COLOR for
        // explicit control.
        let use_colors = env::var("NO_COLOR").is_err()
            && env::var("BACKLOG_COLOR")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true);

        Self {
            max_width,
            use_ascii,
            use_colors,
        }
    }

    /// Effective wrap width: the configured maximum capped by the terminal.
    pub fn wrap_width(&self) -> usize {
        self.max_width.min(terminal_width())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_CONTENT_WIDTH,
            use_ascii: false,
            use_colors: true,
        }
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH as usize)
}

/// Wrap text to the given width, preserving words.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(1))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// Output format mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text format
    Text,
    /// JSON format for programmatic use
    Json,
}

/// Print a simple message
pub fn print_message(msg: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{msg}")
}

/// Print a JSON-formatted result for any serializable value
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(handle, "{json}")
}

/// Apply semantic "success" color (green) to text.
pub fn success(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.green().to_string()
}

/// Apply semantic "warning" color (yellow) to text.
pub fn warning(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.yellow().to_string()
}

/// Apply dimmed style to text (for field labels).
pub(crate) fn dimmed(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.dimmed().to_string()
}

/// Apply bold style to text (for phase headers).
pub(crate) fn bold(text: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return text.to_string();
    }
    text.bold().to_string()
}

/// Colorize a task ID (cyan).
pub(crate) fn colorize_id(id: &str, config: &OutputConfig) -> String {
    if !config.use_colors {
        return id.to_string();
    }
    id.cyan().to_string()
}

/// Apply color to priority text based on priority level.
pub(crate) fn colorize_priority(priority: TaskPriority, config: &OutputConfig) -> String {
    let text = format!("{priority}");
    if !config.use_colors {
        return text;
    }
    match priority {
        TaskPriority::Critical => text.red().bold().to_string(),
        TaskPriority::High => text.yellow().to_string(),
        TaskPriority::Medium => text,
        TaskPriority::Low => text.dimmed().to_string(),
    }
}

/// Get a colored status icon, with ASCII fallback support.
pub(crate) fn colored_status_icon(status: TaskStatus, config: &OutputConfig) -> String {
    let icon = if config.use_ascii {
        match status {
            TaskStatus::Ready => "o",
            TaskStatus::InProgress => ">",
            TaskStatus::Testing => "~",
            TaskStatus::Completed => "+",
            TaskStatus::Blocked => "x",
        }
    } else {
        match status {
            TaskStatus::Ready => "○",
            TaskStatus::InProgress => "▶",
            TaskStatus::Testing => "◇",
            TaskStatus::Completed => "✓",
            TaskStatus::Blocked => "✗",
        }
    };

    if !config.use_colors {
        return icon.to_string();
    }

    match status {
        TaskStatus::Ready => icon.white().to_string(),
        TaskStatus::InProgress => icon.yellow().to_string(),
        TaskStatus::Testing => icon.cyan().to_string(),
        TaskStatus::Completed => icon.green().to_string(),
        TaskStatus::Blocked => icon.red().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colored::control::set_override;
    use std::sync::{Mutex, MutexGuard};

    static GLOBAL_STATE_MUTEX: Mutex<()> = Mutex::new(());

    struct ColorGuard<'a> {
        _guard: MutexGuard<'a, ()>,
    }

    impl<'a> ColorGuard<'a> {
        fn new() -> Self {
            let guard = GLOBAL_STATE_MUTEX.lock().unwrap();
            set_override(true);
            Self { _guard: guard }
        }
    }

    impl Drop for ColorGuard<'_> {
        fn drop(&mut self) {
            set_override(false);
        }
    }

    fn with_colors_enabled<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ColorGuard::new();
        f()
    }

    #[test]
    fn test_status_icons_contain_ansi_codes() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            for status in [
                TaskStatus::Ready,
                TaskStatus::InProgress,
                TaskStatus::Testing,
                TaskStatus::Completed,
                TaskStatus::Blocked,
            ] {
                let icon = colored_status_icon(status, &config);
                assert!(icon.contains("\x1b["), "{status} icon should have ANSI codes");
            }
        });
    }

    #[test]
    fn test_colorize_priority_medium_has_no_styling() {
        with_colors_enabled(|| {
            let config = OutputConfig::new(80, false, true);
            let critical = colorize_priority(TaskPriority::Critical, &config);
            let medium = colorize_priority(TaskPriority::Medium, &config);
            assert!(critical.contains("\x1b["), "critical should have ANSI codes");
            assert!(!medium.contains("\x1b["), "medium should not have ANSI codes");
        });
    }

    #[test]
    fn test_ascii_fallback_icons() {
        let config = OutputConfig::new(80, true, false);
        assert_eq!(colored_status_icon(TaskStatus::Ready, &config), "o");
        assert_eq!(colored_status_icon(TaskStatus::Completed, &config), "+");
        assert_eq!(colored_status_icon(TaskStatus::Blocked, &config), "x");
    }

    #[test]
    fn test_unicode_icons_without_colors() {
        let config = OutputConfig::new(80, false, false);
        assert_eq!(colored_status_icon(TaskStatus::Ready, &config), "○");
        assert_eq!(colored_status_icon(TaskStatus::Completed, &config), "✓");
    }

    #[test]
    fn test_semantic_colors_without_colors() {
        let config = OutputConfig::new(80, false, false);
        assert_eq!(success("done", &config), "done");
        assert_eq!(warning("caution", &config), "caution");
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("one two three four five six seven", 10);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| line.len() <= 10));
    }
}
