//! CLI input validation functions.
//!
//! These validators are used by clap's `value_parser` attribute to validate
//! user input at parse time, providing immediate feedback for invalid values.

/// Maximum allowed title length in characters
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum allowed task ID length in characters
pub const MAX_ID_LENGTH: usize = 64;

/// Validate task ID format.
///
/// IDs are free-form (any project can pick its own scheme) but must be
/// non-empty, at most 64 characters, and contain no whitespace so they stay
/// usable as single CLI arguments and YAML scalars.
pub fn validate_task_id(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Task ID cannot be empty".to_string());
    }
    if s.chars().count() > MAX_ID_LENGTH {
        return Err(format!(
            "Task ID too long: {} characters (maximum {MAX_ID_LENGTH})",
            s.chars().count()
        ));
    }
    if s.chars().any(char::is_whitespace) {
        return Err("Task ID cannot contain whitespace".to_string());
    }

    Ok(s.to_string())
}

/// Validate a task title.
pub fn validate_title(s: &str) -> Result<String, String> {
    let s = s.trim();

    if s.is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if s.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title too long: {} characters (maximum {MAX_TITLE_LENGTH})",
            s.chars().count()
        ));
    }

    Ok(s.to_string())
}

/// Validate a phase name (non-empty after trimming).
pub fn validate_phase_name(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Phase name cannot be empty".to_string());
    }
    Ok(s.to_string())
}
