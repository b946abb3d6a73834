//! Structured errors
//!
//! Errors never crash the calculator loop. They are values returned from
//! commands and plugin calls, carrying a machine-readable code next to the
//! exact message shown to the user.

/// Standard error codes (machine-readable)
pub mod codes {
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const PLUGIN_NOT_FOUND: &str = "PLUGIN_NOT_FOUND";
    pub const COMMAND_NOT_FOUND: &str = "COMMAND_NOT_FOUND";
    pub const EXECUTION: &str = "EXECUTION";
    pub const IO_ERROR: &str = "IO_ERROR";
}

/// Sentinel message returned by `divide` when the divisor is zero
pub const DIVISION_BY_ZERO: &str = "Error: Division by zero";

/// Structured calculator error
#[derive(Debug, Clone, PartialEq)]
pub struct CalcError {
    /// Machine-readable error code
    pub code: String,

    /// Message shown to the user, verbatim
    pub message: String,

    /// Suggestion for fixing the error
    pub suggestion: Option<String>,
}

impl CalcError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn div_zero() -> Self {
        Self::new(codes::DIV_ZERO, DIVISION_BY_ZERO)
            .with_suggestion("Ensure divisor is not zero")
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Error: {}", details.into()))
    }

    /// A plugin argument could not be read as a number
    pub fn invalid_number(plural: bool) -> Self {
        let message = if plural { "Error: Invalid numbers" } else { "Error: Invalid number" };
        Self::new(codes::ARG_TYPE, message)
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(
            codes::ARG_COUNT,
            format!("{}() takes {} argument(s) but {} were given", func, expected, got),
        )
    }

    pub fn plugin_not_found(plugin: &str) -> Self {
        Self::new(codes::PLUGIN_NOT_FOUND, format!("Plugin '{}' not found", plugin))
            .with_suggestion("Type 'menu' to list available plugins")
    }

    pub fn command_not_found(plugin: &str, command: &str) -> Self {
        Self::new(
            codes::COMMAND_NOT_FOUND,
            format!("Command '{}' not found in plugin '{}'", command, plugin),
        )
        .with_suggestion("Type 'menu' to list plugin commands")
    }

    /// Failure raised while a plugin command was running
    pub fn execution(details: impl Into<String>) -> Self {
        Self::new(codes::EXECUTION, format!("Error executing command: {}", details.into()))
    }

    /// History file could not be read, written or removed
    pub fn io(details: impl Into<String>) -> Self {
        Self::new(codes::IO_ERROR, details)
    }
}

impl std::fmt::Display for CalcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CalcError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message_only() {
        let err = CalcError::div_zero();
        assert_eq!(err.to_string(), "Error: Division by zero");
        assert!(err.is(codes::DIV_ZERO));
    }

    #[test]
    fn test_lookup_messages() {
        assert_eq!(CalcError::plugin_not_found("x").to_string(), "Plugin 'x' not found");
        assert_eq!(
            CalcError::command_not_found("scientific", "tan").to_string(),
            "Command 'tan' not found in plugin 'scientific'"
        );
    }

    #[test]
    fn test_execution_prefix() {
        let err = CalcError::execution("boom");
        assert_eq!(err.message, "Error executing command: boom");
        assert!(err.suggestion.is_none());
    }
}
