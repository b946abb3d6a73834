//! Runtime values
//!
//! A value is what a command or plugin hands back to the REPL: a number,
//! a plain text message, or an error.

use crate::CalcError;

/// Runtime value in Abacus
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Error(CalcError),
}

impl Value {
    // ========== Safe Accessors (never panic) ==========

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Read a REPL token: numeric if it parses as a float, raw text otherwise
    pub fn from_token(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Text(token.to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => f.write_str(s),
            Value::Error(e) => write!(f, "{}", e),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<CalcError> for Value {
    fn from(e: CalcError) -> Self {
        Value::Error(e)
    }
}
