//! Abacus Core - Fundamental types
//!
//! This crate provides the core types used throughout Abacus:
//! - `Value`: Runtime values (numbers, text, errors)
//! - `Operation`: The four built-in arithmetic operations
//! - `CalcError`: Structured errors with user-facing messages

mod error;
mod operation;
mod value;

pub use error::{codes, CalcError, DIVISION_BY_ZERO};
pub use operation::{Operation, ParseOperationError};
pub use value::Value;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{CalcError, Operation, Value};
}
