//! Argument helpers shared by the standard plugins

use abacus_core::{CalcError, Value};

/// Read an argument as a float. Numeric text is accepted; anything else is
/// reported with the plugin's invalid-number message.
pub fn extract_number(value: &Value, plural: bool) -> Result<f64, CalcError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(s) => s.trim().parse::<f64>().map_err(|_| CalcError::invalid_number(plural)),
        Value::Error(e) => Err(e.clone()),
    }
}

/// Ensure exactly `expected` arguments were supplied
pub fn expect_args(func: &str, args: &[Value], expected: usize) -> Result<(), CalcError> {
    if args.len() != expected {
        return Err(CalcError::arg_count(func, expected, args.len()));
    }
    Ok(())
}
