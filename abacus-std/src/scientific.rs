//! Scientific functions: power, square root, sine and cosine

use crate::helpers::{expect_args, extract_number};
use abacus_plugin::prelude::*;

pub struct Scientific;

static POWER_ARGS: [ArgMeta; 2] = [
    ArgMeta::number("base", "Base value"),
    ArgMeta::number("exponent", "Exponent"),
];
static POWER_EXAMPLES: [&str; 2] =
    ["use_plugin scientific power 2 3", "use_plugin scientific power 3 2"];

static SQRT_ARGS: [ArgMeta; 1] = [ArgMeta::number("x", "Value (must be non-negative)")];
static SQRT_EXAMPLES: [&str; 1] = ["use_plugin scientific sqrt 16"];

static SIN_ARGS: [ArgMeta; 1] = [ArgMeta::number("angle", "Angle in radians")];
static SIN_EXAMPLES: [&str; 1] = ["use_plugin scientific sin 0"];

static COS_ARGS: [ArgMeta; 1] = [ArgMeta::number("angle", "Angle in radians")];
static COS_EXAMPLES: [&str; 1] = ["use_plugin scientific cos 0"];

fn power(args: &[Value]) -> Result<Value, CalcError> {
    expect_args("power", args, 2)?;
    let base = match extract_number(&args[0], true) {
        Ok(n) => n,
        Err(e) => return Ok(Value::Error(e)),
    };
    let exponent = match extract_number(&args[1], true) {
        Ok(n) => n,
        Err(e) => return Ok(Value::Error(e)),
    };
    Ok(Value::Number(base.powf(exponent)))
}

fn sqrt(args: &[Value]) -> Result<Value, CalcError> {
    expect_args("sqrt", args, 1)?;
    let x = match extract_number(&args[0], false) {
        Ok(n) => n,
        Err(e) => return Ok(Value::Error(e)),
    };
    if x < 0.0 {
        return Ok(Value::Error(CalcError::domain_error(
            "Cannot calculate square root of negative number",
        )));
    }
    Ok(Value::Number(x.sqrt()))
}

fn unary(func: &str, args: &[Value], f: fn(f64) -> f64) -> Result<Value, CalcError> {
    expect_args(func, args, 1)?;
    match extract_number(&args[0], false) {
        Ok(x) => Ok(Value::Number(f(x))),
        Err(e) => Ok(Value::Error(e)),
    }
}

impl Plugin for Scientific {
    fn name(&self) -> &str {
        "scientific"
    }

    fn description(&self) -> &str {
        "Scientific calculator functions (power, square root, sin, cos)"
    }

    fn commands(&self) -> CommandTable {
        CommandTable::new()
            .with_command(
                CommandMeta {
                    name: "power",
                    description: "Raise base to exponent",
                    args: &POWER_ARGS,
                    examples: &POWER_EXAMPLES,
                },
                power,
            )
            .with_command(
                CommandMeta {
                    name: "sqrt",
                    description: "Square root",
                    args: &SQRT_ARGS,
                    examples: &SQRT_EXAMPLES,
                },
                sqrt,
            )
            .with_command(
                CommandMeta {
                    name: "sin",
                    description: "Sine function",
                    args: &SIN_ARGS,
                    examples: &SIN_EXAMPLES,
                },
                |args| unary("sin", args, f64::sin),
            )
            .with_command(
                CommandMeta {
                    name: "cos",
                    description: "Cosine function",
                    args: &COS_ARGS,
                    examples: &COS_EXAMPLES,
                },
                |args| unary("cos", args, f64::cos),
            )
    }
}
