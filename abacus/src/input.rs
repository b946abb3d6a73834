//! Classification of one REPL input line

use abacus_core::{Operation, Value};
use std::path::PathBuf;
use thiserror::Error;

/// A recognised input line
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Exit,
    Menu,
    Help,
    Calculate {
        operation: Operation,
        num1: f64,
        num2: f64,
    },
    UsePlugin {
        plugin: String,
        command: String,
        args: Vec<Value>,
    },
    /// `None` means the configured default file
    SaveHistory(Option<PathBuf>),
    LoadHistory(Option<PathBuf>),
    ViewHistory,
    ClearHistory,
    DeleteHistory,
}

/// Malformed input. The message is printed as-is and the loop continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Error: Invalid input format. Please use: operation number1 number2")]
    InvalidFormat,

    #[error("Error: Please enter valid numbers")]
    InvalidNumbers,

    #[error("Error: Invalid operation. Use add, subtract, multiply, or divide")]
    InvalidOperation,

    #[error(
        "Error: Invalid save_history_to_csv command format. Use: save_history_to_csv <filename>"
    )]
    SaveFormat,

    #[error(
        "Error: Invalid load_history_from_csv command format. Use: load_history_from_csv <filename>"
    )]
    LoadFormat,

    #[error("Error: Invalid input format. Please use: use_plugin <plugin> <command> [args...]")]
    PluginFormat,
}

/// Tokenize on whitespace and classify. Matching is exact and case-sensitive.
pub fn parse(line: &str) -> Result<Input, InputError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    match tokens.as_slice() {
        ["exit"] => Ok(Input::Exit),
        ["menu"] => Ok(Input::Menu),
        ["help"] => Ok(Input::Help),
        ["use_plugin", rest @ ..] => match rest {
            [plugin, command, args @ ..] => Ok(Input::UsePlugin {
                plugin: plugin.to_string(),
                command: command.to_string(),
                args: args.iter().map(|a| Value::from_token(a)).collect(),
            }),
            _ => Err(InputError::PluginFormat),
        },
        ["save_history"] => Ok(Input::SaveHistory(None)),
        ["load_history"] => Ok(Input::LoadHistory(None)),
        ["view_history"] => Ok(Input::ViewHistory),
        ["clear_history"] => Ok(Input::ClearHistory),
        ["delete_history"] => Ok(Input::DeleteHistory),
        ["save_history_to_csv", rest @ ..] => match rest {
            [file] => Ok(Input::SaveHistory(Some(PathBuf::from(file)))),
            _ => Err(InputError::SaveFormat),
        },
        ["load_history_from_csv", rest @ ..] => match rest {
            [file] => Ok(Input::LoadHistory(Some(PathBuf::from(file)))),
            _ => Err(InputError::LoadFormat),
        },
        [op, a, b] => {
            let operation: Operation = op.parse().map_err(|_| InputError::InvalidOperation)?;
            let (num1, num2) = match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(num1), Ok(num2)) => (num1, num2),
                _ => return Err(InputError::InvalidNumbers),
            };
            Ok(Input::Calculate { operation, num1, num2 })
        }
        _ => Err(InputError::InvalidFormat),
    }
}
