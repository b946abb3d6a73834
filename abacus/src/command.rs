//! Command objects
//!
//! Every user action becomes a command: construct it, execute it once,
//! print what it returns.

use crate::history::{HistoryError, RecordStore};
use abacus_core::{CalcError, Operation, Value};
use std::path::PathBuf;

pub trait Command {
    fn execute(&mut self) -> Value;
}

impl From<HistoryError> for CalcError {
    fn from(err: HistoryError) -> Self {
        CalcError::io(err.to_string())
    }
}

fn history_outcome(result: Result<String, HistoryError>) -> Value {
    match result {
        Ok(message) => Value::Text(message),
        Err(e) => Value::Error(e.into()),
    }
}

/// One arithmetic operation bound to its operands and the history it logs to.
///
/// A successful result is appended to the store. Division by zero returns
/// the sentinel error and records nothing.
pub struct ArithmeticCommand<'a> {
    store: &'a mut RecordStore,
    operation: Operation,
    num1: f64,
    num2: f64,
    result: Option<Value>,
}

impl<'a> ArithmeticCommand<'a> {
    pub fn new(store: &'a mut RecordStore, operation: Operation, num1: f64, num2: f64) -> Self {
        Self { store, operation, num1, num2, result: None }
    }

    pub fn add(store: &'a mut RecordStore, num1: f64, num2: f64) -> Self {
        Self::new(store, Operation::Add, num1, num2)
    }

    pub fn subtract(store: &'a mut RecordStore, num1: f64, num2: f64) -> Self {
        Self::new(store, Operation::Subtract, num1, num2)
    }

    pub fn multiply(store: &'a mut RecordStore, num1: f64, num2: f64) -> Self {
        Self::new(store, Operation::Multiply, num1, num2)
    }

    pub fn divide(store: &'a mut RecordStore, num1: f64, num2: f64) -> Self {
        Self::new(store, Operation::Divide, num1, num2)
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Result of the last `execute`, if any
    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }
}

impl Command for ArithmeticCommand<'_> {
    fn execute(&mut self) -> Value {
        let value = match self.operation.apply(self.num1, self.num2) {
            Ok(result) => {
                self.store.add_record(self.operation, self.num1, self.num2, result.into());
                Value::Number(result)
            }
            Err(e) => Value::Error(e),
        };
        self.result = Some(value.clone());
        value
    }
}

pub struct SaveHistoryCommand<'a> {
    store: &'a RecordStore,
    path: PathBuf,
}

impl<'a> SaveHistoryCommand<'a> {
    pub fn new(store: &'a RecordStore, path: impl Into<PathBuf>) -> Self {
        Self { store, path: path.into() }
    }
}

impl Command for SaveHistoryCommand<'_> {
    fn execute(&mut self) -> Value {
        history_outcome(self.store.save(&self.path))
    }
}

pub struct LoadHistoryCommand<'a> {
    store: &'a mut RecordStore,
    path: PathBuf,
}

impl<'a> LoadHistoryCommand<'a> {
    pub fn new(store: &'a mut RecordStore, path: impl Into<PathBuf>) -> Self {
        Self { store, path: path.into() }
    }
}

impl Command for LoadHistoryCommand<'_> {
    fn execute(&mut self) -> Value {
        history_outcome(self.store.load(&self.path))
    }
}

pub struct ViewHistoryCommand<'a> {
    store: &'a RecordStore,
}

impl<'a> ViewHistoryCommand<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }
}

impl Command for ViewHistoryCommand<'_> {
    fn execute(&mut self) -> Value {
        Value::Text(self.store.view())
    }
}

pub struct ClearHistoryCommand<'a> {
    store: &'a mut RecordStore,
}

impl<'a> ClearHistoryCommand<'a> {
    pub fn new(store: &'a mut RecordStore) -> Self {
        Self { store }
    }
}

impl Command for ClearHistoryCommand<'_> {
    fn execute(&mut self) -> Value {
        Value::Text(self.store.clear())
    }
}

/// Clears memory and removes the persisted history file
pub struct DeleteHistoryCommand<'a> {
    store: &'a mut RecordStore,
    path: PathBuf,
}

impl<'a> DeleteHistoryCommand<'a> {
    pub fn new(store: &'a mut RecordStore, path: impl Into<PathBuf>) -> Self {
        Self { store, path: path.into() }
    }
}

impl Command for DeleteHistoryCommand<'_> {
    fn execute(&mut self) -> Value {
        history_outcome(self.store.delete(&self.path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{RecordResult, NO_DATA};
    use tempfile::TempDir;

    #[test]
    fn test_arithmetic_appends_one_record() {
        let cases = [
            (Operation::Add, 2.0, 3.0, 5.0),
            (Operation::Subtract, 5.0, 3.0, 2.0),
            (Operation::Multiply, 4.0, 2.0, 8.0),
            (Operation::Divide, 6.0, 2.0, 3.0),
        ];
        for (op, a, b, expected) in cases {
            let mut store = RecordStore::new();
            let mut cmd = ArithmeticCommand::new(&mut store, op, a, b);
            assert_eq!(cmd.execute(), Value::Number(expected));
            assert_eq!(cmd.result(), Some(&Value::Number(expected)));

            assert_eq!(store.len(), 1);
            let record = &store.records()[0];
            assert_eq!(record.operation, op);
            assert_eq!((record.num1, record.num2), (a, b));
            assert_eq!(record.result, RecordResult::Number(expected));
        }
    }

    #[test]
    fn test_divide_by_zero_records_nothing() {
        let mut store = RecordStore::new();
        let result = ArithmeticCommand::divide(&mut store, 5.0, 0.0).execute();
        assert_eq!(result.to_string(), "Error: Division by zero");
        assert!(store.is_empty());
    }

    #[test]
    fn test_constructors_pick_operation() {
        let mut store = RecordStore::new();
        let add = ArithmeticCommand::add(&mut store, 1.0, 1.0).operation();
        assert_eq!(add, Operation::Add);
        let subtract = ArithmeticCommand::subtract(&mut store, 1.0, 1.0).operation();
        assert_eq!(subtract, Operation::Subtract);
        let multiply = ArithmeticCommand::multiply(&mut store, 1.0, 1.0).operation();
        assert_eq!(multiply, Operation::Multiply);
    }

    #[test]
    fn test_history_commands() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let mut store = RecordStore::new();
        ArithmeticCommand::add(&mut store, 2.0, 3.0).execute();
        ArithmeticCommand::multiply(&mut store, 4.0, 5.0).execute();

        let saved = SaveHistoryCommand::new(&store, &path).execute();
        assert!(saved.to_string().contains("successfully"));

        let cleared = ClearHistoryCommand::new(&mut store).execute();
        assert!(cleared.to_string().contains("cleared"));
        assert_eq!(ViewHistoryCommand::new(&store).execute().to_string(), NO_DATA);

        let loaded = LoadHistoryCommand::new(&mut store, &path).execute();
        assert!(loaded.to_string().contains("successfully"));
        let view = ViewHistoryCommand::new(&store).execute().to_string();
        assert!(view.contains("add"));
        assert!(view.contains("multiply"));

        let deleted = DeleteHistoryCommand::new(&mut store, &path).execute();
        assert_eq!(deleted.to_string(), "History deleted");
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_file_operations() {
        let dir = TempDir::new().unwrap();
        let mut store = RecordStore::new();

        let missing = dir.path().join("nonexistent.csv");
        let result = LoadHistoryCommand::new(&mut store, missing).execute();
        assert!(result.is_error());
        assert!(result.to_string().contains("Error"));

        let unreachable = dir.path().join("invalid/path/file.csv");
        let result = SaveHistoryCommand::new(&store, unreachable).execute();
        assert!(result.is_error());
        assert!(result.to_string().contains("Error"));
    }
}
