//! Calculation history
//!
//! An append-only, in-memory table of operation records that can be saved
//! to and loaded from a CSV file with the header
//! `timestamp,operation,num1,num2,result`.

use abacus_core::Operation;
use chrono::{Local, NaiveDateTime, TimeDelta};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

/// Column names of the history file, in order
pub const HEADER: [&str; 5] = ["timestamp", "operation", "num1", "num2", "result"];

/// Returned by `view` when there is nothing to show
pub const NO_DATA: &str = "No data available";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const DIVISION_BY_ZERO_TAG: &str = "division by zero";

/// Errors from saving, loading or deleting history files
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Error saving data to {path}: {source}")]
    Save {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("Error loading data from {path}: file not found")]
    NotFound { path: String },

    #[error("Error loading data from {path}: malformed history file ({reason})")]
    Malformed { path: String, reason: String },

    #[error("Error loading data from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Error deleting history file {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Result column of a record: a number or the division-by-zero tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordResult {
    Number(f64),
    DivisionByZero,
}

impl From<f64> for RecordResult {
    fn from(n: f64) -> Self {
        RecordResult::Number(n)
    }
}

impl std::fmt::Display for RecordResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordResult::Number(n) => write!(f, "{}", n),
            RecordResult::DivisionByZero => f.write_str(DIVISION_BY_ZERO_TAG),
        }
    }
}

impl FromStr for RecordResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == DIVISION_BY_ZERO_TAG {
            return Ok(RecordResult::DivisionByZero);
        }
        s.parse::<f64>()
            .map(RecordResult::Number)
            .map_err(|_| format!("invalid result value '{}'", s))
    }
}

impl Serialize for RecordResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RecordResult::Number(n) => serializer.serialize_f64(*n),
            RecordResult::DivisionByZero => serializer.serialize_str(DIVISION_BY_ZERO_TAG),
        }
    }
}

impl<'de> Deserialize<'de> for RecordResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// One logged arithmetic operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub timestamp: String,
    pub operation: Operation,
    pub num1: f64,
    pub num2: f64,
    pub result: RecordResult,
}

/// Ordered history of operation records (duplicates allowed)
#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<OperationRecord>,
    last_stamp: Option<NaiveDateTime>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append a record stamped with the current local time
    pub fn add_record(&mut self, operation: Operation, num1: f64, num2: f64, result: RecordResult) {
        let timestamp = self.next_stamp();
        info!(%operation, num1, num2, result = %result, "added record to history");
        self.records.push(OperationRecord {
            timestamp: timestamp.format(TIMESTAMP_FORMAT).to_string(),
            operation,
            num1,
            num2,
            result,
        });
    }

    /// Wall-clock time, bumped past the previous stamp if the clock has not moved
    fn next_stamp(&mut self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        let stamp = match self.last_stamp {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    /// Write every record to `path`, replacing any existing file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<String, HistoryError> {
        let path = path.as_ref();
        if let Err(source) = self.write_csv(path) {
            warn!(path = %path.display(), error = %source, "failed to save history");
            return Err(HistoryError::Save { path: path.display().to_string(), source });
        }
        info!(path = %path.display(), records = self.records.len(), "history saved");
        Ok(format!("Data saved to {} successfully", path.display()))
    }

    fn write_csv(&self, path: &Path) -> Result<(), csv::Error> {
        let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
        writer.write_record(HEADER)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Replace the in-memory history with the contents of `path`.
    ///
    /// The file is parsed completely first; on any error the current
    /// records are left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<String, HistoryError> {
        let path = path.as_ref();
        let records = read_records(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "failed to load history");
        })?;
        info!(path = %path.display(), records = records.len(), "history loaded");
        self.records = records;
        Ok(format!("Data loaded from {} successfully", path.display()))
    }

    /// Table of all records in insertion order, or `NO_DATA`
    pub fn view(&self) -> String {
        if self.records.is_empty() {
            return NO_DATA.to_string();
        }

        let mut rows: Vec<[String; 6]> = Vec::with_capacity(self.records.len() + 1);
        rows.push([
            String::new(),
            HEADER[0].to_string(),
            HEADER[1].to_string(),
            HEADER[2].to_string(),
            HEADER[3].to_string(),
            HEADER[4].to_string(),
        ]);
        for (i, r) in self.records.iter().enumerate() {
            rows.push([
                i.to_string(),
                r.timestamp.clone(),
                r.operation.to_string(),
                r.num1.to_string(),
                r.num2.to_string(),
                r.result.to_string(),
            ]);
        }

        let mut widths = [0usize; 6];
        for row in &rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        rows.iter()
            .map(|row| {
                let cells: Vec<String> = row
                    .iter()
                    .zip(widths)
                    .enumerate()
                    .map(|(i, (cell, w))| {
                        // index column is right-aligned
                        if i == 0 {
                            format!("{:>w$}", cell)
                        } else {
                            format!("{:<w$}", cell)
                        }
                    })
                    .collect();
                cells.join("  ").trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Empty the history. Always succeeds.
    pub fn clear(&mut self) -> String {
        self.records.clear();
        info!("history cleared from memory");
        "Data cleared from memory".to_string()
    }

    /// Remove the persisted file at `path` if there is one, then clear memory.
    ///
    /// If the file cannot be removed the records stay in memory.
    pub fn delete(&mut self, path: impl AsRef<Path>) -> Result<String, HistoryError> {
        let path = path.as_ref();
        match fs::remove_file(path) {
            Ok(()) => info!(path = %path.display(), "history file deleted"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                warn!(path = %path.display(), error = %source, "failed to delete history file");
                return Err(HistoryError::Delete { path: path.display().to_string(), source });
            }
        }
        self.records.clear();
        Ok("History deleted".to_string())
    }
}

fn read_records(path: &Path) -> Result<Vec<OperationRecord>, HistoryError> {
    let display = path.display().to_string();
    let malformed = |reason: String| HistoryError::Malformed { path: display.clone(), reason };

    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => HistoryError::NotFound { path: display.clone() },
        _ => HistoryError::Read { path: display.clone(), source },
    })?;

    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);
    let headers = reader.headers().map_err(|e| csv_failure(&display, e, String::new()))?.clone();
    if !headers.iter().eq(HEADER) {
        return Err(malformed(format!(
            "expected header '{}', found '{}'",
            HEADER.join(","),
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    reader
        .deserialize::<OperationRecord>()
        .enumerate()
        .map(|(i, row)| row.map_err(|e| csv_failure(&display, e, format!("row {}: ", i + 1))))
        .collect()
}

/// I/O failures stay I/O failures; anything else the csv reader rejects is malformed content
fn csv_failure(path: &str, err: csv::Error, context: String) -> HistoryError {
    let reason = format!("{}{}", context, err);
    match err.into_kind() {
        csv::ErrorKind::Io(source) => HistoryError::Read { path: path.to_string(), source },
        _ => HistoryError::Malformed { path: path.to_string(), reason },
    }
}
