//! Runtime configuration

use std::env;
use std::path::PathBuf;

/// File used by the bare `save_history` / `load_history` / `delete_history`
pub const DEFAULT_HISTORY_FILE: &str = "calculation_history.csv";
pub const DEFAULT_PROMPT: &str = "> ";

pub const HISTORY_FILE_ENV: &str = "ABACUS_HISTORY_FILE";
pub const LOG_FILE_ENV: &str = "ABACUS_LOG_FILE";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub history_path: PathBuf,
    /// Append logs here instead of stderr
    pub log_file: Option<PathBuf>,
    pub prompt: String,
}

impl Config {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(path) = get(HISTORY_FILE_ENV) {
            config.history_path = PathBuf::from(path);
        }
        config.log_file = get(LOG_FILE_ENV).map(PathBuf::from);
        config
    }

    pub fn with_history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            log_file: None,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.history_path, PathBuf::from("calculation_history.csv"));
        assert_eq!(config.log_file, None);
        assert_eq!(config.prompt, "> ");
    }

    #[test]
    fn test_from_lookup() {
        let config = Config::from_lookup(lookup(&[
            (HISTORY_FILE_ENV, "/tmp/h.csv"),
            (LOG_FILE_ENV, "calc.log"),
        ]));
        assert_eq!(config.history_path, PathBuf::from("/tmp/h.csv"));
        assert_eq!(config.log_file, Some(PathBuf::from("calc.log")));
    }

    #[test]
    fn test_empty_values_ignored() {
        let config = Config::from_lookup(lookup(&[(HISTORY_FILE_ENV, " "), (LOG_FILE_ENV, "")]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_builders() {
        let config = Config::default()
            .with_history_path("x.csv")
            .with_log_file("x.log")
            .with_prompt("calc> ");
        assert_eq!(config.history_path, PathBuf::from("x.csv"));
        assert_eq!(config.log_file, Some(PathBuf::from("x.log")));
        assert_eq!(config.prompt, "calc> ");
    }
}
