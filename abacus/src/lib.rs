//! Abacus - Interactive calculator
//!
//! The `Calculator` owns one history store and one plugin registry and
//! turns each input line into a command. `Repl` drives it from any
//! line-oriented reader.

pub mod command;
pub mod config;
pub mod history;
pub mod input;
mod repl;

pub use command::{
    ArithmeticCommand, ClearHistoryCommand, Command, DeleteHistoryCommand, LoadHistoryCommand,
    SaveHistoryCommand, ViewHistoryCommand,
};
pub use config::Config;
pub use history::{HistoryError, OperationRecord, RecordResult, RecordStore};
pub use input::{Input, InputError};
pub use repl::{Repl, ReplState};

use abacus_core::Value;
use abacus_plugin::PluginRegistry;
use tracing::debug;

pub const BANNER: &str = "Simple Calculator REPL\n\
Type 'help' for available commands, 'menu' for plugins, 'exit' to quit";

pub const HELP: &str = "Available commands:\n  \
add|subtract|multiply|divide <number1> <number2>\n  \
view_history | clear_history | delete_history\n  \
save_history | load_history\n  \
save_history_to_csv <filename> | load_history_from_csv <filename>\n  \
menu\n  \
use_plugin <plugin> <command> [args...]\n  \
help\n  \
exit";

/// What the REPL should do after one line
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Keep reading after printing the message
    Continue(String),
    Exit,
}

/// Main calculator engine
pub struct Calculator {
    store: RecordStore,
    registry: PluginRegistry,
    config: Config,
}

impl Calculator {
    pub fn new(registry: PluginRegistry, config: Config) -> Self {
        Self {
            store: RecordStore::new(),
            registry,
            config,
        }
    }

    pub fn with_standard_plugins(config: Config) -> Self {
        Self::new(abacus_std::standard_registry(), config)
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn registry(&self) -> &PluginRegistry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Classify and run one input line
    pub fn dispatch(&mut self, line: &str) -> Step {
        let input = match input::parse(line) {
            Ok(input) => input,
            Err(e) => {
                debug!(line, error = %e, "rejected input");
                return Step::Continue(e.to_string());
            }
        };
        debug!(?input, "dispatching");

        let default_path = &self.config.history_path;
        let output = match input {
            Input::Exit => return Step::Exit,
            Input::Menu => self.registry.list(),
            Input::Help => HELP.to_string(),
            Input::Calculate { operation, num1, num2 } => {
                let mut command = ArithmeticCommand::new(&mut self.store, operation, num1, num2);
                result_line(command.execute())
            }
            Input::UsePlugin { plugin, command, args } => {
                result_line(self.registry.execute(&plugin, &command, &args))
            }
            Input::SaveHistory(path) => {
                let path = path.unwrap_or_else(|| default_path.clone());
                SaveHistoryCommand::new(&self.store, path).execute().to_string()
            }
            Input::LoadHistory(path) => {
                let path = path.unwrap_or_else(|| default_path.clone());
                LoadHistoryCommand::new(&mut self.store, path).execute().to_string()
            }
            Input::ViewHistory => ViewHistoryCommand::new(&self.store).execute().to_string(),
            Input::ClearHistory => ClearHistoryCommand::new(&mut self.store).execute().to_string(),
            Input::DeleteHistory => {
                let path = default_path.clone();
                DeleteHistoryCommand::new(&mut self.store, path).execute().to_string()
            }
        };
        Step::Continue(output)
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::with_standard_plugins(Config::default())
    }
}

/// Errors are printed bare; everything else as `Result: <value>`
fn result_line(value: Value) -> String {
    match value {
        Value::Error(e) => e.to_string(),
        other => format!("Result: {}", other),
    }
}
