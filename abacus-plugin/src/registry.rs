//! Plugin Registry

use crate::{CommandMeta, CommandTable, Plugin};
use abacus_core::{CalcError, Value};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, warn};

/// A plugin as captured at registration time
#[derive(Debug, Clone)]
pub struct RegisteredPlugin {
    pub name: String,
    pub description: String,
    pub commands: CommandTable,
}

/// Central plugin registry.
///
/// Plugins are kept in registration order. Registering a name twice
/// replaces the earlier plugin but keeps its position.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: Vec<RegisteredPlugin>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn with_plugin<P: Plugin>(mut self, plugin: P) -> Self {
        self.register(plugin);
        self
    }

    pub fn register<P: Plugin>(&mut self, plugin: P) {
        let entry = RegisteredPlugin {
            name: plugin.name().to_string(),
            description: plugin.description().to_string(),
            commands: plugin.commands(),
        };
        info!(plugin = %entry.name, commands = entry.commands.len(), "registered plugin");

        match self.plugins.iter_mut().find(|p| p.name == entry.name) {
            Some(slot) => *slot = entry,
            None => self.plugins.push(entry),
        }
    }

    pub fn get(&self, name: &str) -> Option<&RegisteredPlugin> {
        self.plugins.iter().find(|p| p.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.iter().map(|p| p.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Human-readable listing of every plugin and its commands.
    ///
    /// Each plugin gets a one-line summary of its command names, followed
    /// by per-command usage, argument descriptions and the first example.
    pub fn list(&self) -> String {
        let mut out = String::from("Available Plugins:");
        if self.plugins.is_empty() {
            out.push_str("\n  (none)");
        }
        for plugin in &self.plugins {
            let commands: Vec<&str> = plugin.commands.names().collect();
            out.push_str(&format!("\n- {}: {}", plugin.name, plugin.description));
            out.push_str(&format!("\n  Commands: {}", commands.join(", ")));
            for command in plugin.commands.iter() {
                out.push_str(&command_help(command.meta()));
            }
        }
        out
    }

    /// Run `command` from `plugin`.
    ///
    /// Never fails: unknown names and anything the callable raises, panics
    /// included, come back as `Value::Error`.
    pub fn execute(&self, plugin: &str, command: &str, args: &[Value]) -> Value {
        let Some(entry) = self.get(plugin) else {
            warn!(plugin, "plugin not found");
            return Value::Error(CalcError::plugin_not_found(plugin));
        };
        let Some(cmd) = entry.commands.get(command) else {
            warn!(plugin, command, "plugin command not found");
            return Value::Error(CalcError::command_not_found(plugin, command));
        };

        debug!(plugin, command, args = args.len(), "executing plugin command");
        match panic::catch_unwind(AssertUnwindSafe(|| cmd.call(args))) {
            Ok(Ok(value)) => value,
            Ok(Err(err)) => {
                warn!(plugin, command, error = %err, "plugin command failed");
                Value::Error(CalcError::execution(err.message))
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(plugin, command, error = %message, "plugin command panicked");
                Value::Error(CalcError::execution(message))
            }
        }
    }
}

fn command_help(meta: &CommandMeta) -> String {
    let mut out = format!("\n    {}: {}", meta.usage(), meta.description);
    for arg in meta.args {
        out.push_str(&format!("\n      {} ({}): {}", arg.name, arg.typ, arg.description));
    }
    if let Some(example) = meta.examples.first() {
        out.push_str(&format!("\n      e.g. {}", example));
    }
    out
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "plugin panicked".to_string()
    }
}
