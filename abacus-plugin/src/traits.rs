//! Plugin traits

use abacus_core::{CalcError, Value};
use std::sync::Arc;

/// Metadata about a command argument
#[derive(Debug, Clone)]
pub struct ArgMeta {
    pub name: &'static str,
    pub typ: &'static str,
    pub description: &'static str,
}

impl ArgMeta {
    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self { name, typ: "Number", description }
    }
}

/// Metadata for a plugin command
#[derive(Debug, Clone)]
pub struct CommandMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub args: &'static [ArgMeta],
    pub examples: &'static [&'static str],
}

impl CommandMeta {
    /// Invocation pattern, e.g. `power <base> <exponent>`
    pub fn usage(&self) -> String {
        self.args.iter().fold(self.name.to_string(), |mut out, arg| {
            out.push_str(" <");
            out.push_str(arg.name);
            out.push('>');
            out
        })
    }
}

/// Callable behind a plugin command.
///
/// Arguments arrive as the REPL parsed them: `Value::Number` when the token
/// was numeric, `Value::Text` otherwise. Converting and validating them is
/// the callable's job. `Ok` carries the result (an error-tagged value is
/// still `Ok`); `Err` means the call itself failed.
pub type CommandFn = Arc<dyn Fn(&[Value]) -> Result<Value, CalcError> + Send + Sync>;

/// One named, invocable plugin command
#[derive(Clone)]
pub struct PluginCommand {
    meta: CommandMeta,
    func: CommandFn,
}

impl PluginCommand {
    pub fn new<F>(meta: CommandMeta, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CalcError> + Send + Sync + 'static,
    {
        Self { meta, func: Arc::new(func) }
    }

    pub fn name(&self) -> &'static str {
        self.meta.name
    }

    pub fn meta(&self) -> &CommandMeta {
        &self.meta
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, CalcError> {
        (self.func)(args)
    }
}

impl std::fmt::Debug for PluginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCommand").field("meta", &self.meta).finish_non_exhaustive()
    }
}

/// Command-name → callable mapping exposed by a plugin.
///
/// Names are matched exactly (case-sensitive). Iteration follows insertion
/// order; inserting an existing name replaces the callable in place.
#[derive(Debug, Clone, Default)]
pub struct CommandTable {
    commands: Vec<PluginCommand>,
}

impl CommandTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_command<F>(mut self, meta: CommandMeta, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, CalcError> + Send + Sync + 'static,
    {
        self.insert(PluginCommand::new(meta, func));
        self
    }

    pub fn insert(&mut self, command: PluginCommand) {
        match self.commands.iter_mut().find(|c| c.name() == command.name()) {
            Some(slot) => *slot = command,
            None => self.commands.push(command),
        }
    }

    pub fn get(&self, name: &str) -> Option<&PluginCommand> {
        self.commands.iter().find(|c| c.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.iter().map(|c| c.name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PluginCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// Extension supplying extra commands to the calculator
pub trait Plugin: Send + Sync {
    /// Registry key
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn commands(&self) -> CommandTable;
}

#[cfg(test)]
mod tests {
    use super::*;

    static NO_ARGS: [ArgMeta; 0] = [];
    static NO_EXAMPLES: [&str; 0] = [];

    fn meta(name: &'static str) -> CommandMeta {
        CommandMeta { name, description: "test", args: &NO_ARGS, examples: &NO_EXAMPLES }
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = CommandTable::new().with_command(meta("double"), |_| Ok(Value::Number(2.0)));
        assert!(table.get("double").is_some());
        assert!(table.get("Double").is_none());
        assert!(table.get("doubl").is_none());
    }

    #[test]
    fn test_reinsert_replaces_in_place() {
        let table = CommandTable::new()
            .with_command(meta("a"), |_| Ok(Value::Number(1.0)))
            .with_command(meta("b"), |_| Ok(Value::Number(2.0)))
            .with_command(meta("a"), |_| Ok(Value::Number(3.0)));
        assert_eq!(table.len(), 2);
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.get("a").unwrap().call(&[]), Ok(Value::Number(3.0)));
    }

    #[test]
    fn test_usage_lists_args_in_order() {
        static ARGS: [ArgMeta; 2] =
            [ArgMeta::number("base", "Base value"), ArgMeta::number("exponent", "Exponent")];
        let power_meta = CommandMeta { name: "power", description: "", args: &ARGS, examples: &[] };
        assert_eq!(power_meta.usage(), "power <base> <exponent>");
        assert_eq!(meta("pi").usage(), "pi");
    }

    #[test]
    fn test_empty_table() {
        let table = CommandTable::new();
        assert!(table.is_empty());
        assert_eq!(table.names().count(), 0);
    }
}
