//! Abacus Plugin System
//!
//! Plugins extend the calculator with named commands beyond the four
//! built-in arithmetic operations. A plugin exposes a description and a
//! table of commands; the registry validates names and contains failures.

mod registry;
mod traits;

pub use registry::{PluginRegistry, RegisteredPlugin};
pub use traits::{ArgMeta, CommandFn, CommandMeta, CommandTable, Plugin, PluginCommand};

/// Re-export core types for plugin authors
pub mod prelude {
    pub use crate::{ArgMeta, CommandMeta, CommandTable, Plugin, PluginRegistry};
    pub use abacus_core::prelude::*;
}
