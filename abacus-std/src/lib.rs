//! Abacus Standard Plugins

mod helpers;
pub mod scientific;

pub use scientific::Scientific;

use abacus_plugin::PluginRegistry;

/// Load the standard plugins into registry
pub fn load_standard_plugins(registry: PluginRegistry) -> PluginRegistry {
    registry.with_plugin(Scientific)
}

/// Create registry with the standard plugins
pub fn standard_registry() -> PluginRegistry {
    load_standard_plugins(PluginRegistry::new())
}
