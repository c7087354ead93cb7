//! The `:set` option table
//!
//! Options are described declaratively: each [`descriptor::SettingDescriptor`]
//! names its type, aliases, and a setter/getter pair over [`crate::options::Options`].
//! Values are parsed and validated before any field mutates.

pub mod definitions;
pub mod descriptor;
pub mod registry;

pub use definitions::{create_settings_registry, SETTINGS};
pub use descriptor::{SettingDescriptor, SettingError, SettingKind, SettingValue};
pub use registry::SettingsRegistry;

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
