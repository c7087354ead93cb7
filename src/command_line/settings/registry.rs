//! Settings registry
//! Holds setting descriptors and executes `:set` forms against them

use crate::options::Options;

use super::super::registry::{NameMatch, NameRegistry};
use super::descriptor::{SettingDescriptor, SettingError, SettingKind, SettingValue};

/// Registry over the static setting descriptors
#[derive(Clone, Copy)]
pub struct SettingsRegistry {
    settings: &'static [SettingDescriptor],
}

impl SettingsRegistry {
    #[must_use]
    pub const fn new(descriptors: &'static [SettingDescriptor]) -> Self {
        SettingsRegistry {
            settings: descriptors,
        }
    }

    /// Name registry for option-name prefix matching
    #[must_use]
    pub fn name_registry(&self) -> NameRegistry {
        let mut registry = NameRegistry::new();
        for desc in self.settings {
            registry = registry.register(desc.name, desc.aliases);
        }
        registry
    }

    fn descriptor(&self, canonical: &str) -> Option<&'static SettingDescriptor> {
        self.settings.iter().find(|d| d.name == canonical)
    }

    /// Parse a raw value according to the option's type
    ///
    /// Numeric-looking values coerce to integers for integer options;
    /// everything else stays a string for string options.
    fn parse_value(kind: &SettingKind, value: &str) -> Result<SettingValue, SettingError> {
        match kind {
            SettingKind::Boolean => {
                let lower = value.to_lowercase();
                match lower.as_str() {
                    "true" | "1" | "on" | "yes" => Ok(SettingValue::Bool(true)),
                    "false" | "0" | "off" | "no" => Ok(SettingValue::Bool(false)),
                    _ => Err(SettingError::ParseError(format!(
                        "Invalid boolean value: {value}"
                    ))),
                }
            }
            SettingKind::Integer { min, max } => {
                let parsed = value.parse::<usize>().map_err(|_| {
                    SettingError::ParseError(format!("Invalid integer value: {value}"))
                })?;
                if let Some(lo) = min {
                    if parsed < *lo {
                        return Err(SettingError::ValidationError(format!(
                            "Value {parsed} is below minimum {lo}"
                        )));
                    }
                }
                if let Some(hi) = max {
                    if parsed > *hi {
                        return Err(SettingError::ValidationError(format!(
                            "Value {parsed} is above maximum {hi}"
                        )));
                    }
                }
                Ok(SettingValue::Integer(parsed))
            }
            SettingKind::Str => Ok(SettingValue::Str(value.to_string())),
        }
    }

    fn resolve(&self, name: &str) -> Result<&'static SettingDescriptor, SettingError> {
        match self.name_registry().resolve(name) {
            NameMatch::Exact(canonical) | NameMatch::Prefix(canonical) => self
                .descriptor(&canonical)
                .ok_or_else(|| SettingError::UnknownOption(name.to_string())),
            NameMatch::Ambiguous { prefix, .. } => Err(SettingError::AmbiguousOption(prefix)),
            NameMatch::Unknown(name) => Err(SettingError::UnknownOption(name)),
        }
    }

    /// Execute one `:set` argument
    ///
    /// Supported forms: `option=value`, `option value`, bare `option`
    /// (boolean on), `nooption` (boolean off), `invoption` (boolean
    /// toggle).
    pub fn execute(
        &self,
        options: &mut Options,
        name: &str,
        value: Option<&str>,
    ) -> Result<(), SettingError> {
        // Explicit value wins over prefixed boolean forms
        if let Some(raw) = value {
            let desc = self.resolve(name)?;
            let parsed = Self::parse_value(&desc.kind, raw)?;
            return (desc.set)(options, parsed);
        }

        // Bare boolean forms; `no`/`inv` prefixes only apply when the
        // remainder resolves to a boolean option
        if let Some(rest) = name.strip_prefix("no") {
            if let Ok(desc) = self.resolve(rest) {
                if matches!(desc.kind, SettingKind::Boolean) {
                    return (desc.set)(options, SettingValue::Bool(false));
                }
            }
        }
        if let Some(rest) = name.strip_prefix("inv") {
            if let Ok(desc) = self.resolve(rest) {
                if matches!(desc.kind, SettingKind::Boolean) {
                    let current = match (desc.get)(options) {
                        SettingValue::Bool(b) => b,
                        _ => false,
                    };
                    return (desc.set)(options, SettingValue::Bool(!current));
                }
            }
        }

        let desc = self.resolve(name)?;
        match desc.kind {
            SettingKind::Boolean => (desc.set)(options, SettingValue::Bool(true)),
            _ => Err(SettingError::ValidationError(format!(
                "Option requires a value: {}",
                desc.name
            ))),
        }
    }

    /// Current value rendered for `:set option?`
    pub fn show(&self, options: &Options, name: &str) -> Result<String, SettingError> {
        let desc = self.resolve(name)?;
        let rendered = match (desc.get)(options) {
            SettingValue::Bool(true) => desc.name.to_string(),
            SettingValue::Bool(false) => format!("no{}", desc.name),
            SettingValue::Integer(n) => format!("{}={n}", desc.name),
            SettingValue::Str(s) => format!("{}={s}", desc.name),
        };
        Ok(rendered)
    }
}
