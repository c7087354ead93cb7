//! Setting descriptor types
//! Type definitions for declarative option configuration

use crate::options::Options;

/// Typed value after parsing and validation
/// Setters receive this, never raw strings
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(usize),
    /// String value
    Str(String),
}

/// Setting type definition for parsing and validation
#[derive(Debug, Clone)]
pub enum SettingKind {
    /// Boolean setting (bare name = on, `no` prefix = off, `inv` toggles)
    Boolean,
    /// Integer setting with optional min/max bounds
    Integer {
        min: Option<usize>,
        max: Option<usize>,
    },
    /// Free-form string setting
    Str,
}

/// Structured error for setting operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    /// Failed to parse the value
    ParseError(String),
    /// Value failed validation (out of range, wrong form)
    ValidationError(String),
    /// Unknown option name
    UnknownOption(String),
    /// Several options share the given prefix
    AmbiguousOption(String),
}

impl std::fmt::Display for SettingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            SettingError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
            SettingError::UnknownOption(name) => write!(f, "Unknown option: {name}"),
            SettingError::AmbiguousOption(name) => write!(f, "Ambiguous option: {name}"),
        }
    }
}

impl std::error::Error for SettingError {}

/// Setter function signature
///
/// Function pointers (not trait objects) for static dispatch. Receives a
/// parsed and validated `SettingValue`, never a raw string.
pub type SettingSetter = fn(&mut Options, SettingValue) -> Result<(), SettingError>;

/// Getter function signature, used for `inv` toggles and `:set opt?`
pub type SettingGetter = fn(&Options) -> SettingValue;

/// Setting descriptor
#[derive(Debug, Clone)]
pub struct SettingDescriptor {
    /// Canonical option name (e.g. "shiftwidth")
    pub name: &'static str,
    /// Short aliases (e.g. &["sw"])
    pub aliases: &'static [&'static str],
    /// Option type for parsing and validation
    pub kind: SettingKind,
    /// Setter function pointer
    pub set: SettingSetter,
    /// Getter function pointer
    pub get: SettingGetter,
}
