//! Colon-command machinery
//!
//! ## command_line/ Invariants
//!
//! - Parsing never mutates state; execution is the only mutating step.
//! - Unknown and ambiguous names resolve to status-line errors, never
//!   panics.
//! - Abbreviated command and option names resolve through the same
//!   prefix/alias registry.

pub mod executor;
pub mod parser;
pub mod registry;
pub mod settings;
pub mod substitute;

pub use executor::{execute, execute_line, ExecutionResult};
pub use parser::{parse, ParsedCommand};
pub use registry::{NameMatch, NameRegistry};
pub use substitute::{Substitute, SubstituteRange};

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
