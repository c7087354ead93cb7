//! Centralized error handling for Strand
//! Defines common error types, severity levels, and error codes

use std::fmt;

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational message (not really an error)
    Info,
    /// Warning - something might be wrong but operation can continue
    Warning,
    /// Standard error - operation failed but editor can continue
    Error,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warning => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// Category of the error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed user input: unknown commands, bad patterns
    UserInput,
    /// File system or I/O errors
    Io,
    /// Command line parsing errors
    Parse,
    /// Configuration or settings errors
    Settings,
    /// Command execution errors
    Execution,
    /// Internal logic or invariant violations
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UserInput => write!(f, "UserInput"),
            Self::Io => write!(f, "IO"),
            Self::Parse => write!(f, "Parse"),
            Self::Settings => write!(f, "Settings"),
            Self::Execution => write!(f, "Execution"),
            Self::Internal => write!(f, "Internal"),
        }
    }
}

/// A structured error in Strand
///
/// Errors never terminate the editor; they surface as status-line messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrandError {
    /// How serious the error is
    pub severity: ErrorSeverity,
    /// What kind of error occurred
    pub kind: ErrorKind,
    /// Machine-readable error code (e.g., "FILE_NOT_FOUND")
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl StrandError {
    /// Create a new standard error (Severity: Error)
    pub fn new(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Error,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a new warning (Severity: Warning)
    pub fn warning(kind: ErrorKind, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: ErrorSeverity::Warning,
            kind,
            code: code.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a user-input error
    pub fn user_input(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UserInput, code, message)
    }

    /// Shorthand for an I/O error wrapping a std error
    pub fn io(code: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io, code, err.to_string())
    }

    /// Check if the message contains a substring (useful for tests)
    pub fn contains_msg(&self, sub: &str) -> bool {
        self.message.contains(sub)
    }
}

impl fmt::Display for StrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({}): {}",
            self.severity, self.kind, self.code, self.message
        )
    }
}

impl std::error::Error for StrandError {}
