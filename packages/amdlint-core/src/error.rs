//! Error types for amdlint-core

use std::fmt;
use thiserror::Error;

/// Host-level error kinds
///
/// Lint findings are never errors; they are `Diagnostic`s. This type only
/// covers failures of the host itself: unreadable input, an unusable
/// grammar, or rule options that fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Parser construction or parse failure
    Parse,
    /// Rule option validation errors
    Config,
    /// I/O errors
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Linter host error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct LintError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl LintError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }
}

impl From<std::io::Error> for LintError {
    fn from(err: std::io::Error) -> Self {
        LintError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

impl From<serde_json::Error> for LintError {
    fn from(err: serde_json::Error) -> Self {
        LintError::config(format!("JSON error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, LintError>;
