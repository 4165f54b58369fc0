//! Source location and diagnostic types
//!
//! These types represent positions in source code and lint findings.
//! Diagnostics are read-only views of a finding; nothing in the linter
//! mutates one after it is reported.

use serde::{Deserialize, Serialize};
use std::fmt;
use tree_sitter::Node;

/// Span in source code
///
/// Lines are 1-based, columns 0-based (tree-sitter convention shifted to
/// editor-friendly line numbers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Span {
    pub fn new(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Create a zero span (0:0-0:0)
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Span of a tree-sitter node
    pub fn from_node(node: &Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self::new(
            start.row as u32 + 1,
            start.column as u32,
            end.row as u32 + 1,
            end.column as u32,
        )
    }

}

impl Default for Span {
    fn default() -> Self {
        Self::zero()
    }
}

/// Severity of a lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A lint finding
///
/// One diagnostic per reported call site; findings are never host errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub file: String,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(
        rule: &'static str,
        severity: Severity,
        message: impl Into<String>,
        file: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            rule,
            severity,
            message: message.into(),
            file: file.into(),
            span,
        }
    }

    /// Format as human-readable output: `file:line:col severity [rule] message`
    pub fn format_human(&self) -> String {
        format!(
            "{}:{}:{} {} [{}] {}",
            self.file, self.span.start_line, self.span.start_col, self.severity, self.rule,
            self.message
        )
    }
}
