//! Shared models (Span, Severity, Diagnostic)

pub mod models;

pub use models::{Diagnostic, Severity, Span};
