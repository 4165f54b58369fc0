/*
 * amdlint - AMD module-loader lint rules for JavaScript
 *
 * Architecture:
 * - shared/  : Common models (Span, Diagnostic)
 * - syntax/  : tree-sitter parsing + AMD call-shape helpers
 * - rules/   : Rule trait, registry, and the amd-function-arity rule
 * - linter   : host driver (traversal, dispatch, rendering)
 *
 * The rules are pure predicates over the syntax tree: the host owns
 * parsing and traversal, rules only report findings. Unrecognized call
 * shapes are skipped silently, never raised as errors.
 */

pub mod error;
pub mod linter;
pub mod rules;
pub mod shared;
pub mod syntax;

pub use error::{ErrorKind, LintError, Result};
pub use linter::{LintConfig, Linter, OutputFormat};
pub use rules::amd_function_arity::{AmdFunctionArity, ArityOptions};
pub use shared::{Diagnostic, Severity, Span};
