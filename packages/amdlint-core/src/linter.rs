//! Linter host: parse, traverse, dispatch, collect
//!
//! Owns the traversal the rules react to. Each file is parsed once, the
//! tree is walked in document order with a `TreeCursor`, and every visited
//! node is offered to the rules registered for its kind. Rules only append
//! diagnostics; two runs over the same source produce identical output.

use crate::error::Result;
use crate::rules::amd_function_arity::{AmdFunctionArity, ArityOptions};
use crate::rules::{RuleContext, RuleRegistry};
use crate::shared::Diagnostic;
use crate::syntax::parse_source;
use serde_json::json;
use std::path::Path;
use tracing::debug;

/// Output rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

/// Linter configuration
///
/// `rule_options` is the activation options list: index 0, when present,
/// is the rule's options object. Read once at construction, immutable for
/// the linter's lifetime.
#[derive(Debug, Clone, Default)]
pub struct LintConfig {
    pub rule_options: Vec<serde_json::Value>,
    pub format: OutputFormat,
}

/// Main linter instance
pub struct Linter {
    config: LintConfig,
    registry: RuleRegistry,
}

impl Linter {
    /// Build a linter, validating rule options eagerly
    pub fn new(config: LintConfig) -> Result<Self> {
        let options = ArityOptions::from_options(&config.rule_options)?;

        let mut registry = RuleRegistry::new();
        registry.register(Box::new(AmdFunctionArity::new(options)));

        Ok(Self { config, registry })
    }

    /// Lint source text, returning findings in document order
    pub fn lint_source(&self, source: &str, file: &str) -> Result<Vec<Diagnostic>> {
        let tree = parse_source(source)?;
        debug!(file, "parsed source");

        let mut diagnostics = Vec::new();
        let mut ctx = RuleContext::new(source, file, &mut diagnostics);

        // Depth-first document-order walk
        let mut cursor = tree.root_node().walk();
        'walk: loop {
            let node = cursor.node();
            for rule in self.registry.rules_for(node.kind()) {
                rule.check(&node, &mut ctx);
            }

            if cursor.goto_first_child() {
                continue;
            }
            loop {
                if cursor.goto_next_sibling() {
                    continue 'walk;
                }
                if !cursor.goto_parent() {
                    break 'walk;
                }
            }
        }

        debug!(file, count = diagnostics.len(), "lint finished");
        Ok(diagnostics)
    }

    /// Lint a file on disk
    pub fn lint_file(&self, path: &Path) -> Result<Vec<Diagnostic>> {
        let source = std::fs::read_to_string(path)?;
        let file = path.to_string_lossy();
        self.lint_source(&source, &file)
    }

    /// Render diagnostics in the configured output format
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        match self.config.format {
            OutputFormat::Human => {
                let mut output = String::new();
                for diag in diagnostics {
                    output.push_str(&diag.format_human());
                    output.push('\n');
                }
                output
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(&json!({ "diagnostics": diagnostics }))
                    .unwrap_or_default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lint(source: &str) -> Vec<Diagnostic> {
        let linter = Linter::new(LintConfig::default()).unwrap();
        linter.lint_source(source, "test.js").unwrap()
    }

    #[test]
    fn test_clean_source_has_no_findings() {
        let diags = lint("define([\"a\", \"b\"], function (a, b) {});");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_finding_carries_location() {
        let diags = lint("\ndefine([\"a\", \"b\"], function (x) {});");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].span.start_line, 2);
        assert_eq!(diags[0].file, "test.js");
    }

    #[test]
    fn test_nested_calls_are_visited() {
        let source = r#"
define(["a"], function (a) {
    require(["b", "c"], function (b) {});
});
"#;
        let diags = lint(source);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("require"));
    }

    #[test]
    fn test_lint_is_idempotent() {
        let source = "define([\"a\", \"b\", \"c\"], function (x) {});";
        let linter = Linter::new(LintConfig::default()).unwrap();
        let first = linter.lint_source(source, "test.js").unwrap();
        let second = linter.lint_source(source, "test.js").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_lint_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mod.js");
        std::fs::write(&path, "define([\"a\"], function () {});").unwrap();

        let linter = Linter::new(LintConfig::default()).unwrap();
        let diags = linter.lint_file(&path).unwrap();
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("Not enough parameters"));
    }

    #[test]
    fn test_lint_file_missing_path_is_io_error() {
        let linter = Linter::new(LintConfig::default()).unwrap();
        let err = linter.lint_file(Path::new("no/such/file.js")).unwrap_err();
        assert_eq!(err.kind, crate::error::ErrorKind::Io);
    }

    #[test]
    fn test_invalid_options_fail_at_construction() {
        let config = LintConfig {
            rule_options: vec![serde_json::json!({ "bogus": 1 })],
            format: OutputFormat::Human,
        };
        assert!(Linter::new(config).is_err());
    }

    #[test]
    fn test_human_render() {
        let linter = Linter::new(LintConfig::default()).unwrap();
        let diags = linter
            .lint_source("define([\"a\"], function (a, b) {});", "app.js")
            .unwrap();
        let output = linter.render(&diags);
        assert!(output.starts_with("app.js:1:0 warning [amd-function-arity]"));
        assert!(output.contains("Too many parameters"));
    }

    #[test]
    fn test_json_render() {
        let config = LintConfig {
            rule_options: Vec::new(),
            format: OutputFormat::Json,
        };
        let linter = Linter::new(config).unwrap();
        let diags = linter
            .lint_source("define([\"a\"], function (a, b) {});", "app.js")
            .unwrap();
        let output = linter.render(&diags);
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["diagnostics"].as_array().unwrap().len(), 1);
    }
}
