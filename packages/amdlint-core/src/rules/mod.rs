//! Lint rules and rule dispatch
//!
//! Rules register the tree-sitter node kinds they want to see; the linter's
//! traversal asks the registry which rules to invoke at each visited node.
//! A rule reports findings through `RuleContext::report` and never fails:
//! shapes it does not recognize are silently skipped.

use crate::shared::{Diagnostic, Severity, Span};
use std::collections::HashMap;
use tree_sitter::Node;

pub mod amd_function_arity;

pub use amd_function_arity::AmdFunctionArity;

/// Per-file context handed to rules during traversal
///
/// Read-only view of the source plus a fire-and-forget diagnostic sink.
pub struct RuleContext<'a> {
    pub source: &'a str,
    pub file: &'a str,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl<'a> RuleContext<'a> {
    pub fn new(source: &'a str, file: &'a str, diagnostics: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            source,
            file,
            diagnostics,
        }
    }

    /// Report a finding against a node
    pub fn report(&mut self, rule: &'static str, node: &Node, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::new(
            rule,
            Severity::Warning,
            message,
            self.file,
            Span::from_node(node),
        ));
    }
}

/// A single lint rule
pub trait Rule {
    /// Stable rule identifier used in diagnostics
    fn name(&self) -> &'static str;

    /// Tree-sitter node kinds this rule wants to visit
    fn node_kinds(&self) -> &'static [&'static str];

    /// Inspect one node; zero or more `report` calls, no failures
    fn check(&self, node: &Node, ctx: &mut RuleContext<'_>);
}

/// Node-kind → rule dispatch table
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
    by_kind: HashMap<&'static str, Vec<usize>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, rule: Box<dyn Rule>) {
        let index = self.rules.len();
        for kind in rule.node_kinds() {
            self.by_kind.entry(kind).or_default().push(index);
        }
        self.rules.push(rule);
    }

    /// Rules registered for a node kind, in registration order
    pub fn rules_for<'a>(&'a self, kind: &str) -> impl Iterator<Item = &'a dyn Rule> + 'a {
        self.by_kind
            .get(kind)
            .map(|indices| indices.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|&i| self.rules[i].as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{node_kinds, parse_source};

    struct CountingRule;

    impl Rule for CountingRule {
        fn name(&self) -> &'static str {
            "counting-rule"
        }

        fn node_kinds(&self) -> &'static [&'static str] {
            &[node_kinds::CALL_EXPRESSION]
        }

        fn check(&self, node: &Node, ctx: &mut RuleContext<'_>) {
            ctx.report(self.name(), node, "saw a call");
        }
    }

    #[test]
    fn test_registry_dispatch_by_kind() {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(CountingRule));

        assert_eq!(registry.rules_for(node_kinds::CALL_EXPRESSION).count(), 1);
        assert_eq!(registry.rules_for(node_kinds::ARRAY).count(), 0);
    }

    #[test]
    fn test_context_report_collects_diagnostics() {
        let source = "foo();";
        let tree = parse_source(source).unwrap();
        let mut diagnostics = Vec::new();
        let mut ctx = RuleContext::new(source, "test.js", &mut diagnostics);

        let root = tree.root_node();
        ctx.report("counting-rule", &root, "message");

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].rule, "counting-rule");
        assert_eq!(diagnostics[0].file, "test.js");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }
}
