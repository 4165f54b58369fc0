//! amd-function-arity rule
//!
//! Ensures AMD-style `define`/`require` callbacks declare one parameter per
//! dependency path. A callback with more parameters than dependencies has
//! nothing to bind the extras to; a callback with fewer leaves dependencies
//! unused unless the configuration explicitly allows that.
//!
//! Options (index 0 of the activation options list):
//! - `allowExtraDependencies` (bool, default false): permit trailing
//!   dependencies without matching parameters, unconditionally.
//! - `allowedExtraDependencies` (array of unique strings): permit extras
//!   only when every trailing unmatched path is in this list. Consulted
//!   only while `allowExtraDependencies` is false.

use crate::error::{LintError, Result};
use crate::rules::{Rule, RuleContext};
use crate::syntax::amd::{
    callback_param_count, get_amd_callback, get_dependency_nodes, is_amd_define, is_define_call,
    is_require_call, require_has_callback,
};
use crate::syntax::{node_kinds, node_text, string_literal_value};
use serde::Deserialize;
use std::collections::HashSet;
use tree_sitter::Node;

pub const RULE_NAME: &str = "amd-function-arity";

/// Options for the amd-function-arity rule
///
/// Validated once at activation; immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase", default)]
pub struct ArityOptions {
    pub allow_extra_dependencies: bool,
    pub allowed_extra_dependencies: Vec<String>,
}

impl ArityOptions {
    /// Build options from the activation context's options list
    ///
    /// Index 0, when present, must be the options object; unknown fields
    /// and duplicate allow-list entries are config errors.
    pub fn from_options(options: &[serde_json::Value]) -> Result<Self> {
        let parsed = match options.first() {
            Some(value) => serde_json::from_value::<ArityOptions>(value.clone())
                .map_err(|e| LintError::config(format!("invalid {} options: {}", RULE_NAME, e)))?,
            None => ArityOptions::default(),
        };

        let mut seen = HashSet::new();
        for path in &parsed.allowed_extra_dependencies {
            if !seen.insert(path.as_str()) {
                return Err(LintError::config(format!(
                    "duplicate allowedExtraDependencies entry: {:?}",
                    path
                )));
            }
        }

        Ok(parsed)
    }
}

fn too_many_params_message(function_name: &str, expected: usize, actual: usize) -> String {
    format!(
        "Too many parameters in {} callback (expected {}, found {}).",
        function_name, expected, actual
    )
}

fn too_few_params_message(function_name: &str, expected: usize, actual: usize) -> String {
    format!(
        "Not enough parameters in {} callback (expected {}, found {}).",
        function_name, expected, actual
    )
}

/// Trailing dependency paths with no matching callback parameter
///
/// Walks from the end of the list backward; order is irrelevant downstream
/// since only allow-list membership is checked. A non-string element
/// contributes its raw source text, which can never match an allowed path.
fn extra_paths(dependency_nodes: &[Node], param_count: usize, source: &str) -> Vec<String> {
    let extra_qty = dependency_nodes.len() - param_count;
    dependency_nodes
        .iter()
        .rev()
        .take(extra_qty)
        .map(|node| {
            string_literal_value(node, source)
                .unwrap_or_else(|| node_text(node, source).to_string())
        })
        .collect()
}

/// The arity checker rule
#[derive(Debug, Default)]
pub struct AmdFunctionArity {
    options: ArityOptions,
}

impl AmdFunctionArity {
    pub fn new(options: ArityOptions) -> Self {
        Self { options }
    }

    fn check_arity(&self, node: &Node, function_name: &str, ctx: &mut RuleContext<'_>) {
        let Some(dependency_nodes) = get_dependency_nodes(node, ctx.source) else {
            return;
        };
        let Some(callback) = get_amd_callback(node) else {
            return;
        };

        let dependency_count = dependency_nodes.len();
        let actual_param_count = callback_param_count(&callback);

        if dependency_count < actual_param_count {
            ctx.report(
                RULE_NAME,
                node,
                too_many_params_message(function_name, dependency_count, actual_param_count),
            );
        } else if dependency_count > actual_param_count
            && !self.options.allowed_extra_dependencies.is_empty()
            && !self.options.allow_extra_dependencies
        {
            let extras = extra_paths(&dependency_nodes, actual_param_count, ctx.source);
            let all_allowed = extras
                .iter()
                .all(|path| self.options.allowed_extra_dependencies.contains(path));
            if !all_allowed {
                ctx.report(
                    RULE_NAME,
                    node,
                    too_few_params_message(function_name, dependency_count, actual_param_count),
                );
            }
        } else if dependency_count > actual_param_count && !self.options.allow_extra_dependencies {
            ctx.report(
                RULE_NAME,
                node,
                too_few_params_message(function_name, dependency_count, actual_param_count),
            );
        }
    }
}

impl Rule for AmdFunctionArity {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn node_kinds(&self) -> &'static [&'static str] {
        &[node_kinds::CALL_EXPRESSION]
    }

    fn check(&self, node: &Node, ctx: &mut RuleContext<'_>) {
        let source = ctx.source;
        if is_define_call(node, source) && is_amd_define(node, source) {
            self.check_arity(node, "define", ctx);
        } else if is_require_call(node, source) && require_has_callback(node) {
            let callee = node
                .child_by_field_name("function")
                .map(|c| node_text(&c, source).to_string())
                .unwrap_or_default();
            self.check_arity(node, &callee, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_default_options() {
        let options = ArityOptions::from_options(&[]).unwrap();
        assert!(!options.allow_extra_dependencies);
        assert!(options.allowed_extra_dependencies.is_empty());
    }

    #[test]
    fn test_options_from_object() {
        let options = ArityOptions::from_options(&[json!({
            "allowExtraDependencies": true,
            "allowedExtraDependencies": ["a", "b"]
        })])
        .unwrap();
        assert!(options.allow_extra_dependencies);
        assert_eq!(options.allowed_extra_dependencies, vec!["a", "b"]);
    }

    #[test]
    fn test_unknown_option_rejected() {
        let err = ArityOptions::from_options(&[json!({ "allowExtras": true })]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn test_duplicate_allowed_paths_rejected() {
        let err = ArityOptions::from_options(&[json!({
            "allowedExtraDependencies": ["a", "a"]
        })])
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
        assert!(err.message.contains("duplicate"));
    }

    #[test]
    fn test_wrong_option_type_rejected() {
        let err =
            ArityOptions::from_options(&[json!({ "allowExtraDependencies": "yes" })]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Config);
    }

    #[test]
    fn test_message_templates() {
        assert_eq!(
            too_many_params_message("define", 2, 3),
            "Too many parameters in define callback (expected 2, found 3)."
        );
        assert_eq!(
            too_few_params_message("require", 3, 1),
            "Not enough parameters in require callback (expected 3, found 1)."
        );
    }

    #[test]
    fn test_extra_paths_are_trailing_in_reverse() {
        let source = "define([\"a\", \"b\", \"c\", \"d\"], function (a) {});";
        let tree = crate::syntax::parse_source(source).unwrap();

        fn first_call(node: Node<'_>) -> Option<Node<'_>> {
            if node.kind() == node_kinds::CALL_EXPRESSION {
                return Some(node);
            }
            for i in 0..node.child_count() {
                if let Some(found) = node.child(i).and_then(first_call) {
                    return Some(found);
                }
            }
            None
        }

        let call = first_call(tree.root_node()).unwrap();
        let deps = get_dependency_nodes(&call, source).unwrap();
        let extras = extra_paths(&deps, 1, source);
        assert_eq!(extras, vec!["d", "c", "b"]);
    }
}
