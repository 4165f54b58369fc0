//! AMD call-shape helpers
//!
//! Recognizes `define`/`require` loader invocations and extracts the pieces
//! the rules care about: the dependency-path array and the callback
//! function literal.
//!
//! Recognized AMD define shapes:
//! - `define([deps], callback)`
//! - `define("name", [deps], callback)`
//!
//! Everything else (object modules, computed dependency lists, simple
//! CommonJS-style `require("a")`) is not an AMD arity candidate; helpers
//! return `None`/`false` and rules skip silently.

use crate::syntax::{is_function_literal, is_string_literal, node_kinds, node_text};
use tree_sitter::Node;

/// Callee identifier of a call expression, if it is a bare identifier
fn callee_name<'a>(node: &Node, source: &'a str) -> Option<&'a str> {
    if node.kind() != node_kinds::CALL_EXPRESSION {
        return None;
    }
    let callee = node.child_by_field_name("function")?;
    if callee.kind() != node_kinds::IDENTIFIER {
        return None;
    }
    Some(node_text(&callee, source))
}

/// Ordered named argument nodes of a call expression
///
/// Comments are named "extra" nodes in the grammar and must not count as
/// arguments.
fn call_arguments<'tree>(node: &Node<'tree>) -> Vec<Node<'tree>> {
    let Some(args) = node.child_by_field_name("arguments") else {
        return Vec::new();
    };
    let mut cursor = args.walk();
    args.named_children(&mut cursor)
        .filter(|child| !child.is_extra())
        .collect()
}

/// Check whether a call invokes `define`
pub fn is_define_call(node: &Node, source: &str) -> bool {
    callee_name(node, source) == Some("define")
}

/// Check whether a call invokes `require` or `requirejs`
pub fn is_require_call(node: &Node, source: &str) -> bool {
    matches!(callee_name(node, source), Some("require") | Some("requirejs"))
}

/// Check whether a define call has an AMD shape
///
/// `(array, function)` or `(name-string, array, function)`.
pub fn is_amd_define(node: &Node, source: &str) -> bool {
    if !is_define_call(node, source) {
        return false;
    }
    let args = call_arguments(node);
    match args.as_slice() {
        [deps, callback] => {
            deps.kind() == node_kinds::ARRAY && is_function_literal(callback.kind())
        }
        [name, deps, callback] => {
            is_string_literal(name.kind())
                && deps.kind() == node_kinds::ARRAY
                && is_function_literal(callback.kind())
        }
        _ => false,
    }
}

/// Dependency-path nodes of a loader call, in source order
///
/// `None` when the dependency list is absent or written in an unsupported
/// form; callers treat that as "rule does not apply here".
pub fn get_dependency_nodes<'tree>(node: &Node<'tree>, source: &str) -> Option<Vec<Node<'tree>>> {
    let args = call_arguments(node);
    let deps = if is_define_call(node, source) {
        // Dependency array sits at index 0, or index 1 for named defines
        match args.as_slice() {
            [first, ..] if first.kind() == node_kinds::ARRAY => *first,
            [first, second, ..]
                if is_string_literal(first.kind()) && second.kind() == node_kinds::ARRAY =>
            {
                *second
            }
            _ => return None,
        }
    } else if is_require_call(node, source) {
        match args.first() {
            Some(first) if first.kind() == node_kinds::ARRAY => *first,
            _ => return None,
        }
    } else {
        return None;
    };

    let mut cursor = deps.walk();
    Some(
        deps.named_children(&mut cursor)
            .filter(|child| !child.is_extra())
            .collect(),
    )
}

/// The loader callback: the first function-literal argument
pub fn get_amd_callback<'tree>(node: &Node<'tree>) -> Option<Node<'tree>> {
    call_arguments(node)
        .into_iter()
        .find(|arg| is_function_literal(arg.kind()))
}

/// Whether a require call carries a callback at all
pub fn require_has_callback(node: &Node) -> bool {
    get_amd_callback(node).is_some()
}

/// Number of declared parameters of a callback function literal
pub fn callback_param_count(callback: &Node) -> usize {
    if let Some(params) = callback.child_by_field_name("parameters") {
        if params.kind() == node_kinds::FORMAL_PARAMETERS {
            let mut cursor = params.walk();
            return params
                .named_children(&mut cursor)
                .filter(|child| !child.is_extra())
                .count();
        }
    }
    // Arrow shorthand: `x => ...` carries a bare identifier parameter
    if callback.child_by_field_name("parameter").is_some() {
        return 1;
    }
    0
}
