//! JavaScript parsing and tree-sitter node vocabulary
//!
//! The linter reads plain JavaScript through the TypeScript grammar
//! (a superset, so AMD-era `.js` sources parse unchanged).
//!
//! Design principles:
//! - No magic strings: all tree-sitter node kinds defined as constants
//! - Type safety: kind predicates instead of ad-hoc comparisons

use crate::error::{LintError, Result};
use tree_sitter::{Node, Parser, Tree};

pub mod amd;

/// Tree-sitter node kinds consumed by the linter
///
/// These constants match the exact node type names from the
/// tree-sitter-typescript grammar.
pub mod node_kinds {
    // Expressions
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const ARGUMENTS: &str = "arguments";
    pub const IDENTIFIER: &str = "identifier";
    pub const MEMBER_EXPRESSION: &str = "member_expression";

    // Literals
    pub const ARRAY: &str = "array";
    pub const STRING: &str = "string";
    pub const STRING_FRAGMENT: &str = "string_fragment";
    pub const ESCAPE_SEQUENCE: &str = "escape_sequence";

    // Function literals
    pub const FUNCTION_EXPRESSION: &str = "function_expression";
    // Older grammar revisions emit "function" for anonymous functions
    pub const FUNCTION: &str = "function";
    pub const ARROW_FUNCTION: &str = "arrow_function";

    // Parameters
    pub const FORMAL_PARAMETERS: &str = "formal_parameters";
}

/// Check if a node kind is a function literal (a loader callback candidate)
pub fn is_function_literal(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::FUNCTION_EXPRESSION | node_kinds::FUNCTION | node_kinds::ARROW_FUNCTION
    )
}

/// Check if a node kind is a string literal
pub fn is_string_literal(kind: &str) -> bool {
    kind == node_kinds::STRING
}

/// Parse JavaScript source into a syntax tree
pub fn parse_source(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::language_typescript())
        .map_err(|e| LintError::parse(format!("failed to load grammar: {}", e)))?;

    parser
        .parse(source, None)
        .ok_or_else(|| LintError::parse("parser returned no tree"))
}

/// Get node text
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Unquoted, cooked value of a string literal node
///
/// Concatenates fragments with decoded escape sequences, so `"bc"`
/// compares equal to a configured path `"bc"`. `""` has no fragments and
/// yields the empty string. Returns `None` for non-string nodes.
pub fn string_literal_value(node: &Node, source: &str) -> Option<String> {
    if !is_string_literal(node.kind()) {
        return None;
    }

    let mut value = String::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            node_kinds::STRING_FRAGMENT => value.push_str(node_text(&child, source)),
            node_kinds::ESCAPE_SEQUENCE => {
                let raw = node_text(&child, source);
                match decode_escape_sequence(raw) {
                    Some(decoded) => value.push_str(&decoded),
                    None => value.push_str(raw),
                }
            }
            _ => {}
        }
    }
    Some(value)
}

/// Decode one JavaScript escape sequence (`\n`, `\xNN`, `\uNNNN`, `\u{...}`)
///
/// `None` for sequences with no scalar value (lone surrogates, malformed
/// digits); callers keep the raw text in that case.
fn decode_escape_sequence(text: &str) -> Option<String> {
    let rest = text.strip_prefix('\\')?;
    let mut chars = rest.chars();
    let first = chars.next()?;

    let decoded = match first {
        'n' => '\n'.to_string(),
        'r' => '\r'.to_string(),
        't' => '\t'.to_string(),
        'b' => '\u{0008}'.to_string(),
        'f' => '\u{000C}'.to_string(),
        'v' => '\u{000B}'.to_string(),
        '0' => '\0'.to_string(),
        'x' | 'u' => {
            let digits = chars.as_str();
            let digits = digits
                .strip_prefix('{')
                .and_then(|d| d.strip_suffix('}'))
                .unwrap_or(digits);
            let code = u32::from_str_radix(digits, 16).ok()?;
            char::from_u32(code)?.to_string()
        }
        // Escaped line terminators contribute nothing to the value
        '\n' | '\r' | '\u{2028}' | '\u{2029}' => String::new(),
        other => other.to_string(),
    };
    Some(decoded)
}
