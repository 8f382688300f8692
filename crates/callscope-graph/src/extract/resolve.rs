//! Best-effort textual resolution of call targets.
//!
//! Resolution is purely syntactic. A target either yields a bare or dotted
//! name or yields nothing; absence is common and never an error.

use callscope_syntax::ParseResult;
use tree_sitter::Node;

/// Resolves the target expression of a call (its `function` field) to a
/// textual callee name.
///
/// - `name(...)` resolves to `name`.
/// - `a.b.c(...)` resolves to `a.b.c`, base first.
/// - `factory()(...)` resolves to whatever `factory` resolves to.
/// - `(handler)(...)` resolves to `handler`.
/// - Subscripts, literals, lambdas and other forms resolve to nothing.
#[must_use]
pub fn resolve_callee(parsed: &ParseResult, target: Node<'_>) -> Option<String> {
    let mut current = target;
    loop {
        current = match current.kind() {
            "identifier" | "keyword_identifier" => return non_empty(parsed.node_text(current)),
            "attribute" => return resolve_attribute_chain(parsed, current),
            "call" => current.child_by_field_name("function")?,
            "parenthesized_expression" => unwrap_parentheses(current)?,
            _ => return None,
        };
    }
}

/// Walks an attribute chain from the outermost access inwards, collecting
/// attribute names, then appends the base when it is an identifier and
/// reverses so the result reads in source order.
fn resolve_attribute_chain(parsed: &ParseResult, outermost: Node<'_>) -> Option<String> {
    let mut parts: Vec<&str> = Vec::new();
    let mut current = outermost;

    loop {
        match current.kind() {
            "attribute" => {
                if let Some(name) = current.child_by_field_name("attribute") {
                    parts.push(parsed.node_text(name));
                }
                let Some(object) = current.child_by_field_name("object") else {
                    break;
                };
                current = object;
            }
            "parenthesized_expression" => match unwrap_parentheses(current) {
                Some(inner) => current = inner,
                None => break,
            },
            "identifier" | "keyword_identifier" => {
                parts.push(parsed.node_text(current));
                break;
            }
            _ => break,
        }
    }

    parts.retain(|part| !part.is_empty());
    parts.reverse();
    non_empty(&parts.join("."))
}

/// Returns the expression wrapped by a parenthesised expression, skipping
/// comments.
fn unwrap_parentheses(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let inner = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    inner
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_owned())
}
