//! Documentation summaries and the statement-count size hint.

use std::str::Chars;

use callscope_syntax::ParseResult;
use tree_sitter::Node;

/// Longest documentation summary kept, in characters.
pub const SUMMARY_LIMIT: usize = 200;

/// Extracts the first line of a body's docstring, bounded to
/// [`SUMMARY_LIMIT`] characters. Returns an empty string when the body has
/// no docstring.
///
/// A docstring is a first statement consisting solely of a plain string
/// literal, or of implicitly concatenated plain literals. F-strings and byte
/// strings do not count.
#[must_use]
pub fn doc_summary(parsed: &ParseResult, body: Node<'_>) -> String {
    let Some(literal) = docstring_literal(body) else {
        return String::new();
    };
    let Some(text) = literal_value(parsed, literal) else {
        return String::new();
    };

    text.trim()
        .lines()
        .next()
        .map(|line| line.trim_end().chars().take(SUMMARY_LIMIT).collect())
        .unwrap_or_default()
}

/// Counts the direct statements of a body, leaving out `pass`, comments,
/// and bare expression statements (docstrings, `...`, calls whose result is
/// discarded).
///
/// This is a rough structural proxy. It says nothing about branching and
/// must not be read as a complexity metric.
#[must_use]
pub fn size_hint(body: Node<'_>) -> usize {
    let mut cursor = body.walk();
    body.named_children(&mut cursor)
        .filter(|statement| counts_towards_size(*statement))
        .count()
}

fn counts_towards_size(statement: Node<'_>) -> bool {
    match statement.kind() {
        "comment" | "pass_statement" => false,
        "expression_statement" => is_assignment_statement(statement),
        _ => true,
    }
}

/// Assignments are parsed as expression statements but are statements in
/// their own right.
fn is_assignment_statement(statement: Node<'_>) -> bool {
    let mut cursor = statement.walk();
    statement
        .named_children(&mut cursor)
        .any(|child| matches!(child.kind(), "assignment" | "augmented_assignment"))
}

fn docstring_literal(body: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = body.walk();
    let first = body
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment")?;
    if first.kind() != "expression_statement" || first.named_child_count() != 1 {
        return None;
    }
    first
        .named_child(0)
        .filter(|child| matches!(child.kind(), "string" | "concatenated_string"))
}

fn literal_value(parsed: &ParseResult, literal: Node<'_>) -> Option<String> {
    if literal.kind() == "string" {
        return string_value(parsed.node_text(literal));
    }
    let mut cursor = literal.walk();
    let parts = literal
        .named_children(&mut cursor)
        .filter(|part| part.kind() == "string")
        .map(|part| string_value(parsed.node_text(part)))
        .collect::<Option<Vec<_>>>()?;
    Some(parts.concat())
}

/// Strips the prefix and quotes from a string literal and decodes simple
/// escapes. Returns `None` for f-strings, byte strings, and anything that
/// does not look like a well-formed literal.
fn string_value(literal: &str) -> Option<String> {
    let quote_start = literal.find(['"', '\''])?;
    let (raw_prefix, quoted) = literal.split_at(quote_start);
    let prefix = raw_prefix.to_ascii_lowercase();
    if prefix.contains(['f', 'b', 't']) {
        return None;
    }

    let delimiter = ["\"\"\"", "'''", "\"", "'"]
        .into_iter()
        .find(|candidate| quoted.starts_with(candidate))?;
    let inner = quoted
        .strip_prefix(delimiter)?
        .strip_suffix(delimiter)?;

    if prefix.contains('r') {
        Some(inner.to_owned())
    } else {
        Some(unescape(inner))
    }
}

fn unescape(text: &str) -> String {
    let mut decoded = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            decoded.push(ch);
            continue;
        }
        let Some(escape) = chars.next() else {
            decoded.push('\\');
            break;
        };
        let simple = match escape {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'a' => Some('\u{7}'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            'v' => Some('\u{b}'),
            '\\' | '\'' | '"' => Some(escape),
            'x' => read_code_point(&mut chars, 2, 16),
            'u' => read_code_point(&mut chars, 4, 16),
            'U' => read_code_point(&mut chars, 8, 16),
            '0'..='7' => Some(read_octal(escape, &mut chars)),
            _ => None,
        };
        match (simple, escape) {
            (Some(value), _) => decoded.push(value),
            (None, '\n') => {}
            (None, other) => {
                decoded.push('\\');
                decoded.push(other);
            }
        }
    }
    decoded
}

/// Reads exactly `digits` digits in `radix`. Leaves `chars` untouched and
/// returns `None` when fewer are available.
fn read_code_point(chars: &mut Chars<'_>, digits: usize, radix: u32) -> Option<char> {
    let mut lookahead = chars.clone();
    let mut value = 0_u32;
    for _ in 0..digits {
        let digit = lookahead.next()?.to_digit(radix)?;
        value = value.checked_mul(radix)?.checked_add(digit)?;
    }
    *chars = lookahead;
    Some(char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// Reads up to three octal digits, the first of which is already consumed.
fn read_octal(first: char, chars: &mut Chars<'_>) -> char {
    let mut value = first.to_digit(8).unwrap_or_default();
    for _ in 0..2 {
        let mut lookahead = chars.clone();
        let Some(digit) = lookahead.next().and_then(|next| next.to_digit(8)) else {
            break;
        };
        value = value * 8 + digit;
        *chars = lookahead;
    }
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}
