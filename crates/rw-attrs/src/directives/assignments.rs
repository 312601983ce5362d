//! Attribute assignment list parsing.
//!
//! Parses the `title="Hello" alt='Logo', width=560` syntax used by the
//! `attr`, `attrappend` and `attrprepend` directives. Assignments are
//! separated by whitespace or commas.

use crate::modifier::TargetValues;

/// Parse an assignment list into target values, in source order.
///
/// Malformed fragments (no `=`, empty name, unterminated quote) are skipped.
pub(crate) fn parse_assignments(input: &str) -> TargetValues {
    let mut targets = TargetValues::new();
    let mut remaining = input;

    loop {
        remaining = remaining.trim_start_matches(is_separator);
        if remaining.is_empty() {
            break;
        }

        if let Some((name, value, rest)) = parse_assignment(remaining) {
            targets.insert(name, Some(value.to_owned()));
            remaining = rest;
        } else {
            tracing::debug!(fragment = remaining, "Skipping malformed attribute assignment");
            // Skip to the next separator
            let end = remaining.find(is_separator).unwrap_or(remaining.len());
            remaining = &remaining[end..];
        }
    }

    targets
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

/// Parse one `name=value` pair from the start of `s`.
///
/// Returns the name, the value and the unparsed remainder. A quoted value must
/// be followed by a separator or the end of input.
fn parse_assignment(s: &str) -> Option<(&str, &str, &str)> {
    let (name, after_eq) = s.split_once('=')?;
    if name.is_empty() || name.contains(is_separator) {
        return None;
    }

    match after_eq.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            let (value, rest) = after_eq[1..].split_once(quote)?;
            (rest.is_empty() || rest.starts_with(is_separator)).then_some((name, value, rest))
        }
        _ => {
            let end = after_eq.find(is_separator).unwrap_or(after_eq.len());
            let (value, rest) = after_eq.split_at(end);
            Some((name, value, rest))
        }
    }
}
