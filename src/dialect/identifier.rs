//! Identifier-shape quoting.
//!
//! Accepts the four identifier shapes that may surface in builder input and
//! quotes each appropriately:
//!
//! - bare names: `title` -> `"title"`
//! - dotted references: `posts.title` -> `"posts"."title"`, `posts.*` -> `"posts".*`
//! - function calls: `MIN(created)` -> `MIN("created")`
//! - aliases: `posts.title AS t` -> `"posts"."title" AS "t"`
//!
//! `*` passes through unchanged, as does anything that matches none of the
//! shapes (already-quoted text, literals, placeholders, arbitrary SQL).
//! Implemented as a small recursive-descent pass over the string rather
//! than layered regexes, so shape precedence is explicit.

use super::helpers::quote_with;

/// Quote an identifier expression with the given quote characters.
pub fn quote(ident: &str, start: char, end: char) -> String {
    let ident = ident.trim();

    if ident == "*" {
        return "*".into();
    }

    if is_bare(ident) {
        return quote_with(ident, start, end);
    }

    if let Some((expr, alias)) = split_alias(ident) {
        return format!(
            "{} AS {}",
            quote(expr, start, end),
            quote_with(alias, start, end)
        );
    }

    if let Some((name, args)) = split_call(ident) {
        let quoted_args = split_top_level_commas(args)
            .into_iter()
            .map(|arg| quote(arg, start, end))
            .collect::<Vec<_>>()
            .join(", ");
        return format!("{name}({quoted_args})");
    }

    if let Some(parts) = split_dotted(ident) {
        return parts
            .iter()
            .map(|part| {
                if *part == "*" {
                    "*".to_string()
                } else {
                    quote_with(part, start, end)
                }
            })
            .collect::<Vec<_>>()
            .join(".");
    }

    // None of the accepted shapes: already safe or arbitrary SQL.
    ident.to_string()
}

/// A bare identifier: word characters and hyphens, not starting with a
/// digit or quote.
fn is_bare(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Each dot-separated part must be bare (the last may be `*`).
fn split_dotted(s: &str) -> Option<Vec<&str>> {
    if !s.contains('.') {
        return None;
    }
    let parts: Vec<&str> = s.split('.').collect();
    let last = parts.len() - 1;
    for (i, part) in parts.iter().enumerate() {
        if i == last && *part == "*" {
            continue;
        }
        if !is_bare(part) {
            return None;
        }
    }
    Some(parts)
}

/// `NAME(args)` where NAME is bare and the parens balance around the whole
/// remainder.
fn split_call(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    if !s.ends_with(')') || open == 0 {
        return None;
    }
    let name = &s[..open];
    if !is_bare(name) {
        return None;
    }
    let args = &s[open + 1..s.len() - 1];
    // Parens must balance inside the argument list; otherwise the trailing
    // ')' does not close the one we found.
    let mut depth = 0i32;
    for c in args.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    (depth == 0).then_some((name, args))
}

/// `expr AS alias` with a bare alias; the separator must sit outside any
/// parentheses. Case-insensitive.
fn split_alias(s: &str) -> Option<(&str, &str)> {
    // ASCII-insensitive scan over the original bytes; uppercasing the
    // whole string can change its byte length (e.g. `ﬀ` -> `FF`) and
    // desync the slice offsets.
    let bytes = s.as_bytes();
    let mut depth = 0i32;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth -= 1,
            b' ' if depth == 0 && i + 4 <= bytes.len() => {
                if bytes[i..i + 4].eq_ignore_ascii_case(b" AS ") {
                    let expr = s[..i].trim();
                    let alias = s[i + 4..].trim();
                    if !expr.is_empty() && is_bare(alias) {
                        return Some((expr, alias));
                    }
                }
            }
            _ => {}
        }
    }
    None
}

/// Split on commas not nested inside parentheses.
fn split_top_level_commas(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut last = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(s[last..i].trim());
                last = i + 1;
            }
            _ => {}
        }
    }
    let tail = s[last..].trim();
    if !tail.is_empty() {
        parts.push(tail);
    }
    parts
}
