//! Shared building blocks for dialect implementations.

use crate::token::{Token, TokenStream};

// =============================================================================
// Quoting
// =============================================================================

/// Quote an identifier with the given start/end characters, doubling any
/// embedded end-quote character.
pub fn quote_with(ident: &str, start: char, end: char) -> String {
    let escaped = ident.replace(end, &format!("{end}{end}"));
    format!("{start}{escaped}{end}")
}

/// Quote a string with single quotes (standard SQL).
pub fn quote_string_single(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Quote a string for T-SQL, adding the N prefix when the text needs the
/// Unicode literal form.
pub fn quote_string_unicode(s: &str) -> String {
    let escaped = s.replace('\'', "''");
    if s.is_ascii() {
        format!("'{escaped}'")
    } else {
        format!("N'{escaped}'")
    }
}

// =============================================================================
// Boolean formatting
// =============================================================================

/// TRUE/FALSE keywords. Used by: Ansi, Postgres, SQLite.
pub fn format_bool_keyword(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// 1/0 numerics. Used by: MySQL, T-SQL.
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Emit `LIMIT n OFFSET m`. Used by: Ansi, Postgres, MySQL, SQLite.
pub fn emit_limit_offset_standard(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();

    if let Some(lim) = limit {
        ts.push(Token::Limit)
            .space()
            .push(Token::LitInt(lim as i64));
    }

    if let Some(off) = offset {
        if limit.is_some() {
            ts.space();
        }
        ts.push(Token::Offset)
            .space()
            .push(Token::LitInt(off as i64));
    }

    ts
}

/// Emit `OFFSET m ROWS FETCH NEXT n ROWS ONLY`. Requires ORDER BY in T-SQL.
pub fn emit_limit_offset_tsql(limit: Option<u64>, offset: Option<u64>) -> TokenStream {
    let mut ts = TokenStream::new();

    let off = offset.unwrap_or(0);
    ts.push(Token::Offset)
        .space()
        .push(Token::LitInt(off as i64))
        .space()
        .push(Token::Rows);

    if let Some(lim) = limit {
        ts.space()
            .push(Token::Fetch)
            .space()
            .push(Token::Next)
            .space()
            .push(Token::LitInt(lim as i64))
            .space()
            .push(Token::Rows)
            .space()
            .push(Token::Only);
    }

    ts
}

// =============================================================================
// Function remapping
// =============================================================================

/// Remap functions for the Postgres dialect.
pub fn remap_function_postgres(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "STRFTIME" => Some("TO_CHAR"),
        "DATE_FORMAT" => Some("TO_CHAR"),
        "NVL" => Some("COALESCE"),
        "IFNULL" => Some("COALESCE"),
        "ISNULL" => Some("COALESCE"),
        "RAND" => Some("RANDOM"),
        _ => None,
    }
}

/// Remap functions for the MySQL dialect.
pub fn remap_function_mysql(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "STRFTIME" => Some("DATE_FORMAT"),
        "TO_CHAR" => Some("DATE_FORMAT"),
        "NVL" => Some("IFNULL"),
        "ISNULL" => Some("IFNULL"),
        "SUBSTR" => Some("SUBSTRING"),
        "RANDOM" => Some("RAND"),
        _ => None,
    }
}

/// Remap functions for the SQLite dialect.
pub fn remap_function_sqlite(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "TO_CHAR" => Some("STRFTIME"),
        "DATE_FORMAT" => Some("STRFTIME"),
        "NVL" => Some("COALESCE"),
        "ISNULL" => Some("IFNULL"),
        "NOW" => Some("DATETIME"),
        _ => None,
    }
}

/// Remap functions for the T-SQL dialect.
pub fn remap_function_tsql(name: &str) -> Option<&'static str> {
    match name.to_uppercase().as_str() {
        "LENGTH" => Some("LEN"),
        "SUBSTR" => Some("SUBSTRING"),
        "NOW" => Some("GETDATE"),
        "CURRENT_TIMESTAMP" => Some("GETDATE"),
        "NVL" => Some("ISNULL"),
        "IFNULL" => Some("ISNULL"),
        _ => None,
    }
}
