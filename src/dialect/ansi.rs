//! Reference ANSI SQL dialect.
//!
//! The conservative baseline: double-quoted identifiers, keyword booleans,
//! LIMIT/OFFSET pagination, no vendor extensions. Used as the default for
//! tests and as the fallback when no dialect is selected.

use super::SqlDialect;

#[derive(Debug, Clone, Copy)]
pub struct Ansi;

impl SqlDialect for Ansi {
    fn name(&self) -> &'static str {
        "ansi"
    }

    fn format_bool(&self, b: bool) -> &'static str {
        super::helpers::format_bool_keyword(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(Ansi.quote_identifier("users"), "\"users\"");
        assert_eq!(Ansi.format_bool(true), "TRUE");
        assert_eq!(Ansi.concat_operator(), "||");
        assert!(!Ansi.supports_distinct_on());
        assert!(!Ansi.supports_returning());
        assert_eq!(Ansi.remap_function("LENGTH"), None);
    }
}
