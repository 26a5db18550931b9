//! MySQL dialect.
//!
//! Backtick identifiers, numeric booleans, and no `||` concat operator
//! (it parses as logical OR unless PIPES_AS_CONCAT is set, which we do not
//! assume); callers fall back to `CONCAT()`.

use super::{helpers, SqlDialect};

#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn start_quote(&self) -> char {
        '`'
    }

    fn end_quote(&self) -> char {
        '`'
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn supports_concat_operator(&self) -> bool {
        false
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        helpers::remap_function_mysql(name)
    }
}
