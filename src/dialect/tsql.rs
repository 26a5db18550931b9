//! SQL Server (T-SQL) dialect.
//!
//! The furthest from ANSI: bracket identifiers, `N'...'` Unicode string
//! literals, OFFSET/FETCH pagination that requires an ORDER BY, `+` for
//! concatenation, no RECURSIVE keyword on CTEs, and savepoints spelled
//! `SAVE TRANSACTION` with no release statement.

use super::{helpers, SqlDialect};
use crate::token::TokenStream;

#[derive(Debug, Clone, Copy)]
pub struct TSql;

impl SqlDialect for TSql {
    fn name(&self) -> &'static str {
        "tsql"
    }

    fn start_quote(&self) -> char {
        '['
    }

    fn end_quote(&self) -> char {
        ']'
    }

    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_unicode(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_tsql(limit, offset)
    }

    fn requires_order_by_for_offset(&self) -> bool {
        true
    }

    fn concat_operator(&self) -> &'static str {
        "+"
    }

    fn savepoint_sql(&self, name: &str) -> String {
        format!("SAVE TRANSACTION t{name}")
    }

    fn release_savepoint_sql(&self, _name: &str) -> Option<String> {
        None
    }

    fn rollback_savepoint_sql(&self, name: &str) -> String {
        format!("ROLLBACK TRANSACTION t{name}")
    }

    fn emit_recursive_keyword(&self) -> bool {
        false
    }

    fn supports_nulls_ordering(&self) -> bool {
        false
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        helpers::remap_function_tsql(name)
    }
}
