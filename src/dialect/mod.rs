//! SQL dialect definitions and formatting rules.
//!
//! Each dialect implements [`SqlDialect`] to handle its specific syntax:
//!
//! - Identifier quoting: `"` (ANSI/Postgres/SQLite), `` ` `` (MySQL), `[]` (T-SQL)
//! - Pagination: LIMIT/OFFSET vs OFFSET FETCH
//! - Boolean literals: true/false vs 1/0
//! - String concatenation: `||` vs `+` vs CONCAT()
//! - Savepoint SQL templates
//! - Feature probes the builders consult (`DISTINCT ON`, RETURNING,
//!   GROUPS frames, NULLS ordering, window frame exclusion)
//!
//! Identifier-shape quoting (`table.column`, `table.*`, `fn(args)`,
//! `expr AS alias`) lives in [`identifier`] and is shared by all dialects;
//! only the quote characters differ.

pub mod helpers;
pub mod identifier;

mod ansi;
mod mysql;
mod postgres;
mod sqlite;
mod tsql;

pub use ansi::Ansi;
pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;
pub use tsql::TSql;

use crate::token::TokenStream;

/// SQL dialect trait - defines how SQL constructs are rendered.
///
/// The default implementations follow ANSI SQL where possible.
pub trait SqlDialect: std::fmt::Debug {
    /// Dialect name for display/logging.
    fn name(&self) -> &'static str;

    // =========================================================================
    // Identifier and literal quoting
    // =========================================================================

    /// Opening quote character for identifiers.
    fn start_quote(&self) -> char {
        '"'
    }

    /// Closing quote character for identifiers.
    fn end_quote(&self) -> char {
        '"'
    }

    /// Quote a single plain identifier token (no dots, no SQL grammar).
    fn quote_identifier(&self, ident: &str) -> String {
        helpers::quote_with(ident, self.start_quote(), self.end_quote())
    }

    /// Quote an identifier expression, recognizing the accepted grammar
    /// shapes: bare names, dotted `table.column`, `table.*`, function calls
    /// `fn(args)`, and `expr AS alias`. `*` passes through unchanged.
    fn quote_sql_identifier(&self, ident: &str) -> String {
        identifier::quote(ident, self.start_quote(), self.end_quote())
    }

    /// Quote a string literal. All dialects use single quotes with `''`
    /// escaping; T-SQL overrides for Unicode.
    fn quote_string(&self, s: &str) -> String {
        helpers::quote_string_single(s)
    }

    /// Format a boolean literal.
    fn format_bool(&self, b: bool) -> &'static str;

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Emit LIMIT/OFFSET or the dialect's equivalent pagination clause.
    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        helpers::emit_limit_offset_standard(limit, offset)
    }

    /// Whether OFFSET/FETCH requires an ORDER BY clause (T-SQL).
    fn requires_order_by_for_offset(&self) -> bool {
        false
    }

    // =========================================================================
    // Operators
    // =========================================================================

    /// String concatenation operator.
    fn concat_operator(&self) -> &'static str {
        "||"
    }

    /// Whether this dialect supports the `||` concat operator at all.
    /// MySQL treats `||` as logical OR by default.
    fn supports_concat_operator(&self) -> bool {
        true
    }

    // =========================================================================
    // Savepoints
    // =========================================================================

    /// Whether savepoints are available at all.
    fn supports_savepoints(&self) -> bool {
        true
    }

    /// SQL to create a savepoint.
    fn savepoint_sql(&self, name: &str) -> String {
        format!("SAVEPOINT LEVEL{name}")
    }

    /// SQL to release a savepoint, or `None` when the dialect has no
    /// release statement (T-SQL).
    fn release_savepoint_sql(&self, name: &str) -> Option<String> {
        Some(format!("RELEASE SAVEPOINT LEVEL{name}"))
    }

    /// SQL to roll back to a savepoint.
    fn rollback_savepoint_sql(&self, name: &str) -> String {
        format!("ROLLBACK TO SAVEPOINT LEVEL{name}")
    }

    // =========================================================================
    // Feature probes
    // =========================================================================

    /// Whether recursive CTEs take the RECURSIVE keyword (T-SQL omits it).
    fn emit_recursive_keyword(&self) -> bool {
        true
    }

    /// Whether NULLS FIRST/LAST is accepted in ORDER BY.
    fn supports_nulls_ordering(&self) -> bool {
        true
    }

    /// Whether `DISTINCT ON (...)` is accepted.
    fn supports_distinct_on(&self) -> bool {
        false
    }

    /// Whether DML statements accept RETURNING.
    fn supports_returning(&self) -> bool {
        false
    }

    /// Whether window frames accept the GROUPS frame type.
    fn supports_groups_frame(&self) -> bool {
        false
    }

    /// Whether window frames accept EXCLUDE CURRENT ROW / GROUP / TIES.
    fn supports_window_exclusion(&self) -> bool {
        false
    }

    // =========================================================================
    // Function remapping
    // =========================================================================

    /// Remap a function name for this dialect (`LENGTH` -> `LEN` on T-SQL).
    /// Matched case-insensitively; `None` keeps the original.
    fn remap_function(&self, name: &str) -> Option<&'static str> {
        let _ = name;
        None
    }
}

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Reference ANSI dialect; the default for tests and examples.
    #[default]
    Ansi,
    Postgres,
    MySql,
    Sqlite,
    TSql,
}

impl Dialect {
    /// Get the dialect implementation.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::Ansi => &Ansi,
            Dialect::Postgres => &Postgres,
            Dialect::MySql => &MySql,
            Dialect::Sqlite => &Sqlite,
            Dialect::TSql => &TSql,
        }
    }
}

// Implement SqlDialect for the enum by delegating to the concrete types.
impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn start_quote(&self) -> char {
        self.dialect().start_quote()
    }

    fn end_quote(&self) -> char {
        self.dialect().end_quote()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        self.dialect().quote_identifier(ident)
    }

    fn quote_sql_identifier(&self, ident: &str) -> String {
        self.dialect().quote_sql_identifier(ident)
    }

    fn quote_string(&self, s: &str) -> String {
        self.dialect().quote_string(s)
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn emit_limit_offset(&self, limit: Option<u64>, offset: Option<u64>) -> TokenStream {
        self.dialect().emit_limit_offset(limit, offset)
    }

    fn requires_order_by_for_offset(&self) -> bool {
        self.dialect().requires_order_by_for_offset()
    }

    fn concat_operator(&self) -> &'static str {
        self.dialect().concat_operator()
    }

    fn supports_concat_operator(&self) -> bool {
        self.dialect().supports_concat_operator()
    }

    fn supports_savepoints(&self) -> bool {
        self.dialect().supports_savepoints()
    }

    fn savepoint_sql(&self, name: &str) -> String {
        self.dialect().savepoint_sql(name)
    }

    fn release_savepoint_sql(&self, name: &str) -> Option<String> {
        self.dialect().release_savepoint_sql(name)
    }

    fn rollback_savepoint_sql(&self, name: &str) -> String {
        self.dialect().rollback_savepoint_sql(name)
    }

    fn emit_recursive_keyword(&self) -> bool {
        self.dialect().emit_recursive_keyword()
    }

    fn supports_nulls_ordering(&self) -> bool {
        self.dialect().supports_nulls_ordering()
    }

    fn supports_distinct_on(&self) -> bool {
        self.dialect().supports_distinct_on()
    }

    fn supports_returning(&self) -> bool {
        self.dialect().supports_returning()
    }

    fn supports_groups_frame(&self) -> bool {
        self.dialect().supports_groups_frame()
    }

    fn supports_window_exclusion(&self) -> bool {
        self.dialect().supports_window_exclusion()
    }

    fn remap_function(&self, name: &str) -> Option<&'static str> {
        self.dialect().remap_function(name)
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dialect().name())
    }
}
