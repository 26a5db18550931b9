//! SQL tokens - the atomic units of SQL output.
//!
//! Tokens are dialect-agnostic; serialization is the only place dialect
//! quoting and formatting rules apply. Statement builders emit token
//! streams, never strings, so the exact output shape is controlled in one
//! place.

use crate::dialect::{Dialect, SqlDialect};

/// Every element that can appear in a compiled SQL statement.
///
/// Adding a variant forces every `serialize` match to handle it.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // === Keywords ===
    Select,
    From,
    Where,
    And,
    Or,
    Not,
    As,
    On,
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    GroupBy,
    Having,
    OrderBy,
    Asc,
    Desc,
    NullsFirst,
    NullsLast,
    Case,
    When,
    Then,
    Else,
    End,
    In,
    Between,
    Like,
    NotLike,
    IsNull,
    IsNotNull,
    Distinct,
    All,
    Union,
    With,
    Recursive,
    Collate,
    Interval,
    Limit,
    Offset,
    Fetch,
    Next,
    Only,

    // === Window keywords ===
    Over,
    PartitionBy,
    Rows,
    Range,
    Groups,
    Unbounded,
    Preceding,
    Following,
    CurrentRow,
    Exclude,
    Group,
    Ties,

    // === DML keywords ===
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Returning,

    // === Punctuation ===
    Comma,
    Dot,
    Star,
    LParen,
    RParen,

    // === Operators ===
    Eq,
    Ne,
    Lt,
    Gt,
    Lte,
    Gte,
    Plus,
    Minus,
    Mul,
    Div,
    Mod,
    Concat,

    // === Whitespace ===
    Space,

    // === Dynamic content ===
    /// Identifier emitted verbatim; quoting is an explicit rewrite, see
    /// [`TokenStream::quote_identifiers`].
    Ident(String),
    /// Bound parameter placeholder, already prefixed (`:c0`).
    Placeholder(String),
    /// Inline integer literal.
    LitInt(i64),
    /// Inline float literal.
    LitFloat(f64),
    /// Inline string literal.
    LitString(String),
    /// Inline boolean literal.
    LitBool(bool),
    /// Inline NULL.
    LitNull,
    /// Function name, uppercased and possibly remapped per dialect.
    FunctionName(String),

    // === Escape hatch ===
    /// Raw SQL passed through without escaping.
    ///
    /// # Security Warning
    ///
    /// **Never pass user input to this variant.** Raw SQL is not sanitized
    /// and can lead to SQL injection. For user-provided values, use
    /// [`Token::Placeholder`] with a bound value.
    Raw(String),
}

impl Token {
    /// Serialize this token to a string for the given dialect.
    pub fn serialize(&self, dialect: Dialect) -> String {
        match self {
            Token::Select => "SELECT".into(),
            Token::From => "FROM".into(),
            Token::Where => "WHERE".into(),
            Token::And => "AND".into(),
            Token::Or => "OR".into(),
            Token::Not => "NOT".into(),
            Token::As => "AS".into(),
            Token::On => "ON".into(),
            Token::Join => "JOIN".into(),
            Token::Inner => "INNER".into(),
            Token::Left => "LEFT".into(),
            Token::Right => "RIGHT".into(),
            Token::Full => "FULL".into(),
            Token::Outer => "OUTER".into(),
            Token::Cross => "CROSS".into(),
            Token::GroupBy => "GROUP BY".into(),
            Token::Having => "HAVING".into(),
            Token::OrderBy => "ORDER BY".into(),
            Token::Asc => "ASC".into(),
            Token::Desc => "DESC".into(),
            Token::NullsFirst => "NULLS FIRST".into(),
            Token::NullsLast => "NULLS LAST".into(),
            Token::Case => "CASE".into(),
            Token::When => "WHEN".into(),
            Token::Then => "THEN".into(),
            Token::Else => "ELSE".into(),
            Token::End => "END".into(),
            Token::In => "IN".into(),
            Token::Between => "BETWEEN".into(),
            Token::Like => "LIKE".into(),
            Token::NotLike => "NOT LIKE".into(),
            Token::IsNull => "IS NULL".into(),
            Token::IsNotNull => "IS NOT NULL".into(),
            Token::Distinct => "DISTINCT".into(),
            Token::All => "ALL".into(),
            Token::Union => "UNION".into(),
            Token::With => "WITH".into(),
            Token::Recursive => "RECURSIVE".into(),
            Token::Collate => "COLLATE".into(),
            Token::Interval => "INTERVAL".into(),
            Token::Limit => "LIMIT".into(),
            Token::Offset => "OFFSET".into(),
            Token::Fetch => "FETCH".into(),
            Token::Next => "NEXT".into(),
            Token::Only => "ONLY".into(),

            Token::Over => "OVER".into(),
            Token::PartitionBy => "PARTITION BY".into(),
            Token::Rows => "ROWS".into(),
            Token::Range => "RANGE".into(),
            Token::Groups => "GROUPS".into(),
            Token::Unbounded => "UNBOUNDED".into(),
            Token::Preceding => "PRECEDING".into(),
            Token::Following => "FOLLOWING".into(),
            Token::CurrentRow => "CURRENT ROW".into(),
            Token::Exclude => "EXCLUDE".into(),
            Token::Group => "GROUP".into(),
            Token::Ties => "TIES".into(),

            Token::Insert => "INSERT".into(),
            Token::Into => "INTO".into(),
            Token::Values => "VALUES".into(),
            Token::Update => "UPDATE".into(),
            Token::Set => "SET".into(),
            Token::Delete => "DELETE".into(),
            Token::Returning => "RETURNING".into(),

            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Star => "*".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),

            Token::Eq => "=".into(),
            Token::Ne => "!=".into(),
            Token::Lt => "<".into(),
            Token::Gt => ">".into(),
            Token::Lte => "<=".into(),
            Token::Gte => ">=".into(),
            Token::Plus => "+".into(),
            Token::Minus => "-".into(),
            Token::Mul => "*".into(),
            Token::Div => "/".into(),
            Token::Mod => "%".into(),
            Token::Concat => dialect.concat_operator().into(),

            Token::Space => " ".into(),

            Token::Ident(name) => name.clone(),
            Token::Placeholder(name) => name.clone(),
            Token::LitInt(n) => n.to_string(),
            Token::LitFloat(f) => {
                if f.is_nan() {
                    panic!("Cannot serialize NaN to SQL")
                }
                if f.is_infinite() {
                    panic!("Cannot serialize Infinity to SQL")
                }
                let mut buffer = ryu::Buffer::new();
                buffer.format(*f).to_string()
            }
            Token::LitString(s) => dialect.quote_string(s),
            Token::LitBool(b) => dialect.format_bool(*b).into(),
            Token::LitNull => "NULL".into(),

            Token::FunctionName(name) => match dialect.remap_function(name) {
                Some(remapped) => remapped.to_uppercase(),
                None => name.to_uppercase(),
            },

            Token::Raw(s) => s.clone(),
        }
    }
}

/// A stream of tokens that serializes to SQL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self { tokens: vec![] }
    }

    pub fn push(&mut self, token: Token) -> &mut Self {
        self.tokens.push(token);
        self
    }

    pub fn extend(&mut self, tokens: impl IntoIterator<Item = Token>) -> &mut Self {
        self.tokens.extend(tokens);
        self
    }

    pub fn append(&mut self, other: &TokenStream) -> &mut Self {
        self.tokens.extend(other.tokens.iter().cloned());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Serialize all tokens to a SQL string.
    pub fn serialize(&self, dialect: Dialect) -> String {
        self.tokens.iter().map(|t| t.serialize(dialect)).collect()
    }

    /// A copy of this stream with every [`Token::Ident`] run through the
    /// dialect's identifier-shape quoting.
    ///
    /// Quoting is opt-in, mirroring builders where identifiers surface
    /// unquoted by default.
    pub fn quote_identifiers(&self, dialect: Dialect) -> TokenStream {
        let tokens = self
            .tokens
            .iter()
            .map(|t| match t {
                Token::Ident(name) => Token::Raw(dialect.quote_sql_identifier(name)),
                other => other.clone(),
            })
            .collect();
        TokenStream { tokens }
    }

    // Convenience methods for common tokens
    pub fn space(&mut self) -> &mut Self {
        self.push(Token::Space)
    }
    pub fn comma(&mut self) -> &mut Self {
        self.push(Token::Comma)
    }
    pub fn lparen(&mut self) -> &mut Self {
        self.push(Token::LParen)
    }
    pub fn rparen(&mut self) -> &mut Self {
        self.push(Token::RParen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_serialize() {
        assert_eq!(Token::Select.serialize(Dialect::Postgres), "SELECT");
        assert_eq!(Token::GroupBy.serialize(Dialect::TSql), "GROUP BY");
        assert_eq!(Token::CurrentRow.serialize(Dialect::MySql), "CURRENT ROW");
    }

    #[test]
    fn test_ident_serializes_verbatim() {
        let tok = Token::Ident("posts.title".into());
        assert_eq!(tok.serialize(Dialect::Postgres), "posts.title");
        assert_eq!(tok.serialize(Dialect::MySql), "posts.title");
    }

    #[test]
    fn test_placeholder_serialize() {
        assert_eq!(Token::Placeholder(":c0".into()).serialize(Dialect::Ansi), ":c0");
    }

    #[test]
    fn test_quote_identifiers_rewrite() {
        let mut ts = TokenStream::new();
        ts.push(Token::Select)
            .space()
            .push(Token::Ident("posts.title".into()))
            .space()
            .push(Token::From)
            .space()
            .push(Token::Ident("posts".into()));

        let quoted = ts.quote_identifiers(Dialect::MySql);
        assert_eq!(
            quoted.serialize(Dialect::MySql),
            "SELECT `posts`.`title` FROM `posts`"
        );
        // the original stream is untouched
        assert_eq!(ts.serialize(Dialect::MySql), "SELECT posts.title FROM posts");
    }

    #[test]
    fn test_concat_dialect() {
        assert_eq!(Token::Concat.serialize(Dialect::Postgres), "||");
        assert_eq!(Token::Concat.serialize(Dialect::TSql), "+");
    }

    #[test]
    fn test_float_serialize() {
        assert_eq!(Token::LitFloat(3.14).serialize(Dialect::Ansi), "3.14");
        assert_eq!(Token::LitFloat(1.0).serialize(Dialect::Ansi), "1.0");
    }

    #[test]
    #[should_panic(expected = "Cannot serialize NaN")]
    fn test_float_nan_panics() {
        Token::LitFloat(f64::NAN).serialize(Dialect::Ansi);
    }

    #[test]
    #[should_panic(expected = "Cannot serialize Infinity")]
    fn test_float_infinity_panics() {
        Token::LitFloat(f64::INFINITY).serialize(Dialect::Ansi);
    }
}
