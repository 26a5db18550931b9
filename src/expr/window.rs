//! Window expressions: the OVER (...) clause.
//!
//! Frame offsets are stored unsigned, so a negative offset is
//! unrepresentable once a frame exists; the `Option<i64>` conveniences
//! (`rows`, `range`, `groups`) validate and reject negatives up front,
//! with `None` meaning UNBOUNDED.

use crate::binder::ValueBinder;
use crate::dialect::{Dialect, SqlDialect};
use crate::error::{Error, Result};
use crate::token::{Token, TokenStream};

use super::Expr;

/// ORDER BY expression within a window specification.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowOrderBy {
    pub expr: Expr,
    pub dir: Option<SortDir>,
    pub nulls: Option<NullsOrder>,
}

impl WindowOrderBy {
    pub fn new(expr: Expr) -> Self {
        Self {
            expr,
            dir: None,
            nulls: None,
        }
    }

    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            dir: Some(SortDir::Asc),
            nulls: None,
        }
    }

    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            dir: Some(SortDir::Desc),
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

/// NULLS ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

/// Frame type: ROWS, RANGE, or GROUPS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFrameKind {
    Rows,
    Range,
    /// Peer groups; not every engine accepts it, unsupported dialects fall
    /// back to ROWS.
    Groups,
}

/// Frame boundary specification.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowFrameBound {
    UnboundedPreceding,
    Preceding(u64),
    CurrentRow,
    Following(u64),
    UnboundedFollowing,
}

/// Rows excluded from the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameExclusion {
    CurrentRow,
    Group,
    Ties,
}

/// Window frame specification.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    pub kind: WindowFrameKind,
    pub start: WindowFrameBound,
    pub end: Option<WindowFrameBound>,
    pub exclusion: Option<FrameExclusion>,
}

impl WindowFrame {
    pub fn new(kind: WindowFrameKind, start: WindowFrameBound) -> Self {
        Self {
            kind,
            start,
            end: None,
            exclusion: None,
        }
    }

    pub fn between(kind: WindowFrameKind, start: WindowFrameBound, end: WindowFrameBound) -> Self {
        Self {
            kind,
            start,
            end: Some(end),
            exclusion: None,
        }
    }

    /// `ROWS BETWEEN start PRECEDING AND end FOLLOWING`, with `None`
    /// meaning UNBOUNDED. Negative offsets are invalid.
    pub fn rows(start: Option<i64>, end: Option<i64>) -> Result<Self> {
        Self::offsets(WindowFrameKind::Rows, start, end)
    }

    /// RANGE frame with the same offset rules as [`rows`](Self::rows).
    pub fn range(start: Option<i64>, end: Option<i64>) -> Result<Self> {
        Self::offsets(WindowFrameKind::Range, start, end)
    }

    /// GROUPS frame with the same offset rules as [`rows`](Self::rows).
    pub fn groups(start: Option<i64>, end: Option<i64>) -> Result<Self> {
        Self::offsets(WindowFrameKind::Groups, start, end)
    }

    fn offsets(kind: WindowFrameKind, start: Option<i64>, end: Option<i64>) -> Result<Self> {
        let start = match start {
            None => WindowFrameBound::UnboundedPreceding,
            Some(0) => WindowFrameBound::CurrentRow,
            Some(n) if n > 0 => WindowFrameBound::Preceding(n as u64),
            Some(n) => {
                return Err(Error::InvalidArgument(format!(
                    "frame offset must be a non-negative integer, got {n}"
                )))
            }
        };
        let end = match end {
            None => WindowFrameBound::UnboundedFollowing,
            Some(0) => WindowFrameBound::CurrentRow,
            Some(n) if n > 0 => WindowFrameBound::Following(n as u64),
            Some(n) => {
                return Err(Error::InvalidArgument(format!(
                    "frame offset must be a non-negative integer, got {n}"
                )))
            }
        };
        Ok(Self::between(kind, start, end))
    }

    /// ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW
    pub fn rows_to_current() -> Self {
        Self::between(
            WindowFrameKind::Rows,
            WindowFrameBound::UnboundedPreceding,
            WindowFrameBound::CurrentRow,
        )
    }

    pub fn exclude(mut self, exclusion: FrameExclusion) -> Self {
        self.exclusion = Some(exclusion);
        self
    }
}

/// The body of an OVER (...) clause.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverClause {
    pub partition_by: Vec<Expr>,
    pub order_by: Vec<WindowOrderBy>,
    pub frame: Option<WindowFrame>,
}

impl OverClause {
    pub fn to_tokens(&self, dialect: Dialect, binder: &mut ValueBinder) -> Result<TokenStream> {
        let mut ts = TokenStream::new();
        let mut need_space = false;

        if !self.partition_by.is_empty() {
            ts.push(Token::PartitionBy).space();
            for (i, expr) in self.partition_by.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&expr.to_tokens(dialect, binder)?);
            }
            need_space = true;
        }

        if !self.order_by.is_empty() {
            if need_space {
                ts.space();
            }
            ts.push(Token::OrderBy).space();
            for (i, ob) in self.order_by.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.append(&ob.expr.to_tokens(dialect, binder)?);
                if let Some(dir) = &ob.dir {
                    ts.space().push(match dir {
                        SortDir::Asc => Token::Asc,
                        SortDir::Desc => Token::Desc,
                    });
                }
                if let Some(nulls) = &ob.nulls {
                    if dialect.supports_nulls_ordering() {
                        ts.space().push(match nulls {
                            NullsOrder::First => Token::NullsFirst,
                            NullsOrder::Last => Token::NullsLast,
                        });
                    }
                }
            }
            need_space = true;
        }

        if let Some(frame) = &self.frame {
            if need_space {
                ts.space();
            }
            ts.push(match frame.kind {
                WindowFrameKind::Rows => Token::Rows,
                WindowFrameKind::Range => Token::Range,
                WindowFrameKind::Groups => {
                    if dialect.supports_groups_frame() {
                        Token::Groups
                    } else {
                        Token::Rows
                    }
                }
            });
            ts.space();

            if frame.end.is_some() {
                ts.push(Token::Between).space();
            }
            emit_frame_bound(&mut ts, &frame.start);
            if let Some(end) = &frame.end {
                ts.space().push(Token::And).space();
                emit_frame_bound(&mut ts, end);
            }

            if let Some(exclusion) = &frame.exclusion {
                if dialect.supports_window_exclusion() {
                    ts.space().push(Token::Exclude).space();
                    match exclusion {
                        FrameExclusion::CurrentRow => ts.push(Token::CurrentRow),
                        FrameExclusion::Group => ts.push(Token::Group),
                        FrameExclusion::Ties => ts.push(Token::Ties),
                    };
                }
            }
        }

        Ok(ts)
    }

    pub fn traverse(&self, f: &mut dyn FnMut(&Expr)) {
        for expr in &self.partition_by {
            expr.traverse(f);
        }
        for ob in &self.order_by {
            ob.expr.traverse(f);
        }
    }
}

fn emit_frame_bound(ts: &mut TokenStream, bound: &WindowFrameBound) {
    match bound {
        WindowFrameBound::UnboundedPreceding => {
            ts.push(Token::Unbounded).space().push(Token::Preceding);
        }
        WindowFrameBound::Preceding(n) => {
            ts.push(Token::LitInt(*n as i64))
                .space()
                .push(Token::Preceding);
        }
        WindowFrameBound::CurrentRow => {
            ts.push(Token::CurrentRow);
        }
        WindowFrameBound::Following(n) => {
            ts.push(Token::LitInt(*n as i64))
                .space()
                .push(Token::Following);
        }
        WindowFrameBound::UnboundedFollowing => {
            ts.push(Token::Unbounded).space().push(Token::Following);
        }
    }
}

// =============================================================================
// Window Builder
// =============================================================================

/// Builder for window function expressions.
#[derive(Debug, Clone)]
#[must_use = "WindowBuilder has no effect until build() is called"]
pub struct WindowBuilder {
    function: Expr,
    over: OverClause,
}

impl WindowBuilder {
    pub fn new(function: Expr) -> Self {
        Self {
            function,
            over: OverClause::default(),
        }
    }

    /// Add PARTITION BY expressions.
    pub fn partition_by(mut self, exprs: Vec<Expr>) -> Self {
        self.over.partition_by = exprs;
        self
    }

    /// Add ORDER BY expressions.
    pub fn order_by(mut self, exprs: Vec<WindowOrderBy>) -> Self {
        self.over.order_by = exprs;
        self
    }

    /// Set the window frame.
    pub fn frame(mut self, frame: WindowFrame) -> Self {
        self.over.frame = Some(frame);
        self
    }

    /// Build the window function expression.
    ///
    /// A frame without ORDER BY is rejected: the frame would be applied to
    /// an undefined row ordering.
    pub fn build(self) -> Result<Expr> {
        if self.over.frame.is_some() && self.over.order_by.is_empty() {
            return Err(Error::InvalidState(
                "window frame requires an order by clause".into(),
            ));
        }
        Ok(Expr::Window {
            function: Box::new(self.function),
            over: self.over,
        })
    }
}

/// Extension trait for adding an OVER clause to expressions.
pub trait WindowExt: Sized {
    /// Start building a window function with an OVER clause.
    fn over(self) -> WindowBuilder;
}

impl WindowExt for Expr {
    fn over(self) -> WindowBuilder {
        WindowBuilder::new(self)
    }
}
