//! The expression tree consumed by the SQL generator.
//!
//! `Expr` is a closed set: the renderer matches it exhaustively, so a new
//! variant cannot be added without every consumer handling it. Trees are
//! built by an upstream query layer (or by hand in tests) and are never
//! mutated by the generator.

use crate::error::{ScribeError, ScribeResult};

/// One node in an expression tree.
#[derive(Clone, Debug)]
pub enum Expr {
    /// A column of a query source; `source` indexes the query's source
    /// list, 0 being the primary table.
    Column { source: usize, name: String },

    /// Every declared column of a source, in schema order.
    SourceAll(usize),

    /// An externally bound value: 0-based here, rendered as the 1-based
    /// `$n` placeholder.
    Bind(usize),

    /// Function application. A name found in the operator table with
    /// exactly two arguments renders infix; anything else renders as a
    /// plain call.
    Call { name: String, args: Vec<Expr> },

    /// Infix application with the operator already resolved.
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Membership test, rendered `left = ANY (right)`.
    In { left: Box<Expr>, right: Box<Expr> },

    /// NULL check: `expr IS NULL`.
    IsNull(Box<Expr>),

    /// Negation: `NOT (expr)`.
    Not(Box<Expr>),

    /// Array literal: `ARRAY[a, b, ...]`.
    Array(Vec<Expr>),

    /// Raw SQL text interleaved with embedded expressions. Escape hatch;
    /// the generator does not validate the text parts.
    Fragment(Vec<FragmentPart>),

    /// Binary data, rendered as a bytea literal.
    Bytes(bytes::Bytes),

    /// A uuid, rendered as a quoted hex literal.
    Uuid(uuid::Uuid),

    /// SQL NULL.
    Null,

    /// Boolean literal.
    Bool(bool),

    /// String literal; embedded single quotes are doubled on render.
    String(String),

    /// Integer literal.
    Int(i64),

    /// Float literal; rendered with an explicit float cast unless the
    /// query's options turn that off.
    Float(f64),
}

/// Infix operator tag carried by [`Expr::Binary`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Eq,
    Ne,
    Le,
    Ge,
    Lt,
    Gt,
    And,
    Or,
    ILike,
    Like,
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// The SQL token this operator renders as.
    pub const fn token(self) -> &'static str {
        match self {
            BinOp::Eq => "=",
            BinOp::Ne => "!=",
            BinOp::Le => "<=",
            BinOp::Ge => ">=",
            BinOp::Lt => "<",
            BinOp::Gt => ">",
            BinOp::And => "AND",
            BinOp::Or => "OR",
            BinOp::ILike => "ILIKE",
            BinOp::Like => "LIKE",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// One piece of an [`Expr::Fragment`].
#[derive(Clone, Debug)]
pub enum FragmentPart {
    /// Literal SQL text, emitted verbatim.
    Text(String),
    /// An embedded expression, compiled in place.
    Expr(Expr),
}

impl Expr {
    /// A column of source `source`.
    pub fn col(source: usize, name: impl Into<String>) -> Self {
        Expr::Column {
            source,
            name: name.into(),
        }
    }

    /// A function call: `name(args...)`.
    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// An infix application of `op`.
    pub fn binary(op: BinOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// `left = right`
    pub fn eq(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Eq, left, right)
    }

    /// `left != right`
    pub fn ne(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Ne, left, right)
    }

    /// `left > right`
    pub fn gt(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Gt, left, right)
    }

    /// `left >= right`
    pub fn gte(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Ge, left, right)
    }

    /// `left < right`
    pub fn lt(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Lt, left, right)
    }

    /// `left <= right`
    pub fn lte(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Le, left, right)
    }

    /// `left LIKE right`
    pub fn like(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Like, left, right)
    }

    /// `left ILIKE right`
    pub fn ilike(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::ILike, left, right)
    }

    /// `left AND right`
    pub fn and(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::And, left, right)
    }

    /// `left OR right`
    pub fn or(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Or, left, right)
    }

    /// `left + right`
    pub fn add(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Add, left, right)
    }

    /// `left - right`
    pub fn sub(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Sub, left, right)
    }

    /// `left * right`
    pub fn mul(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Mul, left, right)
    }

    /// `left / right`
    pub fn div(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::binary(BinOp::Div, left, right)
    }

    /// `left = ANY (right)`
    pub fn in_any(left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::In {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// `expr IS NULL`
    pub fn is_null(expr: impl Into<Expr>) -> Self {
        Expr::IsNull(Box::new(expr.into()))
    }

    /// `NOT (expr)`
    pub fn not(expr: impl Into<Expr>) -> Self {
        Expr::Not(Box::new(expr.into()))
    }

    /// An array literal.
    pub fn array(items: Vec<Expr>) -> Self {
        Expr::Array(items)
    }

    /// A raw SQL fragment with no embedded expressions.
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Fragment(vec![FragmentPart::Text(sql.into())])
    }

    /// A raw fragment from a template with `?` holes, one per argument.
    ///
    /// The hole count must match `args.len()`.
    ///
    /// # Example
    /// ```ignore
    /// Expr::fragment("lower(?) = ?", vec![Expr::col(0, "name"), bound])?
    /// ```
    pub fn fragment(template: &str, args: Vec<Expr>) -> ScribeResult<Self> {
        let holes = template.matches('?').count();
        if holes != args.len() {
            return Err(ScribeError::usage(format!(
                "fragment template has {} placeholder(s) but {} argument(s)",
                holes,
                args.len()
            )));
        }

        let mut parts = Vec::with_capacity(2 * args.len() + 1);
        let mut args = args.into_iter();
        for (i, text) in template.split('?').enumerate() {
            if i > 0 {
                if let Some(arg) = args.next() {
                    parts.push(FragmentPart::Expr(arg));
                }
            }
            if !text.is_empty() {
                parts.push(FragmentPart::Text(text.to_string()));
            }
        }
        Ok(Expr::Fragment(parts))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::Int(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Int(value as i64)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Float(value)
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Expr::Bool(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Expr::String(value.to_string())
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Expr::String(value)
    }
}

impl From<uuid::Uuid> for Expr {
    fn from(value: uuid::Uuid) -> Self {
        Expr::Uuid(value)
    }
}

impl From<bytes::Bytes> for Expr {
    fn from(value: bytes::Bytes) -> Self {
        Expr::Bytes(value)
    }
}
