//! Expression rendering.
//!
//! `render` is total over the closed [`Expr`] set via exhaustive match;
//! an out-of-range source or bind index is an internal error, never
//! best-guess SQL.

use crate::error::{ScribeError, ScribeResult};
use crate::expr::{BinOp, Expr, FragmentPart};
use crate::query::Query;
use crate::sql::alias::AliasedSources;
use crate::sql::quote_ident;

/// Function names the renderer treats as infix operators when applied to
/// exactly two arguments. One static table, consulted at render time.
const OPERATORS: &[(&str, BinOp)] = &[
    ("=", BinOp::Eq),
    ("!=", BinOp::Ne),
    ("<=", BinOp::Le),
    (">=", BinOp::Ge),
    ("<", BinOp::Lt),
    (">", BinOp::Gt),
    ("and", BinOp::And),
    ("or", BinOp::Or),
    ("ilike", BinOp::ILike),
    ("like", BinOp::Like),
    ("+", BinOp::Add),
    ("-", BinOp::Sub),
    ("*", BinOp::Mul),
    ("/", BinOp::Div),
];

fn operator(name: &str) -> Option<BinOp> {
    OPERATORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, op)| *op)
}

/// Rendering environment for one statement.
#[derive(Clone, Copy)]
pub(crate) struct Env<'a> {
    /// Alias table for the statement's sources.
    pub(crate) aliases: &'a AliasedSources,
    /// Number of externally bound values; `Bind` indices must stay below.
    pub(crate) bind_count: usize,
    /// Append `::float8` to float literals.
    pub(crate) float_cast: bool,
}

impl<'a> Env<'a> {
    pub(crate) fn new(query: &Query, aliases: &'a AliasedSources) -> Self {
        Self {
            aliases,
            bind_count: query.params.len(),
            float_cast: query.options.float_cast,
        }
    }
}

/// Render one expression node to SQL text.
pub(crate) fn render(expr: &Expr, env: Env<'_>) -> ScribeResult<String> {
    match expr {
        Expr::Column { source, name } => {
            let aliased = env.aliases.get(*source)?;
            Ok(format!("{}.{}", aliased.alias(), quote_ident(name)))
        }
        Expr::SourceAll(source) => {
            let aliased = env.aliases.get(*source)?;
            let columns: Vec<String> = aliased
                .schema()
                .fields()
                .iter()
                .map(|field| format!("{}.{}", aliased.alias(), quote_ident(field)))
                .collect();
            Ok(columns.join(", "))
        }
        Expr::Bind(index) => {
            if *index >= env.bind_count {
                return Err(ScribeError::internal(format!(
                    "bind index {} out of range ({} bound values)",
                    index, env.bind_count
                )));
            }
            Ok(format!("${}", index + 1))
        }
        Expr::Call { name, args } => match operator(name) {
            Some(op) if args.len() == 2 => render_infix(op, &args[0], &args[1], env),
            _ => {
                let rendered: Vec<String> = args
                    .iter()
                    .map(|arg| render(arg, env))
                    .collect::<ScribeResult<_>>()?;
                Ok(format!("{}({})", name, rendered.join(", ")))
            }
        },
        Expr::Binary { op, left, right } => render_infix(*op, left, right, env),
        Expr::In { left, right } => Ok(format!(
            "{} = ANY ({})",
            render(left, env)?,
            render(right, env)?
        )),
        Expr::IsNull(inner) => Ok(format!("{} IS NULL", render(inner, env)?)),
        Expr::Not(inner) => Ok(format!("NOT ({})", render(inner, env)?)),
        Expr::Array(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| render(item, env))
                .collect::<ScribeResult<_>>()?;
            Ok(format!("ARRAY[{}]", rendered.join(", ")))
        }
        Expr::Fragment(parts) => {
            let mut out = String::new();
            for part in parts {
                match part {
                    FragmentPart::Text(text) => out.push_str(text),
                    FragmentPart::Expr(inner) => out.push_str(&render(inner, env)?),
                }
            }
            Ok(out)
        }
        Expr::Bytes(bytes) => Ok(format!("'\\x{}'::bytea", hex_lower(bytes))),
        Expr::Uuid(uuid) => Ok(format!("'{}'", uuid.simple())),
        Expr::Null => Ok("NULL".to_string()),
        Expr::Bool(true) => Ok("TRUE".to_string()),
        Expr::Bool(false) => Ok("FALSE".to_string()),
        Expr::String(value) => Ok(quote_literal(value)),
        Expr::Int(value) => Ok(value.to_string()),
        Expr::Float(value) => {
            // Debug keeps the decimal point on whole floats: 4.0, not 4.
            if env.float_cast {
                Ok(format!("{:?}::float8", value))
            } else {
                Ok(format!("{:?}", value))
            }
        }
    }
}

fn render_infix(op: BinOp, left: &Expr, right: &Expr, env: Env<'_>) -> ScribeResult<String> {
    Ok(format!(
        "{} {} {}",
        render_operand(left, env)?,
        op.token(),
        render_operand(right, env)?
    ))
}

/// Operands that are themselves infix applications get parenthesized, so
/// nesting never changes meaning.
fn render_operand(expr: &Expr, env: Env<'_>) -> ScribeResult<String> {
    let sql = render(expr, env)?;
    if is_infix(expr) {
        Ok(format!("({})", sql))
    } else {
        Ok(sql)
    }
}

fn is_infix(expr: &Expr) -> bool {
    match expr {
        Expr::Binary { .. } => true,
        Expr::Call { name, args } => args.len() == 2 && operator(name).is_some(),
        _ => false,
    }
}

/// Quote a string literal, doubling embedded single quotes. Nothing else
/// is altered.
fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

fn hex_lower(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}
