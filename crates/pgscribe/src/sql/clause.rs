//! Clause builders.
//!
//! Each returns `Ok(None)` when its clause has no content, so statement
//! assembly can drop absents without ever emitting an empty clause or
//! stray whitespace.

use crate::error::{ScribeError, ScribeResult};
use crate::expr::Expr;
use crate::query::{Direction, Join, Lock, OrderBy, Select};
use crate::sql::alias::AliasedSources;
use crate::sql::expr::{Env, render};
use crate::sql::quote_ident;

/// `SELECT [DISTINCT ON (...)] <columns>`. Always present; an empty
/// column list is an internal error rather than malformed text.
pub(crate) fn select_clause(
    select: Option<&Select>,
    distinct: &[Expr],
    env: Env<'_>,
) -> ScribeResult<String> {
    let mut out = String::from("SELECT ");
    if !distinct.is_empty() {
        let exprs: Vec<String> = distinct
            .iter()
            .map(|expr| render(expr, env))
            .collect::<ScribeResult<_>>()?;
        out.push_str(&format!("DISTINCT ON ({}) ", exprs.join(", ")));
    }
    let columns = match select {
        Some(select) => flatten_select(select, env)?.join(", "),
        None => render(&Expr::SourceAll(0), env)?,
    };
    if columns.is_empty() {
        return Err(ScribeError::internal("select list is empty"));
    }
    out.push_str(&columns);
    Ok(out)
}

/// Flatten a possibly nested select shape to its leaf expressions.
fn flatten_select(select: &Select, env: Env<'_>) -> ScribeResult<Vec<String>> {
    match select {
        Select::Expr(expr) => Ok(vec![render(expr, env)?]),
        Select::Row(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.extend(flatten_select(item, env)?);
            }
            Ok(out)
        }
    }
}

/// `FROM "table" AS alias` for the primary source. Always present.
pub(crate) fn from_clause(aliases: &AliasedSources) -> ScribeResult<String> {
    let primary = aliases.get(0)?;
    Ok(format!(
        "FROM {} AS {}",
        quote_ident(primary.table()),
        primary.alias()
    ))
}

/// One `<kind> JOIN "table" AS alias ON <condition>` per join, in
/// declared order. Join `i` pairs with the aliased source at `i + 1`.
pub(crate) fn join_clauses(joins: &[Join], env: Env<'_>) -> ScribeResult<Option<String>> {
    if joins.is_empty() {
        return Ok(None);
    }
    let mut parts = Vec::with_capacity(joins.len());
    for (i, join) in joins.iter().enumerate() {
        let aliased = env.aliases.get(i + 1)?;
        parts.push(format!(
            "{} {} AS {} ON {}",
            join.kind.keyword(),
            quote_ident(aliased.table()),
            aliased.alias(),
            render(&join.on, env)?
        ));
    }
    Ok(Some(parts.join(" ")))
}

/// Boolean-list renderer shared by WHERE and HAVING: each predicate is
/// parenthesized on its own, predicates are implicitly ANDed.
pub(crate) fn boolean_clause(
    keyword: &str,
    predicates: &[Expr],
    env: Env<'_>,
) -> ScribeResult<Option<String>> {
    if predicates.is_empty() {
        return Ok(None);
    }
    let mut parts = Vec::with_capacity(predicates.len());
    for predicate in predicates {
        parts.push(format!("({})", render(predicate, env)?));
    }
    Ok(Some(format!("{} {}", keyword, parts.join(" AND "))))
}

/// `GROUP BY <exprs>`.
pub(crate) fn group_by_clause(exprs: &[Expr], env: Env<'_>) -> ScribeResult<Option<String>> {
    if exprs.is_empty() {
        return Ok(None);
    }
    let rendered: Vec<String> = exprs
        .iter()
        .map(|expr| render(expr, env))
        .collect::<ScribeResult<_>>()?;
    Ok(Some(format!("GROUP BY {}", rendered.join(", "))))
}

/// `ORDER BY <expr> [DESC], ...`; ascending entries carry no suffix.
pub(crate) fn order_by_clause(entries: &[OrderBy], env: Env<'_>) -> ScribeResult<Option<String>> {
    if entries.is_empty() {
        return Ok(None);
    }
    let mut parts = Vec::with_capacity(entries.len());
    for entry in entries {
        let rendered = render(&entry.expr, env)?;
        match entry.direction {
            Direction::Asc => parts.push(rendered),
            Direction::Desc => parts.push(format!("{} DESC", rendered)),
        }
    }
    Ok(Some(format!("ORDER BY {}", parts.join(", "))))
}

/// `LIMIT <expr>` / `OFFSET <expr>`, keyword supplied by the caller.
pub(crate) fn expr_clause(
    keyword: &str,
    expr: Option<&Expr>,
    env: Env<'_>,
) -> ScribeResult<Option<String>> {
    match expr {
        Some(expr) => Ok(Some(format!("{} {}", keyword, render(expr, env)?))),
        None => Ok(None),
    }
}

/// The locking clause. `Custom` text passes through verbatim.
pub(crate) fn lock_clause(lock: &Lock) -> Option<String> {
    match lock {
        Lock::None => None,
        Lock::ForUpdate => Some("FOR UPDATE".to_string()),
        Lock::Custom(text) => Some(text.clone()),
    }
}
