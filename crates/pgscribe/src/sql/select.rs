//! SELECT statement assembly.

use crate::error::ScribeResult;
use crate::param::ParamList;
use crate::query::Query;
use crate::sql::alias::alias_sources;
use crate::sql::clause;
use crate::sql::expr::Env;

/// Generate a SELECT statement for `query`.
///
/// Clauses come out in the fixed order SELECT, FROM, JOIN, WHERE,
/// GROUP BY, HAVING, ORDER BY, LIMIT, OFFSET, locking clause, absent
/// ones dropped, the rest joined with single spaces. The returned list
/// holds the query's bound values; position `i` backs placeholder
/// `$i+1`.
pub fn select(query: &Query) -> ScribeResult<(String, ParamList)> {
    let aliases = alias_sources(&query.sources)?;
    let env = Env::new(query, &aliases);

    let mut parts: Vec<String> = Vec::with_capacity(10);
    parts.push(clause::select_clause(
        query.select.as_ref(),
        &query.distinct,
        env,
    )?);
    parts.push(clause::from_clause(&aliases)?);
    if let Some(sql) = clause::join_clauses(&query.joins, env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::boolean_clause("WHERE", &query.wheres, env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::group_by_clause(&query.group_by, env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::boolean_clause("HAVING", &query.havings, env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::order_by_clause(&query.order_by, env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::expr_clause("LIMIT", query.limit.as_ref(), env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::expr_clause("OFFSET", query.offset.as_ref(), env)? {
        parts.push(sql);
    }
    if let Some(sql) = clause::lock_clause(&query.lock) {
        parts.push(sql);
    }

    let sql = parts.join(" ");
    crate::sql::trace_sql("select", &sql, query.params.len());
    Ok((sql, query.params.clone()))
}
