//! UPDATE statement generation, single-record and set-based.

use crate::error::{ScribeError, ScribeResult};
use crate::expr::Expr;
use crate::param::ParamList;
use crate::query::Query;
use crate::schema::Model;
use crate::sql::alias::alias_sources;
use crate::sql::clause;
use crate::sql::expr::{Env, render};
use crate::sql::quote_ident;

/// Generate a single-row UPDATE addressed by primary key.
///
/// Fields whose value is absent are skipped, as is any field matching
/// the schema's primary key: the key addresses the row, it is never
/// SET. Assignments take `$1..$N` in field order and the primary key
/// rides last as `$N+1`, with the returned value list in that same
/// order. A record contributing no assignment at all is a usage error.
pub fn update<M: Model>(record: &M, returning: &[&str]) -> ScribeResult<(String, ParamList)> {
    let schema = M::schema();
    let mut assignments: Vec<String> = Vec::new();
    let mut params = ParamList::new();

    for (field, value) in record.values() {
        if field == schema.primary_key() {
            continue;
        }
        if let Some(param) = value {
            let index = params.push_param(param);
            assignments.push(format!("{} = ${}", quote_ident(field), index));
        }
    }
    if assignments.is_empty() {
        return Err(ScribeError::usage("update with no fields to set"));
    }

    let pk_index = params.push_param(record.primary_key_value());
    let mut sql = format!(
        "UPDATE {} SET {} WHERE {} = ${}",
        quote_ident(schema.table()),
        assignments.join(", "),
        quote_ident(schema.primary_key()),
        pk_index
    );
    if !returning.is_empty() {
        let cols: Vec<String> = returning.iter().map(|c| quote_ident(c)).collect();
        sql.push_str(&format!(" RETURNING {}", cols.join(", ")));
    }

    crate::sql::trace_sql("update", &sql, params.len());
    Ok((sql, params))
}

/// Generate a set-based UPDATE over every row `query` matches.
///
/// `assignments` pairs column names with value expressions, rendered in
/// order. Any parameters ride inside the expression trees as `Bind`
/// nodes against the query's own list, so only the SQL text is returned;
/// submit it alongside `query.params()`.
pub fn update_all(query: &Query, assignments: &[(&str, Expr)]) -> ScribeResult<String> {
    if assignments.is_empty() {
        return Err(ScribeError::usage("update_all with no assignments"));
    }

    let aliases = alias_sources(&query.sources)?;
    let env = Env::new(query, &aliases);
    let primary = aliases.get(0)?;

    let mut sets = Vec::with_capacity(assignments.len());
    for (column, expr) in assignments {
        sets.push(format!("{} = {}", quote_ident(column), render(expr, env)?));
    }

    let mut parts = vec![format!(
        "UPDATE {} AS {} SET {}",
        quote_ident(primary.table()),
        primary.alias(),
        sets.join(", ")
    )];
    if let Some(sql) = clause::boolean_clause("WHERE", &query.wheres, env)? {
        parts.push(sql);
    }

    let sql = parts.join(" ");
    crate::sql::trace_sql("update_all", &sql, query.params.len());
    Ok(sql)
}
