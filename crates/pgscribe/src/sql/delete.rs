//! DELETE statement generation, single-record and set-based.

use crate::error::ScribeResult;
use crate::param::ParamList;
use crate::query::Query;
use crate::schema::Model;
use crate::sql::alias::alias_sources;
use crate::sql::clause;
use crate::sql::expr::Env;
use crate::sql::quote_ident;

/// Generate a single-row DELETE addressed by primary key.
///
/// The statement is `DELETE FROM <table> WHERE <pk> = $1` with the
/// primary key as the only value.
pub fn delete<M: Model>(record: &M, returning: &[&str]) -> ScribeResult<(String, ParamList)> {
    let schema = M::schema();
    let mut params = ParamList::new();
    let pk_index = params.push_param(record.primary_key_value());

    let mut sql = format!(
        "DELETE FROM {} WHERE {} = ${}",
        quote_ident(schema.table()),
        quote_ident(schema.primary_key()),
        pk_index
    );
    if !returning.is_empty() {
        let cols: Vec<String> = returning.iter().map(|c| quote_ident(c)).collect();
        sql.push_str(&format!(" RETURNING {}", cols.join(", ")));
    }

    crate::sql::trace_sql("delete", &sql, params.len());
    Ok((sql, params))
}

/// Generate a set-based DELETE over every row `query` matches.
///
/// Parameters ride inside the predicate trees as `Bind` nodes against
/// the query's own list, so only the SQL text is returned; submit it
/// alongside `query.params()`.
pub fn delete_all(query: &Query) -> ScribeResult<String> {
    let aliases = alias_sources(&query.sources)?;
    let env = Env::new(query, &aliases);
    let primary = aliases.get(0)?;

    let mut parts = vec![format!(
        "DELETE FROM {} AS {}",
        quote_ident(primary.table()),
        primary.alias()
    )];
    if let Some(sql) = clause::boolean_clause("WHERE", &query.wheres, env)? {
        parts.push(sql);
    }

    let sql = parts.join(" ");
    crate::sql::trace_sql("delete_all", &sql, query.params.len());
    Ok(sql)
}
