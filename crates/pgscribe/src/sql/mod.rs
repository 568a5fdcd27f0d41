//! PostgreSQL statement generation.
//!
//! Turns a [`Query`](crate::query::Query) or a [`Model`](crate::schema::Model)
//! record into SQL text plus the ordered value list backing its 1-based
//! `$n` placeholders.
//!
//! # Statements
//!
//! - [`select`]: fixed clause order SELECT, FROM, JOIN, WHERE, GROUP BY,
//!   HAVING, ORDER BY, LIMIT, OFFSET, locking clause; absent clauses are
//!   dropped, never rendered empty
//! - [`insert`] / [`update`] / [`delete`]: single-record statements driven
//!   by the `Model` mapping, primary-key addressed for update/delete
//! - [`update_all`] / [`delete_all`]: set-based statements over every row
//!   a query matches; parameters ride inside the expression tree, so only
//!   the SQL text is returned

mod alias;
mod clause;
mod delete;
mod expr;
mod insert;
mod select;
mod update;

pub use alias::{AliasedSource, AliasedSources, alias_sources};
pub use delete::{delete, delete_all};
pub use insert::insert;
pub use select::select;
pub use update::{update, update_all};

/// Rendering options carried by a query.
#[derive(Clone, Copy, Debug)]
pub struct SqlOptions {
    /// Append an explicit `::float8` cast to float literals, so a
    /// fractional literal can never be read back as an integer. On by
    /// default; turn off where the cast would fight surrounding context.
    pub float_cast: bool,
}

impl Default for SqlOptions {
    fn default() -> Self {
        Self { float_cast: true }
    }
}

/// Quote an identifier for PostgreSQL.
///
/// Identifiers are wrapped in double quotes with no internal escaping;
/// callers must not supply names containing a double quote.
pub(crate) fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name)
}

#[cfg(feature = "tracing")]
pub(crate) fn trace_sql(kind: &str, sql: &str, param_count: usize) {
    tracing::debug!(target: "pgscribe.sql", kind, param_count, sql = %sql, "generated statement");
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn trace_sql(_kind: &str, _sql: &str, _param_count: usize) {}
