//! # pgscribe
//!
//! A PostgreSQL statement generator: relational query trees in,
//! parameterized SQL out.
//!
//! ## Features
//!
//! - **Backend-agnostic input**: queries arrive as a validated [`Query`]
//!   structure with [`Expr`] trees, built here or by an upstream layer
//! - **Parameterized output**: every generated statement pairs its SQL
//!   text with the ordered values backing its 1-based `$n` placeholders
//! - **Lockstep binding**: [`Query::bind`] hands back the placeholder
//!   expression for each value, so numbering can never drift
//! - **Collision-free aliasing**: every table reference gets a short
//!   deterministic alias, `"people"` becoming `p0`
//! - **Record mutations**: INSERT/UPDATE/DELETE driven by a [`Model`]
//!   mapping, plus set-based `update_all`/`delete_all` over a query
//! - **No I/O**: generation is pure; submit the output with the
//!   `tokio-postgres` client of your choice
//!
//! ## Generating a SELECT
//!
//! ```ignore
//! use pgscribe::{Direction, Expr, Query, Schema, sql};
//!
//! const PEOPLE: Schema = Schema::new("people")
//!     .with_fields(&["id", "name", "age"]);
//!
//! let mut query = Query::from_schema(PEOPLE);
//! let min_age = query.bind(18i32);
//! let query = query
//!     .select_exprs(vec![Expr::col(0, "id"), Expr::col(0, "name")])
//!     .and_where(Expr::gt(Expr::col(0, "age"), min_age))
//!     .order_by(Expr::col(0, "name"), Direction::Asc)
//!     .limit(10);
//!
//! let (text, params) = sql::select(&query)?;
//! // SELECT p0."id", p0."name" FROM "people" AS p0
//! //   WHERE (p0."age" > $1) ORDER BY p0."name" LIMIT 10
//! let rows = client.query(&text, &params.as_refs()).await?;
//! ```

pub mod error;
pub mod expr;
pub mod param;
pub mod query;
pub mod schema;
pub mod sql;

pub use error::{ScribeError, ScribeResult};
pub use expr::{BinOp, Expr, FragmentPart};
pub use param::{Param, ParamList};
pub use query::{Direction, Join, JoinKind, Lock, OrderBy, Query, Select, Source};
pub use schema::{Model, Schema};
pub use sql::{
    AliasedSource, AliasedSources, SqlOptions, alias_sources, delete, delete_all, insert, select,
    update, update_all,
};
