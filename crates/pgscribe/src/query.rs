//! The backend-agnostic query structure consumed by the SQL generator.
//!
//! A `Query` is assumed already validated: source indices in its
//! expressions are in range, and the expression trees are well formed.
//! The generator checks the index invariants anyway and reports
//! violations as internal errors instead of emitting wrong SQL.

use crate::expr::Expr;
use crate::param::{Param, ParamList};
use crate::schema::Schema;
use crate::sql::SqlOptions;
use tokio_postgres::types::ToSql;

/// One table reference inside a query.
///
/// Source 0 is the primary table; each join appends one more, in join
/// order.
#[derive(Clone, Debug)]
pub struct Source {
    pub(crate) table: String,
    pub(crate) schema: Schema,
}

impl Source {
    /// A source over `table` described by `schema`.
    pub fn new(table: impl Into<String>, schema: Schema) -> Self {
        Self {
            table: table.into(),
            schema,
        }
    }

    /// A source whose table name comes from the schema itself.
    pub fn from_schema(schema: Schema) -> Self {
        Self {
            table: schema.table().to_string(),
            schema,
        }
    }

    /// Referenced table name.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Schema of the referenced table.
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// Join flavor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    /// The SQL keyword this join renders as.
    pub const fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT OUTER JOIN",
            JoinKind::Right => "RIGHT OUTER JOIN",
            JoinKind::Full => "FULL OUTER JOIN",
        }
    }
}

/// One join: kind plus ON condition, paired positionally with the source
/// at index `join position + 1`.
#[derive(Clone, Debug)]
pub struct Join {
    pub(crate) kind: JoinKind,
    pub(crate) on: Expr,
}

impl Join {
    /// Join kind.
    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    /// ON condition.
    pub fn on(&self) -> &Expr {
        &self.on
    }
}

/// Sort direction for one ORDER BY entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Renders with no suffix.
    Asc,
    /// Renders with a ` DESC` suffix.
    Desc,
}

/// One ORDER BY entry.
#[derive(Clone, Debug)]
pub struct OrderBy {
    pub(crate) expr: Expr,
    pub(crate) direction: Direction,
}

/// Row locking clause.
#[derive(Clone, Debug, Default)]
pub enum Lock {
    /// No locking clause.
    #[default]
    None,
    /// `FOR UPDATE`
    ForUpdate,
    /// Caller-supplied locking text, emitted verbatim.
    Custom(String),
}

/// SELECT list shape: one expression, or a nested row of them.
///
/// Rows flatten recursively into a single comma-separated column list, so
/// `Row([a, Row([b, c])])` selects `a, b, c`.
#[derive(Clone, Debug)]
pub enum Select {
    Expr(Expr),
    Row(Vec<Select>),
}

/// A relational query, ready for SQL generation.
///
/// Built with chained methods; `bind` registers an external value and
/// hands back the [`Expr::Bind`] node referencing it, which keeps
/// placeholder numbering and value order in lockstep by construction:
///
/// ```ignore
/// let mut query = Query::from_schema(PEOPLE);
/// let min_age = query.bind(18i32);
/// let query = query
///     .select_exprs(vec![Expr::col(0, "id"), Expr::col(0, "name")])
///     .and_where(Expr::gt(Expr::col(0, "age"), min_age))
///     .limit(10);
/// ```
#[derive(Clone, Debug)]
pub struct Query {
    pub(crate) sources: Vec<Source>,
    pub(crate) select: Option<Select>,
    pub(crate) distinct: Vec<Expr>,
    pub(crate) joins: Vec<Join>,
    pub(crate) wheres: Vec<Expr>,
    pub(crate) group_by: Vec<Expr>,
    pub(crate) havings: Vec<Expr>,
    pub(crate) order_by: Vec<OrderBy>,
    pub(crate) limit: Option<Expr>,
    pub(crate) offset: Option<Expr>,
    pub(crate) lock: Lock,
    pub(crate) options: SqlOptions,
    pub(crate) params: ParamList,
}

impl Query {
    /// Start a query over `source` as the primary table.
    pub fn new(source: Source) -> Self {
        Self {
            sources: vec![source],
            select: None,
            distinct: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
            group_by: Vec::new(),
            havings: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
            lock: Lock::None,
            options: SqlOptions::default(),
            params: ParamList::new(),
        }
    }

    /// Start a query over a schema, using its static table name.
    pub fn from_schema(schema: Schema) -> Self {
        Self::new(Source::from_schema(schema))
    }

    /// Set the SELECT shape. Without one the query selects every declared
    /// column of the primary source.
    pub fn select(mut self, select: Select) -> Self {
        self.select = Some(select);
        self
    }

    /// Set the SELECT list from a flat expression list.
    pub fn select_exprs(mut self, exprs: Vec<Expr>) -> Self {
        self.select = Some(Select::Row(exprs.into_iter().map(Select::Expr).collect()));
        self
    }

    /// Set the DISTINCT ON expressions.
    pub fn distinct_on(mut self, exprs: Vec<Expr>) -> Self {
        self.distinct = exprs;
        self
    }

    /// Join another source. Appends it to the source list, so its columns
    /// are addressed by the next source index.
    pub fn join(mut self, kind: JoinKind, source: Source, on: Expr) -> Self {
        self.sources.push(source);
        self.joins.push(Join { kind, on });
        self
    }

    /// Add a WHERE predicate, ANDed with any already present.
    pub fn and_where(mut self, predicate: Expr) -> Self {
        self.wheres.push(predicate);
        self
    }

    /// Add a GROUP BY expression.
    pub fn group_by(mut self, expr: Expr) -> Self {
        self.group_by.push(expr);
        self
    }

    /// Add a HAVING predicate, ANDed with any already present.
    pub fn and_having(mut self, predicate: Expr) -> Self {
        self.havings.push(predicate);
        self
    }

    /// Add an ORDER BY entry.
    pub fn order_by(mut self, expr: Expr, direction: Direction) -> Self {
        self.order_by.push(OrderBy { expr, direction });
        self
    }

    /// Set the LIMIT expression.
    pub fn limit(mut self, expr: impl Into<Expr>) -> Self {
        self.limit = Some(expr.into());
        self
    }

    /// Set the OFFSET expression.
    pub fn offset(mut self, expr: impl Into<Expr>) -> Self {
        self.offset = Some(expr.into());
        self
    }

    /// Set the locking clause.
    pub fn lock(mut self, lock: Lock) -> Self {
        self.lock = lock;
        self
    }

    /// Override the rendering options.
    pub fn options(mut self, options: SqlOptions) -> Self {
        self.options = options;
        self
    }

    /// Bind an external value and return the expression referencing it.
    ///
    /// The n-th bound value renders as `$n` and sits at position `n-1` of
    /// the list returned with the generated statement.
    pub fn bind<T: ToSql + Send + Sync + 'static>(&mut self, value: T) -> Expr {
        let index = self.params.push(value);
        Expr::Bind(index - 1)
    }

    /// Bind a pre-wrapped parameter.
    pub fn bind_param(&mut self, param: Param) -> Expr {
        let index = self.params.push_param(param);
        Expr::Bind(index - 1)
    }

    /// The query's sources, primary table first.
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    /// The externally bound values, in placeholder order.
    pub fn params(&self) -> &ParamList {
        &self.params
    }
}
