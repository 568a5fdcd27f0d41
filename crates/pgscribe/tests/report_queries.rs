//! Scenario tests for SELECT generation through the public API.
//!
//! These build the kind of filtered report queries an application layer
//! would hand down, and check the generated text and parameter counts.
//! Nothing here touches a database.

use pgscribe::{Direction, Expr, JoinKind, Lock, Query, Schema, Source, sql};

const AUDIT_LOGS: Schema = Schema::new("audit_logs").with_fields(&[
    "id",
    "actor_id",
    "operation",
    "status_code",
    "created_at",
]);

const ACTORS: Schema = Schema::new("actors").with_fields(&["id", "username"]);

#[test]
fn filtered_report_with_typed_binds() {
    let mut query = Query::from_schema(AUDIT_LOGS);
    let actor = query.bind(uuid::Uuid::new_v4());
    let since = query.bind(chrono::Utc::now() - chrono::Duration::days(7));
    let op = query.bind("login%");

    let query = query
        .select_exprs(vec![
            Expr::col(0, "id"),
            Expr::col(0, "operation"),
            Expr::col(0, "created_at"),
        ])
        .and_where(Expr::eq(Expr::col(0, "actor_id"), actor))
        .and_where(Expr::gte(Expr::col(0, "created_at"), since))
        .and_where(Expr::like(Expr::col(0, "operation"), op))
        .order_by(Expr::col(0, "created_at"), Direction::Desc)
        .limit(50)
        .offset(100);

    let (text, params) = sql::select(&query).unwrap();
    assert_eq!(
        text,
        r#"SELECT a0."id", a0."operation", a0."created_at" FROM "audit_logs" AS a0 WHERE (a0."actor_id" = $1) AND (a0."created_at" >= $2) AND (a0."operation" LIKE $3) ORDER BY a0."created_at" DESC LIMIT 50 OFFSET 100"#
    );
    assert_eq!(params.len(), 3);
    assert_eq!(params.as_refs().len(), 3);
}

#[test]
fn report_joined_to_a_second_table() {
    let mut query = Query::from_schema(AUDIT_LOGS);
    let min_status = query.bind(400i16);

    let query = query
        .select_exprs(vec![
            Expr::col(0, "operation"),
            Expr::col(1, "username"),
            Expr::col(0, "status_code"),
        ])
        .join(
            JoinKind::Left,
            Source::from_schema(ACTORS),
            Expr::eq(Expr::col(0, "actor_id"), Expr::col(1, "id")),
        )
        .and_where(Expr::gte(Expr::col(0, "status_code"), min_status));

    let (text, _) = sql::select(&query).unwrap();
    assert_eq!(
        text,
        r#"SELECT a0."operation", a1."username", a0."status_code" FROM "audit_logs" AS a0 LEFT OUTER JOIN "actors" AS a1 ON a0."actor_id" = a1."id" WHERE (a0."status_code" >= $1)"#
    );
}

#[test]
fn grouped_counts_per_operation() {
    let mut query = Query::from_schema(AUDIT_LOGS);
    let floor = query.bind(10i64);

    let query = query
        .select_exprs(vec![
            Expr::col(0, "operation"),
            Expr::call("count", vec![Expr::col(0, "id")]),
        ])
        .group_by(Expr::col(0, "operation"))
        .and_having(Expr::gt(
            Expr::call("count", vec![Expr::col(0, "id")]),
            floor,
        ))
        .order_by(Expr::call("count", vec![Expr::col(0, "id")]), Direction::Desc);

    let (text, _) = sql::select(&query).unwrap();
    assert_eq!(
        text,
        r#"SELECT a0."operation", count(a0."id") FROM "audit_logs" AS a0 GROUP BY a0."operation" HAVING (count(a0."id") > $1) ORDER BY count(a0."id") DESC"#
    );
}

#[test]
fn locked_row_fetch_for_processing() {
    let mut query = Query::from_schema(AUDIT_LOGS);
    let id = query.bind(42i64);
    let query = query
        .and_where(Expr::eq(Expr::col(0, "id"), id))
        .lock(Lock::ForUpdate);

    let (text, _) = sql::select(&query).unwrap();
    assert_eq!(
        text,
        r#"SELECT a0."id", a0."actor_id", a0."operation", a0."status_code", a0."created_at" FROM "audit_logs" AS a0 WHERE (a0."id" = $1) FOR UPDATE"#
    );
}

#[test]
fn membership_filter_binds_one_array() {
    let mut query = Query::from_schema(AUDIT_LOGS);
    let statuses = query.bind(vec![401i16, 403, 500]);
    let query = query
        .select_exprs(vec![Expr::col(0, "id")])
        .and_where(Expr::in_any(Expr::col(0, "status_code"), statuses));

    let (text, params) = sql::select(&query).unwrap();
    assert_eq!(
        text,
        r#"SELECT a0."id" FROM "audit_logs" AS a0 WHERE (a0."status_code" = ANY ($1))"#
    );
    assert_eq!(params.len(), 1);
}

#[test]
fn raw_fragment_escape_hatch() {
    let mut query = Query::from_schema(AUDIT_LOGS);
    let needle = query.bind("timeout");
    let predicate = Expr::fragment(
        "position(? in ?) > 0",
        vec![needle, Expr::col(0, "operation")],
    )
    .unwrap();
    let query = query.select_exprs(vec![Expr::col(0, "id")]).and_where(predicate);

    let (text, _) = sql::select(&query).unwrap();
    assert_eq!(
        text,
        r#"SELECT a0."id" FROM "audit_logs" AS a0 WHERE (position($1 in a0."operation") > 0)"#
    );
}
