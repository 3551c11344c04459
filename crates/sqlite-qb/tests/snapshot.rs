//! Template slots and snapshots.

use std::thread;

use sqlite_qb::prelude::*;

#[test]
fn one_template_renders_many_queries() -> QbResult<()> {
    let source = TableSlot::new();
    let filter = ExprSlot::new();
    let query = select([all()]).from(source.clone()).where_(filter.clone());

    source.set(table("users"));
    filter.set(col("id").eq(1));
    assert_eq!(query.build()?, r#"SELECT * FROM "users" WHERE "id" = 1"#);

    source.set(table("archived_users").alias("u"));
    filter.set(table_col("u", "name").like("A%"));
    assert_eq!(
        query.build()?,
        r#"SELECT * FROM "archived_users" AS "u" WHERE "u"."name" LIKE 'A%'"#
    );
    Ok(())
}

#[test]
fn unset_slot_fails_render_and_snapshot() {
    let filter = ExprSlot::new();
    let query = select([col("a")]).from(table("t")).where_(filter.clone());

    assert!(query.build().unwrap_err().is_unset_placeholder());
    assert!(query.snapshot().unwrap_err().is_unset_placeholder());

    filter.set(true);
    assert!(query.build().is_ok());
    filter.clear();
    assert!(query.build().unwrap_err().is_unset_placeholder());
}

#[test]
fn snapshot_is_isolated_from_later_updates() -> QbResult<()> {
    let column = ColumnSlot::with(col("a"));
    let name = TextSlot::with("x");
    let query = select([column.clone()])
        .from(table("t"))
        .where_(col("name").eq(text(name.clone())));

    let frozen = query.snapshot()?;
    column.set(count_star().alias("n"));
    name.set("y");

    assert_eq!(frozen.build()?, r#"SELECT "a" FROM "t" WHERE "name" = 'x'"#);
    assert_eq!(
        query.build()?,
        r#"SELECT count(*) AS "n" FROM "t" WHERE "name" = 'y'"#
    );
    Ok(())
}

#[test]
fn slot_values_are_grouped_by_their_content() -> QbResult<()> {
    let rhs = ExprSlot::with(col("b") + col("c"));
    let expr = col("a") * rhs.clone();
    assert_eq!(expr.to_sql()?, r#""a" * ("b" + "c")"#);

    rhs.set(col("b") * col("c"));
    assert_eq!(expr.to_sql()?, r#""a" * ("b" * "c")"#);
    Ok(())
}

#[test]
fn subquery_slot_feeds_in_and_exists() -> QbResult<()> {
    let ids = SelectSlot::new();
    let query = delete_from("sessions").where_(col("user_id").in_select(ids.clone()));

    ids.set(select([col("id")]).from(table("banned")));
    assert_eq!(
        query.build()?,
        r#"DELETE FROM "sessions" WHERE "user_id" IN (SELECT "id" FROM "banned")"#
    );
    Ok(())
}

#[test]
fn snapshots_cross_threads() -> QbResult<()> {
    let limit = ExprSlot::new();
    let query = select([col("id")])
        .from(table("jobs"))
        .order_by([col("id")])
        .limit(limit.clone());

    let handles: Vec<_> = (1..=4)
        .map(|n| -> QbResult<_> {
            limit.set(n);
            let frozen = query.snapshot()?;
            Ok(thread::spawn(move || frozen.build()))
        })
        .collect::<QbResult<_>>()?;

    for (n, handle) in (1..=4).zip(handles) {
        let sql = handle.join().expect("render thread panicked")?;
        assert_eq!(sql, format!(r#"SELECT "id" FROM "jobs" ORDER BY "id" LIMIT {n}"#));
    }
    Ok(())
}

#[test]
fn cloned_slot_handles_share_one_cell() {
    let a = ExprSlot::new();
    let b = a.clone();
    b.set(5);
    assert!(a.is_set());
    assert!(a.ptr_eq(&b));
    assert!(!a.ptr_eq(&ExprSlot::new()));
}
