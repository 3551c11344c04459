use super::*;
use crate::column::{all, all_of};
use crate::error::QbError;
use crate::expr::{col, count_star, func, table_col};
use crate::table::{Joinable, table};

#[test]
fn empty_column_list_selects_star() {
    let query = select(Vec::<ResultColumn>::new()).from(table("t"));
    assert_eq!(query.to_sql().unwrap(), r#"SELECT * FROM "t""#);
}

#[test]
fn full_core_clause_order() {
    let query = select([col("kind").into(), count_star().alias("n")])
        .distinct()
        .from(table("events"))
        .where_(col("ts").gt(100))
        .and_where(col("kind").is_not(crate::expr::null()))
        .group_by([col("kind")])
        .having(count_star().gt(1));
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT DISTINCT "kind", count(*) AS "n" FROM "events" WHERE "ts" > 100 AND "kind" IS NOT NULL GROUP BY "kind" HAVING count(*) > 1"#
    );
}

#[test]
fn star_forms_and_joins() {
    let query = select([all_of("u"), all()])
        .from(table("users").alias("u").join(table("roles")).using(["role_id"]));
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "u".*, * FROM "users" AS "u" JOIN "roles" USING ("role_id")"#
    );
}

#[test]
fn compound_select_is_left_folded() {
    let query = select([col("a")])
        .from(table("x"))
        .union(select([col("a")]).from(table("y")))
        .except(select([col("a")]).from(table("z")))
        .order_by([OrderingTerm::new(1).desc().nulls_last()]);
    assert!(query.is_compound());
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "a" FROM "x" UNION SELECT "a" FROM "y" EXCEPT SELECT "a" FROM "z" ORDER BY 1 DESC NULLS LAST"#
    );
}

#[test]
fn limit_and_offset() {
    let limited = select([col("a")]).from(table("t")).limit(5).offset(10);
    assert_eq!(
        limited.to_sql().unwrap(),
        r#"SELECT "a" FROM "t" LIMIT 5 OFFSET 10"#
    );

    let offset_only = select([col("a")]).from(table("t")).offset(10);
    assert_eq!(
        offset_only.to_sql().unwrap(),
        r#"SELECT "a" FROM "t" LIMIT -1 OFFSET 10"#
    );
}

#[test]
fn values_rows() {
    let rows = values([[lit_i(1), lit_i(2)], [lit_i(3), lit_i(4)]]).unwrap();
    assert_eq!(rows.width(), 2);
    assert_eq!(rows.to_sql().unwrap(), "VALUES (1, 2), (3, 4)");

    let combined = select([col("a"), col("b")]).from(table("t")).union_all(rows);
    assert_eq!(
        combined.to_sql().unwrap(),
        r#"SELECT "a", "b" FROM "t" UNION ALL VALUES (1, 2), (3, 4)"#
    );
}

fn lit_i(v: i64) -> Expr {
    Expr::from(v)
}

#[test]
fn values_validation() {
    let empty: Vec<Vec<Expr>> = Vec::new();
    assert_eq!(values(empty).unwrap_err(), QbError::EmptyList("VALUES list"));

    let empty_row: Vec<Vec<Expr>> = vec![Vec::new()];
    assert_eq!(values(empty_row).unwrap_err(), QbError::EmptyList("VALUES row"));

    let ragged = vec![vec![lit_i(1), lit_i(2)], vec![lit_i(3)]];
    let err = values(ragged).unwrap_err();
    assert!(matches!(err, QbError::Validation(ref msg) if msg.contains("row 1")));
}

#[test]
fn with_clause() {
    let base = select([col("id"), col("parent_id")])
        .from(table("nodes"))
        .where_(col("parent_id").is_null());
    let step = select([table_col("n", "id"), table_col("n", "parent_id")])
        .from(table("nodes").alias("n").join(table("tree")).on(table_col("n", "parent_id").eq(table_col("tree", "id"))));
    let tree = cte("tree", base.union_all(step))
        .columns(["id", "parent_id"])
        .unwrap();
    let query = with_recursive(tree).select(select([col("id")]).from(table("tree")));
    assert_eq!(
        query.to_sql().unwrap(),
        concat!(
            r#"WITH RECURSIVE "tree" ("id", "parent_id") AS ("#,
            r#"SELECT "id", "parent_id" FROM "nodes" WHERE "parent_id" ISNULL"#,
            r#" UNION ALL SELECT "n"."id", "n"."parent_id" FROM "nodes" AS "n" JOIN "tree" ON "n"."parent_id" = "tree"."id""#,
            r#") SELECT "id" FROM "tree""#
        )
    );
}

#[test]
fn with_multiple_tables_and_hints() {
    let query = with(cte("a", select([func("x", [1])])).not_materialized())
        .and(cte("b", select([col("y")])))
        .select(select([col("y")]).from(table("b")));
    assert_eq!(
        query.to_sql().unwrap(),
        r#"WITH "a" AS NOT MATERIALIZED (SELECT x(1)), "b" AS (SELECT "y") SELECT "y" FROM "b""#
    );
}

#[test]
fn empty_cte_columns_rejected() {
    let err = cte("t", select([col("a")]))
        .columns(Vec::<String>::new())
        .unwrap_err();
    assert_eq!(err, QbError::EmptyList("common table column list"));
}

#[test]
fn select_slot_reads_at_render_time() {
    let inner = SelectSlot::with(select([col("a")]).from(table("x")));
    let query = select([col("v")]).where_(col("v").in_select(inner.clone()));
    let frozen = query.snapshot().unwrap();
    inner.set(select([col("b")]).from(table("y")));
    assert_eq!(
        query.to_sql().unwrap(),
        r#"SELECT "v" WHERE "v" IN (SELECT "b" FROM "y")"#
    );
    assert_eq!(
        frozen.to_sql().unwrap(),
        r#"SELECT "v" WHERE "v" IN (SELECT "a" FROM "x")"#
    );
}

#[test]
fn unset_select_slot_fails() {
    let query = select([col("v")]).where_(crate::expr::exists(SelectSlot::new()));
    assert_eq!(
        query.to_sql().unwrap_err(),
        QbError::UnsetPlaceholder("select statement")
    );
}
