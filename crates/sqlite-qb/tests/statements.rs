//! End-to-end statement rendering through the public prelude.

use sqlite_qb::prelude::*;

#[test]
fn report_query_with_cte_join_and_paging() -> QbResult<()> {
    let recent = cte(
        "recent",
        select([col("user_id").into(), count_star().alias("orders")])
            .from(table("orders"))
            .where_(col("created_at").ge(func("date", [text("now"), text("-30 days")])))
            .group_by([col("user_id")]),
    );
    let query = with(recent).select(
        select([table_col("u", "name"), table_col("r", "orders")])
            .from(
                table("users")
                    .alias("u")
                    .left_join(table("recent").alias("r"))
                    .on(table_col("r", "user_id").eq(table_col("u", "id"))),
            )
            .where_(table_col("u", "active"))
            .order_by([OrderingTerm::new(table_col("r", "orders")).desc().nulls_last()])
            .limit(param("?1")?)
            .offset(param("?2")?),
    );

    assert_eq!(
        query.build()?,
        concat!(
            r#"WITH "recent" AS (SELECT "user_id", count(*) AS "orders" FROM "orders" WHERE "created_at" >= date('now', '-30 days') GROUP BY "user_id") "#,
            r#"SELECT "u"."name", "r"."orders" FROM "users" AS "u" LEFT JOIN "recent" AS "r" ON "r"."user_id" = "u"."id" "#,
            r#"WHERE "u"."active" ORDER BY "r"."orders" DESC NULLS LAST LIMIT ?1 OFFSET ?2"#
        )
    );
    Ok(())
}

#[test]
fn upsert_from_select_needs_where() -> QbResult<()> {
    let stmt = insert_into("totals")
        .columns(["user_id", "n"])
        .select(
            select([col("user_id"), count_star()])
                .from(table("events"))
                .where_(true)
                .group_by([col("user_id")]),
        )
        .on_conflict(ConflictTarget::new(["user_id"])?.do_update([("n", col("n") + excluded("n"))])?);

    assert_eq!(
        stmt.build()?,
        concat!(
            r#"INSERT INTO "totals" ("user_id", "n") SELECT "user_id", count(*) FROM "events" WHERE TRUE GROUP BY "user_id" "#,
            r#"ON CONFLICT ("user_id") DO UPDATE SET "n" = "n" + "excluded"."n""#
        )
    );
    Ok(())
}

#[test]
fn schema_migration_script() -> QbResult<()> {
    let script = [
        begin().immediate().build()?,
        create_index("idx_orders_user")
            .if_not_exists()
            .on("orders", ["user_id"])?
            .build()?,
        create_view("order_counts")
            .columns(["user_id", "n"])?
            .as_select(
                select([col("user_id"), count_star()])
                    .from(table("orders"))
                    .group_by([col("user_id")]),
            )
            .build()?,
        drop_table("orders_old").if_exists().build()?,
        pragma("user_version").set(3).build()?,
        commit().build()?,
    ];

    assert_eq!(
        script,
        [
            "BEGIN IMMEDIATE TRANSACTION",
            r#"CREATE INDEX IF NOT EXISTS "idx_orders_user" ON "orders" ("user_id")"#,
            r#"CREATE VIEW "order_counts" ("user_id", "n") AS SELECT "user_id", count(*) FROM "orders" GROUP BY "user_id""#,
            r#"DROP TABLE IF EXISTS "orders_old""#,
            "PRAGMA user_version = 3",
            "COMMIT TRANSACTION",
        ]
    );
    Ok(())
}

#[test]
fn quoting_survives_hostile_names() -> QbResult<()> {
    let stmt = delete_from(("my schema", "we\"ird"))
        .where_(col("it's").eq(text("O'Brien")))
        .returning([col("id")]);
    assert_eq!(
        stmt.build()?,
        r#"DELETE FROM "my schema"."we""ird" WHERE "it's" = 'O''Brien' RETURNING "id""#
    );
    Ok(())
}

#[test]
fn explain_query_plan_of_compound() -> QbResult<()> {
    let query = select([col("a")])
        .from(table("x"))
        .union(select([col("a")]).from(table("y")))
        .order_by([col("a")]);
    assert_eq!(
        explain_query_plan(query).build()?,
        r#"EXPLAIN QUERY PLAN SELECT "a" FROM "x" UNION SELECT "a" FROM "y" ORDER BY "a""#
    );
    Ok(())
}

#[test]
fn invalid_parameters_are_rejected_before_rendering() {
    for good in ["?", "?7", ":user", "@u1", "$x"] {
        assert!(param(good).is_ok(), "{good} should be accepted");
    }
    for bad in ["?0", "?01", "$", "@", "? 1", ":user_id"] {
        let err = param(bad).unwrap_err();
        assert!(err.is_invalid_parameter(), "{bad} should be rejected");
    }
}
