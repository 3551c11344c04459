use super::*;
use crate::node::SqlNode;
use crate::select::select;
use crate::slot::TextSlot;

fn sql(expr: Expr) -> String {
    expr.to_sql().unwrap()
}

// ==================== Precedence ====================

#[test]
fn binary_grouping_follows_the_tree() {
    assert_eq!(sql((col("a") + col("b")) * col("c")), r#"("a" + "b") * "c""#);
    assert_eq!(sql(col("a") + col("b") * col("c")), r#""a" + "b" * "c""#);
    assert_eq!(sql(col("a") * col("b") + col("c")), r#""a" * "b" + "c""#);
}

#[test]
fn same_level_right_nesting_is_parenthesized() {
    assert_eq!(sql(col("a") - col("b") - col("c")), r#""a" - "b" - "c""#);
    assert_eq!(sql(col("a") - (col("b") - col("c"))), r#""a" - ("b" - "c")"#);
    assert_eq!(
        sql(col("a").or(col("b")).or(col("c"))),
        r#""a" OR "b" OR "c""#
    );
}

#[test]
fn comparisons_and_logic() {
    let e = col("a").eq(1).and(col("b").gt(2).or(col("c").ne(3)));
    assert_eq!(sql(e), r#""a" = 1 AND ("b" > 2 OR "c" <> 3)"#);

    let e = col("a").ge(col("b").lt(col("c")));
    assert_eq!(sql(e), r#""a" >= ("b" < "c")"#);

    let e = col("a").lt(col("b")).eq(true);
    assert_eq!(sql(e), r#""a" < "b" = TRUE"#);
}

#[test]
fn ordering_binds_tighter_than_equality() {
    let e = col("a").eq(col("b")).ge(col("c"));
    assert_eq!(sql(e), r#"("a" = "b") >= "c""#);

    let e = col("a").ge(col("b")).eq(col("c"));
    assert_eq!(sql(e), r#""a" >= "b" = "c""#);

    let e = !col("a").ge(col("b"));
    assert_eq!(sql(e), r#"NOT "a" >= "b""#);
}

#[test]
fn concat_binds_tighter_than_arithmetic() {
    let e = col("a").concat(col("b")) * 2;
    assert_eq!(sql(e), r#""a" || "b" * 2"#);

    let e = (col("a") * 2).concat(col("b"));
    assert_eq!(sql(e), r#"("a" * 2) || "b""#);
}

#[test]
fn json_extract_operators() {
    let e = col("doc").extract("$.a").extract_text("$.b");
    assert_eq!(sql(e), r#""doc" -> '$.a' ->> '$.b'"#);
}

#[test]
fn prefix_operators() {
    assert_eq!(sql(-col("a")), r#"-"a""#);
    assert_eq!(sql(-(col("a") + 1)), r#"-("a" + 1)"#);
    assert_eq!(sql(-(-col("a"))), r#"-(-"a")"#);
    assert_eq!(sql(-lit(-5)), "-(-5)");
    assert_eq!(sql(col("a").bit_not()), r#"~"a""#);
    assert_eq!(sql(col("a").unary_plus()), r#"+"a""#);
}

#[test]
fn not_operator() {
    assert_eq!(sql(!col("a").eq(1)), r#"NOT "a" = 1"#);
    assert_eq!(sql(!(!col("a"))), r#"NOT (NOT "a")"#);
    assert_eq!(sql((!col("a")).eq(col("b"))), r#"(NOT "a") = "b""#);
    assert_eq!(sql(!col("a").and(col("b"))), r#"NOT ("a" AND "b")"#);
}

#[test]
fn negative_literals_group_as_operands() {
    assert_eq!(sql(lit(-5)), "-5");
    assert_eq!(sql(col("a") - lit(-5)), r#""a" - -5"#);
    assert_eq!(sql(lit(-5).collate("binary")), "(-5) COLLATE binary");
}

#[test]
fn postfix_null_tests() {
    assert_eq!(sql(col("a").is_null()), r#""a" ISNULL"#);
    assert_eq!(sql(col("a").not_null()), r#""a" NOTNULL"#);
    assert_eq!(sql(col("a").not_space_null()), r#""a" NOT NULL"#);
    assert_eq!(sql((col("a") + 1).is_null()), r#""a" + 1 ISNULL"#);
    assert_eq!(sql(col("a").and(col("b")).is_null()), r#"("a" AND "b") ISNULL"#);
    assert_eq!(sql(col("a").is_null().and(col("b"))), r#""a" ISNULL AND "b""#);
}

#[test]
fn raw_fragments_are_always_grouped() {
    assert_eq!(sql(raw("x + 1")), "x + 1");
    assert_eq!(sql(raw("x + 1") * 2), "(x + 1) * 2");
    assert_eq!(sql(col("a").eq(raw("b OR c"))), r#""a" = (b OR c)"#);
}

// ==================== Special forms ====================

#[test]
fn cast_never_groups_its_operand() {
    let e = (col("a") + col("b")).cast("INTEGER");
    assert_eq!(sql(e), r#"CAST ("a" + "b" AS INTEGER)"#);
    assert_eq!(sql(col("a").cast("VARCHAR(10)")), r#"CAST ("a" AS VARCHAR(10))"#);
    assert_eq!(sql(col("a").cast("my type")), r#"CAST ("a" AS my type)"#);
    assert_eq!(sql(col("a").cast("1bad")), r#"CAST ("a" AS "1bad")"#);
}

#[test]
fn collate_binds_tightest() {
    assert_eq!(sql(col("a").collate("NOCASE")), r#""a" COLLATE NOCASE"#);
    assert_eq!(
        sql((col("a") + col("b")).collate("NOCASE")),
        r#"("a" + "b") COLLATE NOCASE"#
    );
    assert_eq!(
        sql(col("a").collate("my coll").eq(text("x"))),
        r#""a" COLLATE "my coll" = 'x'"#
    );
}

#[test]
fn between_forms() {
    assert_eq!(sql(col("a").between(1, 10)), r#""a" BETWEEN 1 AND 10"#);
    assert_eq!(
        sql((col("a") + 1).not_between(col("lo"), col("hi") * 2)),
        r#""a" + 1 NOT BETWEEN "lo" AND "hi" * 2"#
    );
    assert_eq!(
        sql(col("a").between(col("x").eq(1), col("y").and(col("z")))),
        r#""a" BETWEEN ("x" = 1) AND ("y" AND "z")"#
    );
    assert_eq!(
        sql(col("a").eq(1).between(0, 1)),
        r#""a" = 1 BETWEEN 0 AND 1"#
    );
}

#[test]
fn in_forms() {
    assert_eq!(sql(col("x").in_list(Vec::<Expr>::new())), r#""x" IN ()"#);
    assert_eq!(sql(col("x").in_list([1, 2, 3])), r#""x" IN (1, 2, 3)"#);
    assert_eq!(sql(col("x").not_in_list(["a", "b"])), r#""x" NOT IN ('a', 'b')"#);
    assert_eq!(
        sql(col("x").in_select(select([col("id")]).from(crate::table::table("t")))),
        r#""x" IN (SELECT "id" FROM "t")"#
    );
    assert_eq!(sql(col("x").in_table(("main", "ids"))), r#""x" IN "main"."ids""#);
    assert_eq!(sql(col("x").not_in_table("ids")), r#""x" NOT IN "ids""#);
    assert_eq!(
        sql(col("x").in_table_function("json_each", [col("doc")])),
        r#""x" IN "json_each"("doc")"#
    );
    assert_eq!(
        sql(col("a").or(col("b")).in_list([1])),
        r#"("a" OR "b") IN (1)"#
    );
}

#[test]
fn pattern_matching() {
    assert_eq!(sql(col("name").like("a%")), r#""name" LIKE 'a%'"#);
    assert_eq!(sql(col("name").not_glob("a*")), r#""name" NOT GLOB 'a*'"#);
    assert_eq!(sql(col("name").regexp("^a")), r#""name" REGEXP '^a'"#);
    assert_eq!(sql(col("body").matches("rust")), r#""body" MATCH 'rust'"#);

    let escaped = col("name").like("50\\%").escape("\\").unwrap();
    assert_eq!(sql(escaped), r#""name" LIKE '50\%' ESCAPE '\'"#);
}

#[test]
fn escape_requires_a_pattern_match() {
    let err = col("a").eq(1).escape("\\").unwrap_err();
    assert!(matches!(err, QbError::Validation(_)));
}

#[test]
fn function_calls() {
    assert_eq!(sql(func("lower", [col("a")])), r#"lower("a")"#);
    assert_eq!(sql(func("random", Vec::<Expr>::new())), "random()");
    assert_eq!(sql(func("my func", [1, 2])), r#""my func"(1, 2)"#);
    assert_eq!(sql(count_star()), "count(*)");
    assert_eq!(
        sql(func_distinct("count", [col("a")]).unwrap()),
        r#"count(DISTINCT "a")"#
    );
}

#[test]
fn distinct_requires_exactly_one_argument() {
    assert_eq!(
        func_distinct("count", Vec::<Expr>::new()).unwrap_err(),
        QbError::DistinctArity(0)
    );
    assert_eq!(
        func_distinct("count", [col("a"), col("b")]).unwrap_err(),
        QbError::DistinctArity(2)
    );
}

#[test]
fn row_values() {
    assert_eq!(sql(row([col("a"), col("b")]).unwrap()), r#"("a", "b")"#);
    assert_eq!(
        row(Vec::<Expr>::new()).unwrap_err(),
        QbError::EmptyList("row expression")
    );
    let e = row([col("a"), col("b")]).unwrap().eq(row([1, 2]).unwrap());
    assert_eq!(sql(e), r#"("a", "b") = (1, 2)"#);
}

#[test]
fn raise_forms() {
    assert_eq!(sql(Expr::raise_ignore()), "RAISE(IGNORE)");
    assert_eq!(sql(Expr::raise_abort("it's bad")), "RAISE(ABORT, 'it''s bad')");
    assert_eq!(sql(Expr::raise_rollback("x")), "RAISE(ROLLBACK, 'x')");
    assert_eq!(sql(Expr::raise_fail("x")), "RAISE(FAIL, 'x')");
}

#[test]
fn case_expressions() {
    let e = case(None)
        .when(col("a").gt(0), text("pos"))
        .when(col("a").lt(0), text("neg"))
        .otherwise(text("zero"))
        .end()
        .unwrap();
    assert_eq!(
        sql(e),
        r#"CASE WHEN "a" > 0 THEN 'pos' WHEN "a" < 0 THEN 'neg' ELSE 'zero' END"#
    );

    let e = case(Some(col("k"))).when(1, text("one")).end().unwrap();
    assert_eq!(sql(e), r#"CASE "k" WHEN 1 THEN 'one' END"#);

    assert_eq!(
        case(None).end().unwrap_err(),
        QbError::EmptyList("CASE branch list")
    );
}

#[test]
fn subqueries() {
    let inner = select([func("max", [col("id")])]).from(crate::table::table("t"));
    assert_eq!(
        sql(col("id").eq(subquery(inner.clone()))),
        r#""id" = (SELECT max("id") FROM "t")"#
    );
    assert_eq!(sql(!exists(inner)), r#"NOT EXISTS (SELECT max("id") FROM "t")"#);
}

// ==================== Leaves ====================

#[test]
fn literals() {
    assert_eq!(sql(null()), "NULL");
    assert_eq!(sql(lit(true)), "TRUE");
    assert_eq!(sql(lit(42)), "42");
    assert_eq!(sql(lit(2.5)), "2.5");
    assert_eq!(sql(lit(3.0)), "3.0");
    assert_eq!(sql(lit(f64::INFINITY)), "9e999");
    assert_eq!(sql(lit(f64::NEG_INFINITY)), "-9e999");
    assert_eq!(sql(lit(f64::NAN)), "NULL");
    assert_eq!(sql(blob([0xde_u8, 0xad, 0x01])), "X'DEAD01'");
    assert_eq!(sql(text("it's")), "'it''s'");
    assert_eq!(sql(Expr::current_timestamp()), "CURRENT_TIMESTAMP");
    assert_eq!(sql(Expr::from(None::<i64>)), "NULL");
    assert_eq!(sql(Expr::from(Some(7))), "7");
}

#[test]
fn column_references() {
    assert_eq!(sql(col("a")), r#""a""#);
    assert_eq!(sql(table_col("t", "a")), r#""t"."a""#);
    assert_eq!(sql(schema_col("main", "t", "a\"b")), r#""main"."t"."a""b""#);
}

#[test]
fn binding_parameters() {
    for marker in ["?", "?1", "?42", ":name1", "@x", "$y"] {
        assert_eq!(sql(param(marker).unwrap()), marker);
    }
    for marker in ["?0", "?01", "", ":", "name", ":a-b", "?x"] {
        let err = param(marker).unwrap_err();
        assert!(err.is_invalid_parameter(), "accepted {marker:?}");
    }
}

// ==================== Slots ====================

#[test]
fn expression_slot_isolation() {
    let slot = ExprSlot::with(col("x"));
    let e = Expr::from(slot.clone()) + 1;
    let frozen = e.snapshot().unwrap();
    slot.set(col("y"));
    assert_eq!(sql(e.clone()), r#""y" + 1"#);
    assert_eq!(sql(frozen.clone()), r#""x" + 1"#);
    assert_eq!(frozen.to_sql().unwrap(), frozen.to_sql().unwrap());
}

#[test]
fn slot_grouping_uses_current_value() {
    let slot = ExprSlot::with(col("a") + col("b"));
    let e = Expr::from(slot.clone()) * 2;
    assert_eq!(sql(e.clone()), r#"("a" + "b") * 2"#);
    slot.set(col("a"));
    assert_eq!(sql(e), r#""a" * 2"#);
}

#[test]
fn unset_slot_fails_at_render_and_snapshot() {
    let e = col("a").eq(ExprSlot::new());
    assert_eq!(e.to_sql().unwrap_err(), QbError::UnsetPlaceholder("expression"));
    assert!(e.snapshot().unwrap_err().is_unset_placeholder());
}

#[test]
fn text_slots_feed_literals_and_raw_fragments() {
    let value = TextSlot::with("one".to_string());
    let fragment = TextSlot::with("1 + 1".to_string());
    let e = text(value.clone()).eq(raw(fragment.clone()));
    let frozen = e.snapshot().unwrap();
    value.set("two".to_string());
    fragment.set("2".to_string());
    assert_eq!(sql(e), "'two' = (2)");
    assert_eq!(sql(frozen), "'one' = (1 + 1)");
}
