use super::*;
use crate::aggregate::Aggregate;
use crate::error::BoxError;
use crate::pager::PagedResults;
use crate::sanitizer::OrderByList;
use crate::source::SourceValue;
use serde_json::json;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

fn pg() -> Builder {
    Builder::new(DialectInfo::postgres())
}

fn source(pairs: Vec<(&str, SourceValue)>) -> SharedDataSource {
    Arc::new(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<HashMap<_, _>>(),
    )
}

// ==================== NULL handling ====================

#[test]
fn absent_value_in_where_clause_is_null_check() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .must_add_param("status");
    assert_eq!(sql.raw_sql(), r#"SELECT * FROM t WHERE "status" IS NULL"#);
}

#[test]
fn absent_value_with_not_equal_is_not_null_check() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .set_param_operator("!=")
        .must_add_param("status");
    assert_eq!(sql.raw_sql(), r#"SELECT * FROM t WHERE "status" IS NOT NULL"#);
}

#[test]
fn absent_value_outside_where_clause_is_placeholder() {
    let mut sql = pg();
    sql.start_with("UPDATE t SET").must_add_param("status");
    assert_eq!(sql.raw_sql(), r#"UPDATE t SET "status"=:status"#);
}

#[test]
fn absent_value_with_other_operator_writes_nothing() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .set_param_operator(" LIKE ")
        .must_add_param("name");
    assert_eq!(sql.raw_sql(), "SELECT * FROM t");
}

#[test]
fn explicit_null_in_where_clause_is_null_check() {
    let mut sql = pg();
    sql.start_with("DELETE FROM t")
        .start_where_clause()
        .set_nullable_param("parent_id", None)
        .must_add_param("parent_id");
    assert_eq!(sql.raw_sql(), r#"DELETE FROM t WHERE "parent_id" IS NULL"#);
    assert!(sql.params().contains_key("parent_id"));
}

#[test]
fn end_where_clause_restores_placeholder_semantics() {
    let mut sql = pg();
    sql.start_where_clause().end_where_clause();
    assert_eq!(sql.context().mode(), ClauseMode::Plain);
    assert_eq!(sql.context().prefix(), " ");
    sql.start_with("UPDATE t SET").must_add_param("x");
    assert_eq!(sql.raw_sql(), r#"UPDATE t SET "x"=:x"#);
}

// ==================== Value sets ====================

#[test]
fn set_binding_renders_in_list() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .set_param_set("ids", ["1", "2", "3"])
        .must_add_param_for_column("ids", "id");

    assert_eq!(
        sql.raw_sql(),
        r#"SELECT * FROM t WHERE "id" IN (:ids_1,:ids_2,:ids_3)"#
    );
    assert_eq!(sql.param("ids_1"), Some("1"));
    assert_eq!(sql.param("ids_2"), Some("2"));
    assert_eq!(sql.param("ids_3"), Some("3"));
    assert_eq!(sql.params().get("ids"), Some(&None));
    assert!(sql.is_param_a_set("ids"));
    assert_eq!(sql.context().operator(), "=");
}

#[test]
fn set_binding_with_not_equal_renders_not_in() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .set_param_operator("<>")
        .set_param_set("ids", ["7", "8"])
        .must_add_param_for_column("ids", "id");

    assert_eq!(
        sql.raw_sql(),
        r#"SELECT * FROM t WHERE "id" NOT IN (:ids_1,:ids_2)"#
    );
    assert_eq!(sql.context().operator(), "<>");
}

#[test]
fn empty_set_binding_is_a_no_op() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .set_param_set("ids", Vec::<String>::new())
        .must_add_param_for_column("ids", "id");
    assert_eq!(sql.raw_sql(), "SELECT * FROM t");
}

#[test]
fn every_set_key_is_a_null_param() {
    let mut sql = pg();
    sql.set_param("k", "scalar").set_param_set("k", ["a"]);
    assert_eq!(sql.params().get("k"), Some(&None));
    assert_eq!(sql.param_set("k"), Some(&["a".to_string()][..]));

    sql.set_param("k", "back");
    assert_eq!(sql.param("k"), Some("back"));
    assert!(!sql.is_param_a_set("k"));
    assert_eq!(sql.param_set("k"), None);
}

#[test]
fn is_param_a_set_falls_back_to_data_source() {
    let mut sql = pg();
    sql.set_data_source(source(vec![("tags", SourceValue::from(vec!["a"]))]));
    assert!(sql.is_param_a_set("tags"));
    assert!(!sql.is_param_a_set("missing"));

    sql.set_param("tags", "local");
    assert!(!sql.is_param_a_set("tags"));
}

// ==================== Keys ====================

#[test]
fn unique_param_key_suffixes_without_gaps() {
    let mut sql = pg();
    assert_eq!(sql.unique_param_key("x"), "x");
    sql.set_param("x", "1").set_param("x2", "2");
    assert_eq!(sql.unique_param_key("x"), "x3");
}

// ==================== Data source ====================

#[test]
fn must_add_param_pulls_from_data_source() {
    let mut sql = pg();
    sql.set_data_source(source(vec![
        ("name", SourceValue::from("alice")),
        ("roles", SourceValue::from(vec!["admin", "dev"])),
    ]));
    sql.start_with("SELECT * FROM users")
        .start_where_clause()
        .must_add_param("name")
        .set_param_prefix(" AND ")
        .must_add_param_for_column("roles", "role");

    assert_eq!(
        sql.raw_sql(),
        r#"SELECT * FROM users WHERE "name"=:name AND "role" IN (:roles_1,:roles_2)"#
    );
    assert_eq!(sql.param("name"), Some("alice"));
    assert_eq!(sql.param("roles_2"), Some("dev"));
}

#[test]
fn locally_bound_value_wins_over_data_source() {
    let mut sql = pg();
    sql.set_data_source(source(vec![("name", SourceValue::from("alice"))]));
    sql.set_param("name", "bob").start_with("UPDATE t SET").must_add_param("name");
    assert_eq!(sql.param("name"), Some("bob"));
}

#[test]
fn add_param_if_defined_omits_undefined_keys() {
    let mut sql = pg();
    sql.set_data_source(source(vec![
        ("name", SourceValue::from("bob")),
        ("nickname", SourceValue::Null),
    ]));
    sql.start_with("UPDATE users SET")
        .add_param_if_defined("name")
        .set_param_prefix(", ")
        .add_param_if_defined("age")
        .add_param_for_column_if_defined("nickname", "nick");

    assert_eq!(
        sql.raw_sql(),
        r#"UPDATE users SET "name"=:name, "nick"=:nickname"#
    );
    assert!(!sql.params().contains_key("age"));
    assert_eq!(sql.params().get("nickname"), Some(&None));
}

#[test]
fn add_param_if_defined_without_source_writes_nothing() {
    let mut sql = pg();
    sql.start_with("UPDATE t SET").add_param_if_defined("x");
    assert_eq!(sql.raw_sql(), "UPDATE t SET");
}

#[test]
fn append_param_bypasses_data_source() {
    let mut sql = pg();
    sql.set_data_source(source(vec![("id", SourceValue::from("from-source"))]));
    sql.start_with("DELETE FROM t")
        .start_where_clause()
        .append_param("id", "5");
    assert_eq!(sql.raw_sql(), r#"DELETE FROM t WHERE "id"=:id"#);
    assert_eq!(sql.param("id"), Some("5"));
}

#[test]
fn json_object_works_as_data_source() {
    let serde_json::Value::Object(body) = json!({ "name": "carol", "ids": [1, 2] }) else {
        unreachable!()
    };
    let mut sql = pg();
    sql.set_data_source(Arc::new(body));
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .must_add_param_for_column("ids", "id");
    assert_eq!(sql.raw_sql(), r#"SELECT * FROM t WHERE "id" IN (:ids_1,:ids_2)"#);
    assert_eq!(sql.param("ids_2"), Some("2"));
}

// ==================== Defaults ====================

#[test]
fn value_if_null_fills_null_only() {
    let mut sql = pg();
    sql.set_data_source(source(vec![
        ("created_by", SourceValue::Null),
        ("qty", SourceValue::from("0")),
    ]));
    sql.set_param_value_if_null("created_by", "admin")
        .set_param_value_if_null("qty", "1")
        .start_with("INSERT INTO t SET")
        .must_add_param("created_by");

    assert_eq!(sql.param("created_by"), Some("admin"));
    assert_eq!(sql.param("qty"), Some("0"));
    assert_eq!(sql.raw_sql(), r#"INSERT INTO t SET "created_by"=:created_by"#);
}

#[test]
fn value_if_empty_fills_blank_and_zero() {
    let mut sql = pg();
    sql.set_data_source(source(vec![
        ("qty", SourceValue::from("0")),
        ("note", SourceValue::from("")),
        ("name", SourceValue::from("bob")),
    ]));
    sql.set_param_value_if_empty("qty", "1")
        .set_param_value_if_empty("note", "n/a")
        .set_param_value_if_empty("name", "anon")
        .set_param_value_if_empty("missing", "dflt");

    assert_eq!(sql.param("qty"), Some("1"));
    assert_eq!(sql.param("note"), Some("n/a"));
    assert_eq!(sql.param("name"), Some("bob"));
    assert_eq!(sql.param("missing"), Some("dflt"));
}

#[test]
fn empty_set_is_replaced_by_scalar_default() {
    let mut sql = pg();
    sql.set_data_source(source(vec![("tags", SourceValue::List(Vec::new()))]));
    sql.set_param_value_if_null("tags", "none");

    assert_eq!(sql.param("tags"), Some("none"));
    assert!(!sql.is_param_a_set("tags"));
}

// ==================== Field lists, ordering, limits ====================

#[test]
fn field_list_and_select_all() {
    let mut sql = pg();
    sql.start_with("SELECT").add_field_list(&["id", "name"]).add("FROM t");
    assert_eq!(sql.raw_sql(), "SELECT id, name FROM t");

    sql.start_with("SELECT").add_field_list::<&str>(&[]).add("FROM t");
    assert_eq!(sql.raw_sql(), "SELECT * FROM t");
}

#[test]
fn field_list_uses_prefix_as_qualifier() {
    let mut sql = pg();
    sql.start_with("SELECT")
        .set_param_prefix("u.")
        .add_field_list(&["id", "name"])
        .add("FROM users u");
    assert_eq!(sql.raw_sql(), "SELECT u.id, u.name FROM users u");
}

#[test]
fn order_by_defaults_unknown_directions_to_ascending() {
    let order = OrderByList::from([
        ("name".to_string(), "desc".to_string()),
        ("id".to_string(), "sideways".to_string()),
    ]);
    let mut sql = pg();
    sql.start_with("SELECT * FROM t").apply_order_by_list(Some(&order));
    assert_eq!(sql.raw_sql(), "SELECT * FROM t ORDER BY name DESC,id ASC");

    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .apply_sort_list(None)
        .apply_order_by_list(Some(&OrderByList::new()));
    assert_eq!(sql.raw_sql(), "SELECT * FROM t");
}

#[test]
fn query_limit_rules() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t").add_query_limit(10, 0);
    assert_eq!(sql.raw_sql(), "SELECT * FROM t LIMIT 10");

    sql.start_with("SELECT * FROM t").add_query_limit(10, 30);
    assert_eq!(sql.raw_sql(), "SELECT * FROM t LIMIT 10 OFFSET 30");

    sql.start_with("SELECT * FROM t").add_query_limit(0, 30);
    assert_eq!(sql.raw_sql(), "SELECT * FROM t");
}

#[test]
fn query_limit_honours_pagination_style() {
    let dialect = DialectInfo::custom("ansi", '"', false)
        .with_pagination(crate::dialect::PaginationStyle::OffsetFetch);
    let mut sql = Builder::new(dialect);
    sql.start_with("SELECT * FROM t").add_query_limit(5, 10);
    assert_eq!(
        sql.raw_sql(),
        "SELECT * FROM t OFFSET 10 ROWS FETCH FIRST 5 ROWS ONLY"
    );
}

struct Pager {
    size: i64,
    offset: i64,
}

impl PagedResults for Pager {
    fn is_total_row_count_desired(&self) -> bool {
        true
    }

    fn pager_page_size(&self) -> i64 {
        self.size
    }

    fn pager_query_offset(&self) -> i64 {
        self.offset
    }
}

#[test]
fn query_limit_from_pager() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .apply_query_limit_from_pager(&Pager { size: 25, offset: 50 });
    assert_eq!(sql.raw_sql(), "SELECT * FROM t LIMIT 25 OFFSET 50");
}

struct UserFields;

impl Sanitizer for UserFields {
    fn defined_fields(&self) -> Vec<String> {
        vec!["id".into(), "name".into(), "created_at".into()]
    }

    fn is_field_sortable(&self, name: &str) -> bool {
        matches!(name, "name" | "created_at")
    }

    fn default_sort(&self) -> OrderByList {
        OrderByList::from([("created_at".to_string(), "DESC".to_string())])
    }
}

#[test]
fn sanitizer_prunes_order_by_and_falls_back_to_default() {
    let mut sql = pg();
    sql.set_sanitizer(Arc::new(UserFields));

    let requested = OrderByList::from([("name".to_string(), "ASC".to_string())]);
    sql.start_with("SELECT * FROM users")
        .apply_order_by_from_sanitizer(Some(&requested));
    assert_eq!(sql.raw_sql(), "SELECT * FROM users ORDER BY name ASC");

    let hostile = OrderByList::from([("1; DROP TABLE users".to_string(), "ASC".to_string())]);
    sql.start_with("SELECT * FROM users")
        .apply_order_by_from_sanitizer(Some(&hostile));
    assert_eq!(sql.raw_sql(), "SELECT * FROM users ORDER BY created_at DESC");
}

#[test]
fn sanitized_field_list() {
    let mut sql = pg();
    sql.start_with("SELECT")
        .add_sanitized_field_list(&["id".to_string(), "password".to_string()])
        .add("FROM users");
    assert_eq!(sql.raw_sql(), "SELECT * FROM users");

    sql.set_sanitizer(Arc::new(UserFields));
    sql.start_with("SELECT")
        .add_sanitized_field_list(&["id".to_string(), "password".to_string()])
        .add("FROM users");
    assert_eq!(sql.raw_sql(), "SELECT id FROM users");
}

// ==================== Field list replacement ====================

#[test]
fn replace_select_fields_respects_hints() {
    let mut sql = pg();
    sql.start_with(
        "SELECT /* FIELDLIST */ t.id, (SELECT max(v) FROM u WHERE u.t_id = t.id) AS top \
         /* /FIELDLIST */ FROM t WHERE t.x IN (SELECT y FROM w)",
    );
    sql.replace_select_fields_with(&["a", "b"]);
    assert_eq!(
        sql.raw_sql(),
        "SELECT a, b FROM t WHERE t.x IN (SELECT y FROM w)"
    );
}

#[test]
fn replace_select_fields_without_hints_stops_at_first_from() {
    let mut sql = pg();
    sql.start_with("SELECT id, name FROM t WHERE id IN (SELECT id FROM u)");
    sql.replace_select_fields_with(&["count(*)"]);
    assert_eq!(
        sql.raw_sql(),
        "SELECT count(*) FROM t WHERE id IN (SELECT id FROM u)"
    );
}

#[test]
fn replace_select_fields_with_nothing_is_a_no_op() {
    let mut sql = pg();
    sql.start_with("SELECT id FROM t");
    sql.replace_select_fields_with::<&str>(&[]);
    assert_eq!(sql.raw_sql(), "SELECT id FROM t");
}

#[test]
fn aggregate_clone_of_hinted_query() {
    let mut sql = pg();
    sql.start_with("SELECT /* FIELDLIST */ id, (SELECT 1 FROM u) AS one /* /FIELDLIST */ FROM t");
    let def = Aggregate::new().with("n", "count(id)");
    let totals = sql.clone_as_aggregate(Some(&def));
    assert_eq!(totals.raw_sql(), "SELECT count(id) AS n FROM t");
}

// ==================== Composition ====================

#[test]
fn filter_is_applied_with_its_params() {
    let base = pg();
    let mut filter = base.sibling();
    filter
        .start_filter()
        .append_param("status", "active")
        .must_add_param("deleted_at");
    assert_eq!(filter.raw_sql(), r#"true AND "status"=:status AND "deleted_at" IS NULL"#);

    let mut sql = base;
    sql.start_with("SELECT * FROM users")
        .start_where_clause()
        .apply_filter(&filter);
    assert_eq!(
        sql.raw_sql(),
        r#"SELECT * FROM users WHERE true AND "status"=:status AND "deleted_at" IS NULL"#
    );
    assert_eq!(sql.param("status"), Some("active"));
}

#[test]
fn mysql_filter_seed_is_one() {
    let mut filter = Builder::new(DialectInfo::mysql());
    filter.start_filter().append_param("a", "1");
    assert_eq!(filter.raw_sql(), "1 AND `a`=:a");
}

#[test]
fn empty_filter_only_merges_params() {
    let mut filter = pg();
    filter.set_param("k", "v");
    let mut sql = pg();
    sql.start_with("SELECT 1").apply_filter(&filter);
    assert_eq!(sql.raw_sql(), "SELECT 1");
    assert_eq!(sql.param("k"), Some("v"));
}

#[test]
fn merged_params_overwrite_colliding_keys() {
    let mut filter = pg();
    filter.start_filter().append_param("k", "from-filter");
    let mut sql = pg();
    sql.set_param("k", "mine").start_with("SELECT * FROM t").apply_filter(&filter);
    assert_eq!(sql.param("k"), Some("from-filter"));
}

#[test]
fn sub_query_is_embedded_with_in() {
    let mut sql = pg();
    let mut sub = sql.sibling();
    sub.start_with("SELECT user_id FROM memberships")
        .start_where_clause()
        .set_param_set("groups", ["1", "2"])
        .must_add_param_for_column("groups", "group_id");

    sql.start_with("SELECT * FROM users")
        .start_where_clause()
        .add_sub_query_for_column(&sub, "id");
    assert_eq!(
        sql.raw_sql(),
        r#"SELECT * FROM users WHERE "id" IN (SELECT user_id FROM memberships WHERE "group_id" IN (:groups_1,:groups_2))"#
    );
    assert_eq!(sql.param("groups_1"), Some("1"));
    assert_eq!(sql.param_set("groups"), Some(&["1".to_string(), "2".to_string()][..]));
    assert_eq!(sql.context().operator(), "=");
}

#[test]
fn sub_query_with_not_equal_uses_not_in() {
    let mut sub = pg();
    sub.start_with("SELECT id FROM banned");
    let mut sql = pg();
    sql.start_with("SELECT * FROM users")
        .start_where_clause()
        .set_param_operator("!=")
        .add_sub_query_for_column(&sub, "id");
    assert_eq!(
        sql.raw_sql(),
        r#"SELECT * FROM users WHERE "id" NOT IN (SELECT id FROM banned)"#
    );
}

// ==================== Rendering ====================

#[test]
fn positional_rendering_follows_text_order() {
    let mut sql = pg();
    sql.set_param("b", "2")
        .start_with("SELECT * FROM t")
        .start_where_clause()
        .append_param("a", "1")
        .set_param_prefix(" AND ")
        .must_add_param("b");

    assert_eq!(sql.render(), r#"SELECT * FROM t WHERE "a"=$1 AND "b"=$2"#);
    assert_eq!(sql.positional_args(), ["1", "2"]);
    assert_eq!(sql.raw_sql(), r#"SELECT * FROM t WHERE "a"=:a AND "b"=:b"#);
}

#[test]
fn rendering_is_repeatable() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .append_param("a", "1");
    let first = sql.render().to_string();
    let second = sql.render().to_string();
    assert_eq!(first, second);
    assert_eq!(sql.positional_args(), ["1"]);
}

#[test]
fn named_dialect_renders_verbatim() {
    let mut sql = Builder::new(DialectInfo::sqlite());
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .append_param("a", "1");
    assert_eq!(sql.render(), r#"SELECT * FROM t WHERE "a"=:a"#);
    assert!(sql.positional_args().is_empty());
}

#[test]
fn mysql_renders_question_marks() {
    let mut sql = Builder::new(DialectInfo::mysql());
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .set_param_set("ids", ["4", "5"])
        .must_add_param_for_column("ids", "id");
    assert_eq!(sql.render(), "SELECT * FROM t WHERE `id` IN (?,?)");
    assert_eq!(sql.positional_args(), ["4", "5"]);
}

#[test]
fn request_keys_that_are_not_identifiers_render_positionally() {
    let mut sql = pg();
    sql.start_with("UPDATE t SET").append_param("first-name", "ann");
    assert_eq!(sql.render(), r#"UPDATE t SET "first-name"=$1"#);
    assert_eq!(sql.positional_args(), ["ann"]);

    let mut sql = Builder::new(DialectInfo::mysql());
    sql.start_with("UPDATE t SET").append_param("größe", "9");
    assert_eq!(sql.render(), "UPDATE t SET `größe`=?");
    assert_eq!(sql.positional_args(), ["9"]);
}

#[test]
fn named_args_skip_nulls_and_sets() {
    let mut sql = pg();
    sql.set_param("a", "1")
        .set_nullable_param("b", None)
        .set_param_set("c", ["x"]);
    let named = sql.named_args();
    assert_eq!(named.len(), 1);
    assert_eq!(named.get("a").map(String::as_str), Some("1"));
}

#[test]
fn statement_snapshot_serializes() {
    let mut sql = pg();
    sql.start_with("SELECT * FROM t")
        .start_where_clause()
        .append_param("a", "1");
    let stmt = sql.statement();
    assert_eq!(
        serde_json::to_value(&stmt).unwrap(),
        json!({
            "sql": r#"SELECT * FROM t WHERE "a"=$1"#,
            "args": ["1"],
            "named": { "a": "1" },
        })
    );
}

// ==================== Lifecycle ====================

#[test]
fn clone_is_independent() {
    let mut original = pg();
    original.start_with("SELECT 1").set_param("k", "1");

    let mut copy = original.clone();
    copy.set_param("k", "2")
        .set_param("extra", "x")
        .set_param_set("s", ["a"])
        .add("UNION SELECT 2");

    assert_eq!(original.param("k"), Some("1"));
    assert!(!original.params().contains_key("extra"));
    assert!(original.param_sets().is_empty());
    assert_eq!(original.raw_sql(), "SELECT 1");
}

#[test]
fn reset_keeps_dialect_only() {
    let mut sql = Builder::new(DialectInfo::mysql());
    sql.start_with("SELECT 1")
        .start_where_clause()
        .set_param_operator("<>")
        .set_param("a", "1");
    sql.reset();

    assert_eq!(sql.raw_sql(), "");
    assert!(sql.params().is_empty());
    assert_eq!(sql.context(), &ParamContext::default());
    assert_eq!(sql.quoted("x"), "`x`");
}

#[test]
fn from_config_requires_a_dialect() {
    assert!(matches!(
        Builder::from_config(&BuilderConfig::new()),
        Err(crate::error::BuildError::MissingDialect)
    ));
    let sql = Builder::from_config(&BuilderConfig::new().with_driver("sqlite3")).unwrap();
    assert!(sql.dialect().supports_named_params);
}

#[derive(Default)]
struct CountingController {
    begins: AtomicUsize,
    commits: AtomicUsize,
}

impl TransactionController for CountingController {
    fn in_transaction(&self) -> bool {
        self.begins.load(Ordering::SeqCst) > self.commits.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<(), BoxError> {
        self.begins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn commit(&self) -> Result<(), BoxError> {
        self.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn rollback(&self) -> Result<(), BoxError> {
        Ok(())
    }
}

#[test]
fn nested_transactions_reach_controller_once() {
    let ctl = Arc::new(CountingController::default());
    let mut sql = pg();
    sql.set_transaction_controller(ctl.clone());

    sql.begin_transaction().unwrap();
    sql.begin_transaction().unwrap();
    assert_eq!(sql.transaction_depth(), 2);
    sql.commit_transaction().unwrap();
    sql.commit_transaction().unwrap();
    sql.commit_transaction().unwrap();

    assert_eq!(sql.transaction_depth(), 0);
    assert_eq!(ctl.begins.load(Ordering::SeqCst), 1);
    assert_eq!(ctl.commits.load(Ordering::SeqCst), 1);
}
