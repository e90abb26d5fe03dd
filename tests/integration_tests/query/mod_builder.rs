use phonecom_sdk::query::{Operator, compile_url};
use phonecom_sdk::{Builder, Direction, MemoryClient, SdkError};
use serde_json::{Value, json};
use std::sync::Arc;

fn builder() -> Builder {
    let mut b = Builder::new(Arc::new(MemoryClient::new()));
    b.from("/sms");
    b
}

#[test]
fn value_operators_reject_null_and_absent_values() {
    for op in Operator::ALL {
        let mut b = builder();
        let absent = b.filter("col", Some(op), None).map(|_| ());
        let null = b.filter("col", Some(op), Some(Value::Null)).map(|_| ());
        match op.arity() {
            0 => {
                assert!(absent.is_ok(), "{op} without value");
                assert!(null.is_ok(), "{op} with null");
            }
            _ if op == Operator::Eq => assert!(absent.is_ok() && null.is_ok()),
            _ => {
                assert!(matches!(absent, Err(SdkError::InvalidArgument(_))), "{op} without value");
                assert!(matches!(null, Err(SdkError::InvalidArgument(_))), "{op} with null");
            }
        }
    }
}

#[test]
fn unknown_operator_names_are_rejected() {
    let mut b = builder();
    let err = b.where_str("to", "regex", Some(json!(".*"))).unwrap_err();
    assert!(err.to_string().starts_with("Invalid argument"));
    assert!(b.filters().is_empty());
}

#[test]
fn every_non_asc_direction_sorts_descending() {
    for dir in ["DESC", "desc", "banana", "", "ascending"] {
        let mut b = builder();
        b.order_by("created", dir);
        let q = b.compile_query();
        assert_eq!(q.sort_for("created"), Some(Direction::Desc), "{dir:?}");
        assert_eq!(q.to_pairs(), vec![("sort[created]".to_string(), "desc".to_string())]);
    }
    for dir in ["asc", "ASC", "aSc"] {
        let mut b = builder();
        b.order_by("created", dir);
        assert_eq!(b.compile_query().sort_for("created"), Some(Direction::Asc));
    }
}

#[test]
fn later_sort_on_same_column_wins() {
    let mut b = builder();
    b.order_by_asc("id").order_by_desc("created").order_by_desc("id");
    let q = b.compile_query();
    assert_eq!(q.sort, vec![("id".to_string(), Direction::Desc), ("created".to_string(), Direction::Desc)]);
}

#[test]
fn offset_clamps_and_limit_ignores_non_positive() {
    let mut b = builder();
    b.offset(-5);
    assert_eq!(b.compile_query().offset, Some(0));
    b.limit(25);
    b.limit(0);
    b.limit(-1);
    assert_eq!(b.compile_query().limit, Some(25));
}

#[test]
fn for_page_uses_configured_page_length() {
    let mut b = builder();
    b.for_page(2);
    let q = b.compile_query();
    assert_eq!((q.offset, q.limit), (Some(15), Some(15)));
    b.for_page_with(4, 10);
    let q = b.compile_query();
    assert_eq!((q.offset, q.limit), (Some(30), Some(10)));
}

#[test]
fn compiled_parameters_in_bracket_form() {
    let mut b = builder();
    b.where_eq("status", "active")
        .where_eq("flag", true)
        .where_eq("hidden", false)
        .where_in("id", [1, 2])
        .order_by_desc("created")
        .take(10)
        .skip(20);
    let pairs = b.compile_query().to_pairs();
    let expected: Vec<(String, String)> = [
        ("filters[status][]", "eq:active"),
        ("filters[flag][]", "eq:1"),
        ("filters[hidden][]", "eq:"),
        ("filters[id][]", "in:1,2"),
        ("sort[created]", "desc"),
        ("limit", "10"),
        ("offset", "20"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(pairs, expected);
}

#[test]
fn nested_json_form() {
    let mut b = builder();
    b.where_not_empty("to").where_between("created", 1, 2).order_by_asc("id");
    assert_eq!(
        b.compile_query().to_json(),
        json!({
            "filters": {"to": ["not-empty"], "created": ["between:1,2"]},
            "sort": {"id": "asc"}
        })
    );
}

#[test]
fn url_placeholders() {
    let id = json!(42);
    assert_eq!(compile_url("/sms/{id}", [("id", &id)]).unwrap(), "/sms/42");
    assert_eq!(compile_url("/sms/{id:[0-9]+}", [("id", &id)]).unwrap(), "/sms/42");
    assert_eq!(compile_url("/a/{x}/b/{x}", [("x", &json!("q"))]).unwrap(), "/a/q/b/q");
    assert_eq!(compile_url("/a/{missing}", [("id", &id)]).unwrap(), "/a/{missing}");
    assert_eq!(compile_url("/p/{v}", [("v", &json!("$1"))]).unwrap(), "/p/$1");
}

#[test]
fn builder_source_with_params() {
    let mut b = builder();
    b.from_with("/accounts/{account}/sms/{id:\\d+}", [("account", json!(7)), ("id", json!(9))]);
    assert_eq!(b.compiled_url().unwrap(), "/accounts/7/sms/9");
}
