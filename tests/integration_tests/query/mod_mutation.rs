use crate::integration_tests::_support::{seeded, seeded_with};
use phonecom_sdk::client::RequestMethod;
use phonecom_sdk::query::mason::has_no_controls;
use phonecom_sdk::query::self_link;
use phonecom_sdk::{QueryDefaults, ResourceId, SdkError};
use serde_json::{Map, Value, json};

fn values(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

#[test]
fn update_sends_one_request_per_row_to_its_self_link() {
    let (mem, mut b) = seeded(4);
    let before = mem.rows("/sms");
    b.where_in("n", [1, 3]);
    let out = b.update(&values(&[("name", json!("x"))])).unwrap();
    assert_eq!(out.len(), 2);

    let updates: Vec<_> =
        mem.requests().into_iter().filter(|r| r.method == RequestMethod::Update).collect();
    assert_eq!(updates.len(), 2);
    for (req, n) in updates.iter().zip([1, 3]) {
        let row = before.iter().find(|r| r["n"] == json!(n)).unwrap();
        assert_eq!(req.url, self_link(row).unwrap());
        let body = req.body.as_ref().unwrap();
        assert_eq!(body["name"], json!("x"));
        assert_eq!(body["content"], row["content"]);
        assert!(has_no_controls(body));
    }
}

#[test]
fn caller_values_win_over_fetched_fields() {
    let (mem, mut b) = seeded(1);
    b.update(&values(&[("content", json!("replaced")), ("n", json!(100))])).unwrap();
    let row = &mem.rows("/sms")[0];
    assert_eq!(row["content"], json!("replaced"));
    assert_eq!(row["n"], json!(100));
    assert!(row.get("@meta").is_none());
}

#[test]
fn update_spans_chunks() {
    let defaults = QueryDefaults { chunk_size: 3, ..QueryDefaults::default() };
    let (mem, mut b) = seeded_with(8, defaults);
    let out = b.update(&values(&[("read", json!(true))])).unwrap();
    assert_eq!(out.len(), 8);
    assert!(mem.rows("/sms").iter().all(|r| r["read"] == json!(true)));
}

#[test]
fn update_stops_at_first_transport_failure() {
    let (mem, mut b) = seeded(5);
    // one select, then two updates succeed
    mem.fail_after(3);
    let err = b.update(&values(&[("x", json!(1))])).unwrap_err();
    assert!(matches!(err, SdkError::Transport(_)));
    assert_eq!(mem.request_count(RequestMethod::Update), 3);
    assert_eq!(mem.rows("/sms").iter().filter(|r| r.get("x").is_some()).count(), 2);
}

#[test]
fn delete_all_and_by_id() {
    let defaults = QueryDefaults { chunk_size: 4, ..QueryDefaults::default() };
    let (mem, mut b) = seeded_with(10, defaults);
    let mut one = b.new_query();
    one.from("/sms");
    assert!(one.delete(Some(json!(3))).unwrap());
    assert_eq!(mem.rows("/sms").len(), 9);
    assert!(mem.rows("/sms").iter().all(|r| r["id"] != json!(3)));

    b.where_eq("direction", "out");
    b.delete(None).unwrap();
    assert!(mem.rows("/sms").iter().all(|r| r["direction"] == json!("in")));
    assert_eq!(mem.rows("/sms").len(), 5);
}

#[test]
fn insert_empty_input_sends_nothing() {
    let (mem, b) = seeded(0);
    assert!(b.insert(json!([])).unwrap().is_empty());
    assert!(b.insert(json!({})).unwrap().is_empty());
    assert!(mem.requests().is_empty());
}

#[test]
fn insert_rows_one_request_each() {
    let (mem, b) = seeded(0);
    let out = b.insert(json!([{"to": "+1"}, {"to": "+2"}, {"to": "+3"}])).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(mem.request_count(RequestMethod::Insert), 3);
    assert_eq!(self_link(&out[2]).unwrap(), "/sms/3");

    let single = b.insert(json!({"to": "+4"})).unwrap();
    assert_eq!(single[0]["id"], json!(4));
}

#[test]
fn insert_non_object_list_is_one_body() {
    let (mem, b) = seeded(0);
    // the memory transport rejects rows that are not objects
    let out = b.insert(json!([1, 2])).unwrap_err();
    assert!(matches!(out, SdkError::Transport(_)));
    assert_eq!(mem.requests()[0].body, Some(json!([1, 2])));
    assert!(matches!(b.insert(json!("text")), Err(SdkError::InvalidArgument(_))));
}

#[test]
fn insert_get_id_reads_sequence_field() {
    let (_mem, b) = seeded(4);
    assert_eq!(b.insert_get_id(json!({"to": "+1"}), None).unwrap(), ResourceId::Int(5));
    let id = b.insert_get_id(json!({"to": "+1", "code": "7.9"}), Some("code")).unwrap();
    assert_eq!(id, ResourceId::Int(7));
    let raw = b.insert_get_id(json!({"to": "+1", "code": "abc"}), Some("code")).unwrap();
    assert_eq!(raw, ResourceId::Raw(json!("abc")));
    assert!(matches!(b.insert_get_id(json!({}), Some("nope")), Err(SdkError::MissingField(_))));
}

#[test]
fn insert_collection_returns_items() {
    let (mem, b) = seeded(0);
    let items = b.insert_collection(vec![json!({"to": "+1"}), json!({"to": "+2"})]).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(mem.request_count(RequestMethod::Insert), 1);
    assert_eq!(mem.rows("/sms").len(), 2);
}
