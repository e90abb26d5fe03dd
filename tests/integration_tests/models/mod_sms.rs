use crate::integration_tests::_support::sms_rows;
use phonecom_sdk::client::{Client, MemoryClient, RequestMethod};
use phonecom_sdk::{Model, SdkError, Sms};
use serde_json::json;
use std::sync::Arc;

fn client(rows: usize) -> Arc<MemoryClient> {
    let mem = Arc::new(MemoryClient::new().with_collection("/sms"));
    mem.seed("/sms", sms_rows(rows)).unwrap();
    mem
}

#[test]
fn query_is_scoped_to_the_collection() {
    let mem = client(2);
    let b = Sms::query(mem);
    assert_eq!(b.compiled_url().unwrap(), "/sms");
}

#[test]
fn all_hydrates_every_row() {
    let mem = client(4);
    let all = Sms::all(mem).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[1].id, Some(2));
    assert_eq!(all[1].direction.as_deref(), Some("in"));
    assert_eq!(all[3].to.as_deref(), Some("+15550003"));
}

#[test]
fn find_or_fail_reports_model_name() {
    let mem = client(1);
    assert!(Sms::find_or_fail(mem.clone(), 1).is_ok());
    let err = Sms::find_or_fail(mem, 42).unwrap_err();
    assert!(matches!(&err, SdkError::NotFound { model } if model == "Sms"));
    assert_eq!(err.to_string(), "No query results for model [Sms].");
}

#[test]
fn save_new_inserts_and_existing_updates() {
    let mem = client(0);
    let dyn_client: Arc<dyn Client> = mem.clone();
    let mut sms = Sms { to: Some("+15557654".into()), content: Some("draft".into()), ..Sms::default() };
    sms.save(dyn_client.clone()).unwrap();
    assert_eq!(sms.id, Some(1));
    assert_eq!(sms.self_url(), "/sms/1");

    sms.content = Some("final".into());
    sms.save(dyn_client).unwrap();
    assert_eq!(mem.request_count(RequestMethod::Insert), 1);
    assert_eq!(mem.request_count(RequestMethod::Update), 1);
    assert_eq!(mem.rows("/sms")[0]["content"], json!("final"));
    assert_eq!(sms.content.as_deref(), Some("final"));
}

#[test]
fn serde_round_trip_skips_unset_fields() {
    let sms = Sms { id: Some(3), content: Some("x".into()), ..Sms::default() };
    let v = serde_json::to_value(&sms).unwrap();
    assert_eq!(v, json!({"id": 3, "content": "x"}));
    let back: Sms = serde_json::from_value(v).unwrap();
    assert_eq!(back, sms);
    assert_eq!(Sms::default().self_url(), "/sms");
}
