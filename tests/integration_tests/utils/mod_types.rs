use phonecom_sdk::ResourceId;
use phonecom_sdk::utils::json::to_wire_string;
use serde_json::json;

#[test]
fn resource_ids_from_responses() {
    assert_eq!(ResourceId::from_value(json!(12)), ResourceId::Int(12));
    assert_eq!(ResourceId::from_value(json!(12.9)), ResourceId::Int(12));
    assert_eq!(ResourceId::from_value(json!(" 8 ")), ResourceId::Int(8));
    assert_eq!(ResourceId::from_value(json!(null)), ResourceId::Raw(json!(null)));
    assert_eq!(ResourceId::Int(4).to_string(), "4");
}

#[test]
fn wire_strings() {
    assert_eq!(to_wire_string(&json!(true)), "1");
    assert_eq!(to_wire_string(&json!(false)), "");
    assert_eq!(to_wire_string(&json!(null)), "");
    assert_eq!(to_wire_string(&json!(["a", 1, null, true])), "a,1,,1");
    assert_eq!(to_wire_string(&json!(1.5)), "1.5");
}
