use phonecom_sdk::SdkError;

#[test]
fn display_messages() {
    assert_eq!(SdkError::not_found("Sms").to_string(), "No query results for model [Sms].");
    assert_eq!(SdkError::MissingField("id".into()).to_string(), "Missing field in response: id");
    assert!(SdkError::MalformedResource("x".into()).to_string().contains("Malformed resource"));
    assert!(SdkError::InvalidArgument("op".into()).to_string().starts_with("Invalid argument"));
}

#[test]
fn conversions() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(matches!(SdkError::from(json_err), SdkError::Json(_)));
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    assert!(matches!(SdkError::from(io), SdkError::Io(m) if m.contains("gone")));
    assert_eq!(SdkError::not_found("Sms").model(), Some("Sms"));
    assert_eq!(SdkError::Transport("503".into()).model(), None);
}
