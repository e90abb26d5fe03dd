use phonecom_sdk::utils::devlog::REQUEST_TARGET;
use std::fs;
use tempfile::tempdir;

#[test]
fn configure_logging_creates_app_and_request_logs() {
    let dir = tempdir().unwrap();
    let base = dir.path().join("logs");
    fs::create_dir_all(&base).unwrap();
    // init fails when this process already has a logger; the appenders create their files first
    let _ = phonecom_sdk::logger::configure_logging(Some(&base), Some("trace"), Some(2));
    log::info!("hello app");
    log::trace!(target: REQUEST_TARGET, "select /sms");
    assert!(base.join("app.log").exists());
    assert!(base.join("requests.log").exists());
}
