#![no_main]
use libfuzzer_sys::fuzz_target;
use phonecom_sdk::query::mason::{has_no_controls, strip_controls};

fuzz_target!(|data: &[u8]| {
    if data.len() > 16384 { return; }
    if let Ok(v) = serde_json::from_slice::<serde_json::Value>(data) {
        let out = strip_controls(&v);
        assert!(has_no_controls(&out));
    }
});
