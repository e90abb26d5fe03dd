#![no_main]
use libfuzzer_sys::fuzz_target;
use phonecom_sdk::cli::parse_filter_expr;
use phonecom_sdk::client::eval_entry;

fuzz_target!(|data: &[u8]| {
    if data.len() > 4096 { return; }
    if let Ok(s) = std::str::from_utf8(data) {
        // Parsing and evaluating arbitrary expressions must not panic
        if let Ok((column, op, value)) = parse_filter_expr(s) {
            let entry = match value {
                Some(v) => format!("{op}:{}", phonecom_sdk::utils::json::to_wire_string(&v)),
                None => op.to_string(),
            };
            let mut doc = serde_json::json!({ "n": 1 });
            doc[column.as_str()] = serde_json::Value::from("x");
            let _ = eval_entry(&doc, &column, &entry);
        }
    }
});
