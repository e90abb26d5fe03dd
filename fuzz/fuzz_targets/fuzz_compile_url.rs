#![no_main]
use libfuzzer_sys::fuzz_target;

#[derive(arbitrary::Arbitrary, Debug)]
struct Input {
    template: String,
    name: String,
    value: String,
}

fuzz_target!(|input: Input| {
    if input.template.len() > 1024 || input.name.len() > 64 { return; }
    let v = serde_json::Value::String(input.value);
    let _ = phonecom_sdk::query::compile_url(&input.template, [(input.name.as_str(), &v)]);
});
