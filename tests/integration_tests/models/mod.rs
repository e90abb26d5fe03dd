#[path = "mod_sms.rs"]
mod sms_tests;
