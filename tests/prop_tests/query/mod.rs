#[path = "prop_compile.rs"]
mod prop_compile;
