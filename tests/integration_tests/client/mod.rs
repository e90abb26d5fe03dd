#[path = "mod_memory.rs"]
mod memory_tests;
