// Mirror src/utils plus crate-level config and errors
#[path = "mod_config.rs"]
mod config_tests;
#[path = "mod_errors.rs"]
mod errors_tests;
#[path = "mod_logger.rs"]
mod logger_tests;
#[path = "mod_types.rs"]
mod types_tests;
