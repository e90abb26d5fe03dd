mod command;
mod runner;
mod util;

pub use command::{Command, QueryArgs};
pub use runner::{OutputMode, build_query, run, run_with_format};
pub use util::{parse_filter_expr, parse_output_mode, parse_param, parse_scalar, parse_sort};
