//! Query building: filter/sort/window state, compilation to API parameters, and the terminal
//! operations that drive a [`crate::client::Client`].

mod builder;
mod compile;
mod exec;
pub mod mason;
mod types;

pub use builder::{Builder, Source};
pub use compile::compile_url;
pub use mason::{self_link, strip_controls};
pub use types::{CompiledQuery, Direction, Filter, Operator, Sort};
