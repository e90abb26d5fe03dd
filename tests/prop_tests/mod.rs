// Property tests, grouped like src/
mod query;
