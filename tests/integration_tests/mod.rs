mod cli;
mod client;
mod models;
mod utils;
