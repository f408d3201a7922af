pub mod config;
pub mod search;
pub mod skolem;
pub mod snapshot;
