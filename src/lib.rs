pub mod config;
pub mod describer;
pub mod error;
pub mod payload;
pub mod pipeline;
pub mod server;
pub mod translator;
