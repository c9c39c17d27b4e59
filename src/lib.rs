pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod optimizer;
pub mod parallel;
pub mod presets;
pub mod server;
pub mod training;
