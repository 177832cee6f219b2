pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod session;
pub mod telemetry;
