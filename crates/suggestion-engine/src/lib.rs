pub mod catalog;
pub mod config;
pub mod error;
pub mod scoring;
pub mod suggestions;
pub mod telemetry;
