pub mod config;
pub mod demographics;
pub mod error;
pub mod telemetry;
