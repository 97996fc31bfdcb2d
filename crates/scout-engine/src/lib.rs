pub mod config;
pub mod error;
pub mod scouting;
pub mod telemetry;
