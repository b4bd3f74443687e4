pub mod api;
pub mod config;
pub mod domain;
pub mod repo;
pub mod state;
pub mod telemetry;
