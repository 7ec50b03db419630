pub mod catalog;
pub mod commerce;
pub mod config;
pub mod error;
pub mod integrations;
pub mod quiz;
pub mod recommendations;
pub mod telemetry;
