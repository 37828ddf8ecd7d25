//! Residential solar + battery energy-flow and 20-year return simulator.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod io;
/// Energy balancing, projection, and financial modules.
pub mod sim;
pub mod telemetry;
