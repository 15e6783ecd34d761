//! Simulated external data and synthetic record generation.

pub mod market_data;
pub mod synthetic;
