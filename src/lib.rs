//! Malmö housing market dashboard: loading, aggregation and configuration.
//!
//! The egui front end lives in the binary; everything here is plain data
//! in, plain data out.

pub mod color;
pub mod config;
pub mod data;
