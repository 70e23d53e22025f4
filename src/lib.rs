//! demand-planner core
//!
//! Zone-to-zone travel demand estimation from spatial land-use, population,
//! and POI data, using a production-constrained gravity model over a regular
//! zone grid and five fixed time-of-day periods.

pub mod model;
pub mod config;
pub mod error;
pub mod city;
pub mod zones;
pub mod attributes;
pub mod scoring;
pub mod balance;
pub mod distance;
pub mod gravity;
pub mod output;
pub mod pipeline;
