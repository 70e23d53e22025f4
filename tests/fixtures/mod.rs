//! Test fixtures for demand-planner.
//!
//! Provides a builder for synthetic cities with known geometry, so tests can
//! hand-compute expected attributes and demand.

pub mod grid_city;

pub use grid_city::*;
