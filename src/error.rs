//! Error taxonomy for the demand pipeline.
//!
//! Everything here is fatal: the pipeline either produces a complete,
//! invariant-satisfying demand matrix or stops with one of these. Per-zone
//! geometry faults are recovered locally and reported as
//! [`crate::attributes::ZoneDiagnostic`] instead.

use std::fmt;

use crate::model::TimePeriod;

#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Invalid configuration, rejected before any computation starts.
    Config { reason: String },
    /// Zero-area bounding extent; there is nothing to partition.
    EmptyExtent { width: f64, height: f64 },
    /// Post-balancing totals diverge from the target trip volume.
    Balance {
        period: TimePeriod,
        production_total: f64,
        attraction_total: f64,
        target: f64,
    },
    /// Gravity denominator vanished: an origin sees no attraction anywhere.
    ZeroDenominator { origin: usize, period: TimePeriod },
    /// No road path between the centroids of two zones in network mode.
    Unreachable { from_zone: usize, to_zone: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::Config { reason } => write!(f, "invalid configuration: {}", reason),
            ModelError::EmptyExtent { width, height } => {
                write!(f, "degenerate city extent ({} x {})", width, height)
            }
            ModelError::Balance {
                period,
                production_total,
                attraction_total,
                target,
            } => write!(
                f,
                "balance invariant violated for {}: production {} vs attraction {} (target {})",
                period, production_total, attraction_total, target
            ),
            ModelError::ZeroDenominator { origin, period } => write!(
                f,
                "zero gravity denominator for origin zone {} in {}",
                origin, period
            ),
            ModelError::Unreachable { from_zone, to_zone } => write!(
                f,
                "no road path between zones {} and {}",
                from_zone, to_zone
            ),
        }
    }
}

impl std::error::Error for ModelError {}
