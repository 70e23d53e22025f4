//! End-to-end demand estimation: partition, aggregate, score, balance,
//! distance, solve.
//!
//! Either every stage succeeds and the output satisfies the balance and
//! production invariants for all zones and periods, or the run stops at the
//! first fatal error. Partial demand matrices are never returned.

use tracing::info;

use crate::attributes::{self, ZoneAttributes, ZoneDiagnostic};
use crate::balance;
use crate::city::City;
use crate::config::{DistanceMode, ModelConfig};
use crate::distance::{self, DistanceMatrix, GeodesicDistance, NetworkDistance};
use crate::error::ModelError;
use crate::gravity::{self, DemandMatrix};
use crate::scoring::{self, ZoneScore};
use crate::zones::{self, Zone};

/// Complete output of one pipeline run.
#[derive(Debug, Clone)]
pub struct ModelOutput {
    pub zones: Vec<Zone>,
    pub attributes: Vec<ZoneAttributes>,
    /// Balanced scores, per zone.
    pub scores: Vec<ZoneScore>,
    pub distances: DistanceMatrix,
    pub demand: DemandMatrix,
    /// Zones that were zeroed during aggregation, and why.
    pub diagnostics: Vec<ZoneDiagnostic>,
}

pub fn run(city: &City, config: &ModelConfig) -> Result<ModelOutput, ModelError> {
    config.validate()?;

    let extent = city.extent().ok_or(ModelError::EmptyExtent {
        width: 0.0,
        height: 0.0,
    })?;
    let zones = zones::partition(extent, config.grid_rows, config.grid_cols)?;
    info!(zones = zones.len(), "partitioned city into grid");

    let (attributes, diagnostics) = attributes::aggregate(city, &zones, config);
    info!(
        zones = zones.len(),
        zeroed = diagnostics.len(),
        "aggregated zone attributes"
    );

    let mut scores = scoring::score(&attributes, config);
    balance::balance(&mut scores, config)?;
    info!("scored and balanced zones");

    let distances = match config.distance_mode {
        DistanceMode::Geodesic => {
            distance::build_matrix(&zones, &GeodesicDistance, config.min_distance_km)?
        }
        DistanceMode::Network => {
            let provider = NetworkDistance::new(city);
            distance::build_matrix(&zones, &provider, config.min_distance_km)?
        }
    };
    info!(mode = ?config.distance_mode, "built inter-zone distance matrix");

    let demand = gravity::solve(&scores, &distances, config.beta)?;
    info!("solved gravity demand matrix");

    Ok(ModelOutput {
        zones,
        attributes,
        scores,
        distances,
        demand,
        diagnostics,
    })
}
