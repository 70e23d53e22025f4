//! Model configuration: weight tables, trip volumes, and solver constants.
//!
//! Every tunable is bound into one immutable [`ModelConfig`] constructed once
//! and passed into the pipeline explicitly. Internal consistency (weights
//! summing to 1.0, positive dimensions) is checked by [`ModelConfig::validate`]
//! before any computation begins, not at the point of use.

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::model::{BuildingKind, LanduseClass, TimePeriod};

/// Distance matrix strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMode {
    /// Great-circle distance between zone centroids.
    Geodesic,
    /// Shortest path over the road graph between nearest nodes.
    Network,
}

/// Relative importance of POI density, population, and land-use mix in the
/// attraction blend. Must sum to 1.0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub pois: f64,
    pub population: f64,
    pub landuse: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.pois + self.population + self.landuse
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub grid_rows: usize,
    pub grid_cols: usize,
    pub score_weights: ScoreWeights,
    /// Land-use weight per class and time period, indexed by
    /// `[LanduseClass::index()][TimePeriod::index()]`.
    pub land_weights: [[f64; TimePeriod::COUNT]; LanduseClass::COUNT],
    /// Estimated residents per building kind, indexed by `BuildingKind::index()`.
    pub occupancy: [f64; BuildingKind::COUNT],
    /// Target trips generated city-wide per hour, per time period.
    pub trip_volumes: [f64; TimePeriod::COUNT],
    /// Distance decay exponent for the gravity model.
    pub beta: f64,
    pub distance_mode: DistanceMode,
    /// Floor applied to inter-zone distances (km) so the inverse-power
    /// impedance stays finite for near-coincident centroids.
    pub min_distance_km: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            grid_rows: 20,
            grid_cols: 20,
            score_weights: ScoreWeights {
                pois: 0.3,
                population: 0.3,
                landuse: 0.4,
            },
            // Rows follow LanduseClass::ALL, columns TimePeriod::ALL.
            land_weights: [
                [0.5, 1.0, 0.7, 0.5, 0.5], // commercial
                [0.6, 1.0, 1.0, 1.0, 0.6], // retail
                [0.5, 1.0, 1.0, 1.0, 0.5], // industrial
                [0.5, 0.5, 0.7, 1.0, 0.7], // residential
            ],
            // Follows BuildingKind::ALL.
            occupancy: [400.0, 200.0, 4.0, 4.0, 400.0, 200.0, 4.0, 4.0],
            trip_volumes: [20_000.0, 150_000.0, 600_000.0, 150_000.0, 20_000.0],
            beta: 0.5,
            distance_mode: DistanceMode::Geodesic,
            min_distance_km: 0.001,
        }
    }
}

impl ModelConfig {
    pub fn land_weight(&self, class: LanduseClass, period: TimePeriod) -> f64 {
        self.land_weights[class.index()][period.index()]
    }

    pub fn occupancy_for(&self, kind: BuildingKind) -> f64 {
        self.occupancy[kind.index()]
    }

    pub fn trip_volume(&self, period: TimePeriod) -> f64 {
        self.trip_volumes[period.index()]
    }

    /// Reject inconsistent configuration before any stage runs.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.grid_rows == 0 || self.grid_cols == 0 {
            return Err(config_error(format!(
                "grid dimensions must be positive, got {}x{}",
                self.grid_rows, self.grid_cols
            )));
        }

        let weights = &self.score_weights;
        if !weights.pois.is_finite()
            || !weights.population.is_finite()
            || !weights.landuse.is_finite()
            || weights.pois < 0.0
            || weights.population < 0.0
            || weights.landuse < 0.0
        {
            return Err(config_error("score weights must be finite and non-negative".into()));
        }
        if (weights.sum() - 1.0).abs() > 1e-9 {
            return Err(config_error(format!(
                "score weights must sum to 1.0, got {}",
                weights.sum()
            )));
        }

        for row in &self.land_weights {
            for &weight in row {
                if !weight.is_finite() || weight < 0.0 {
                    return Err(config_error(format!("invalid land-use weight {}", weight)));
                }
            }
        }

        for &occupancy in &self.occupancy {
            if !occupancy.is_finite() || occupancy < 0.0 {
                return Err(config_error(format!("invalid occupancy {}", occupancy)));
            }
        }

        for (period, &volume) in TimePeriod::ALL.iter().zip(&self.trip_volumes) {
            if !volume.is_finite() || volume <= 0.0 {
                return Err(config_error(format!(
                    "trip volume for {} must be positive, got {}",
                    period, volume
                )));
            }
        }

        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(config_error(format!(
                "decay exponent must be positive, got {}",
                self.beta
            )));
        }

        if !self.min_distance_km.is_finite() || self.min_distance_km <= 0.0 {
            return Err(config_error(format!(
                "minimum distance must be positive, got {}",
                self.min_distance_km
            )));
        }

        Ok(())
    }
}

fn config_error(reason: String) -> ModelError {
    ModelError::Config { reason }
}
