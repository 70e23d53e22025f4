//! Production-constrained gravity solve.
//!
//! Each time period is solved independently, and within a period each origin
//! row depends only on the read-only scores and distances while writing a
//! disjoint output row, so rows are solved in parallel with no shared
//! mutable state.

use rayon::prelude::*;
use serde::Serialize;

use crate::distance::DistanceMatrix;
use crate::error::ModelError;
use crate::model::TimePeriod;
use crate::scoring::ZoneScore;

/// Dense Z×Z×T demand matrix. Non-negative; diagonal cells (self-trips) are
/// never written and hold zero.
#[derive(Debug, Clone, Serialize)]
pub struct DemandMatrix {
    zones: usize,
    cells: Vec<f64>,
}

impl DemandMatrix {
    pub fn zones(&self) -> usize {
        self.zones
    }

    pub fn get(&self, origin: usize, dest: usize, period: TimePeriod) -> f64 {
        self.cells[(origin * self.zones + dest) * TimePeriod::COUNT + period.index()]
    }

    /// Largest per-period volume for an ordered pair.
    pub fn peak(&self, origin: usize, dest: usize) -> f64 {
        TimePeriod::ALL
            .iter()
            .map(|&period| self.get(origin, dest, period))
            .fold(0.0, f64::max)
    }
}

/// Solve `demand(i,j,t) = P[i][t] * A[j][t] * d(i,j)^-beta / denom(i,t)`
/// with `denom(i,t) = sum over j != i of A[j][t] * d(i,j)^-beta`.
///
/// The normalization guarantees that each origin's row sums to its
/// production for every period. A vanished denominator (no reachable
/// attraction anywhere) is reported, never coerced to zero demand. Inputs
/// are not mutated.
pub fn solve(
    scores: &[ZoneScore],
    distances: &DistanceMatrix,
    beta: f64,
) -> Result<DemandMatrix, ModelError> {
    let zones = scores.len();
    debug_assert_eq!(zones, distances.zones());

    let row_len = zones * TimePeriod::COUNT;
    let mut cells = vec![0.0; zones * row_len];

    cells
        .par_chunks_mut(row_len)
        .enumerate()
        .try_for_each(|(origin, row)| solve_row(origin, row, scores, distances, beta))?;

    Ok(DemandMatrix { zones, cells })
}

fn solve_row(
    origin: usize,
    row: &mut [f64],
    scores: &[ZoneScore],
    distances: &DistanceMatrix,
    beta: f64,
) -> Result<(), ModelError> {
    let zones = scores.len();
    for period in TimePeriod::ALL {
        let t = period.index();

        let mut denominator = 0.0;
        for dest in 0..zones {
            if dest == origin {
                continue;
            }
            denominator += scores[dest].attraction[t] * impedance(distances.get(origin, dest), beta);
        }
        if denominator <= 0.0 {
            return Err(ModelError::ZeroDenominator { origin, period });
        }

        let production = scores[origin].production[t];
        for dest in 0..zones {
            if dest == origin {
                continue;
            }
            let trips = production * scores[dest].attraction[t]
                * impedance(distances.get(origin, dest), beta)
                / denominator;
            row[dest * TimePeriod::COUNT + t] = trips;
        }
    }
    Ok(())
}

fn impedance(km: f64, beta: f64) -> f64 {
    km.powf(-beta)
}
