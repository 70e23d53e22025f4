//! City-wide production/attraction balancing against target trip volumes.
//!
//! A consistent gravity solve needs per-period totals of production and
//! attraction to agree; both are rescaled to the configured trip volume and
//! the result is checked, not assumed.

use tracing::debug;

use crate::config::ModelConfig;
use crate::error::ModelError;
use crate::model::TimePeriod;
use crate::scoring::ZoneScore;

/// Tolerance on the post-rescale totals.
pub const BALANCE_TOLERANCE: f64 = 1e-6;

/// Rescale scores in place so that for every period the city-wide production
/// and attraction totals both equal the configured trip volume.
///
/// Fails when a period's totals cannot be reconciled, which indicates an
/// inconsistent prior stage (for example no attractive zones at all). The
/// offending period and both computed sums are carried in the error.
pub fn balance(scores: &mut [ZoneScore], config: &ModelConfig) -> Result<(), ModelError> {
    for period in TimePeriod::ALL {
        let t = period.index();
        let target = config.trip_volume(period);

        let production_total: f64 = scores.iter().map(|z| z.production[t]).sum();
        let attraction_total: f64 = scores.iter().map(|z| z.attraction[t]).sum();
        if production_total <= 0.0 || attraction_total <= 0.0 {
            return Err(ModelError::Balance {
                period,
                production_total,
                attraction_total,
                target,
            });
        }

        let production_scale = target / production_total;
        let attraction_scale = target / attraction_total;
        for zone in scores.iter_mut() {
            zone.production[t] *= production_scale;
            zone.attraction[t] *= attraction_scale;
        }

        let production_total: f64 = scores.iter().map(|z| z.production[t]).sum();
        let attraction_total: f64 = scores.iter().map(|z| z.attraction[t]).sum();
        if (production_total - target).abs() > BALANCE_TOLERANCE
            || (attraction_total - target).abs() > BALANCE_TOLERANCE
        {
            return Err(ModelError::Balance {
                period,
                production_total,
                attraction_total,
                target,
            });
        }

        debug!(%period, target, "balanced production and attraction");
    }
    Ok(())
}
