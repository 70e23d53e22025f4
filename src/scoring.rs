//! Attraction and production scoring from raw zone attributes.
//!
//! Two passes: city-wide maxima first, then per-zone normalized scores. A
//! zero maximum means the signal is absent city-wide, so that component
//! contributes 0 instead of dividing by zero.

use crate::attributes::ZoneAttributes;
use crate::config::ModelConfig;
use crate::model::{LanduseClass, TimePeriod};

/// Per-period scores for one zone, dense over the five periods.
///
/// Production starts time-invariant (the same blend replicated per period);
/// it only becomes time-varying through balancing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneScore {
    pub attraction: [f64; TimePeriod::COUNT],
    pub production: [f64; TimePeriod::COUNT],
}

/// Score every zone. Output is in zone-id order, one entry per input.
pub fn score(attributes: &[ZoneAttributes], config: &ModelConfig) -> Vec<ZoneScore> {
    let max_population = attributes
        .iter()
        .map(|a| a.population)
        .fold(0.0, f64::max);
    let max_pois = attributes
        .iter()
        .map(|a| a.poi_count as f64)
        .fold(0.0, f64::max);

    attributes
        .iter()
        .map(|zone| {
            let population_score = normalized(zone.population, max_population);
            let poi_score = normalized(zone.poi_count as f64, max_pois);
            let weights = config.score_weights;

            let mut scores = ZoneScore::default();
            for period in TimePeriod::ALL {
                let landuse_score: f64 = LanduseClass::ALL
                    .iter()
                    .map(|&class| {
                        zone.landuse_share[class.index()] * config.land_weight(class, period)
                    })
                    .sum();

                scores.attraction[period.index()] = weights.pois * poi_score
                    + weights.population * population_score
                    + weights.landuse * landuse_score;
                scores.production[period.index()] = population_score + poi_score;
            }
            scores
        })
        .collect()
}

fn normalized(value: f64, max: f64) -> f64 {
    if max > 0.0 { value / max * 100.0 } else { 0.0 }
}
