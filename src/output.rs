//! Rows and bundles handed to the persistence and visualization
//! collaborators. File and database schemas belong to those collaborators;
//! the core only shapes the data.

use serde::Serialize;
use wkt::ToWkt;

use crate::attributes::ZoneAttributes;
use crate::distance::DistanceMatrix;
use crate::gravity::DemandMatrix;
use crate::model::TimePeriod;
use crate::zones::Zone;

/// One persisted zone row.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneRecord {
    pub zone_id: usize,
    pub centroid_wkt: String,
    pub boundary_wkt: String,
}

/// One persisted demand row per ordered zone pair.
#[derive(Debug, Clone, Serialize)]
pub struct DemandRecord {
    pub origin_id: usize,
    pub dest_id: usize,
    pub distance_km: f64,
    /// Largest per-period volume for the pair.
    pub peak_volume: f64,
    /// Volume per time period, in `TimePeriod::ALL` order.
    pub volumes: [f64; TimePeriod::COUNT],
}

pub fn zone_records(zones: &[Zone]) -> Vec<ZoneRecord> {
    zones
        .iter()
        .map(|zone| ZoneRecord {
            zone_id: zone.id,
            centroid_wkt: zone.centroid.wkt_string(),
            boundary_wkt: zone.boundary.wkt_string(),
        })
        .collect()
}

pub fn demand_records(
    zones: &[Zone],
    distances: &DistanceMatrix,
    demand: &DemandMatrix,
) -> Vec<DemandRecord> {
    let mut records = Vec::with_capacity(zones.len() * zones.len().saturating_sub(1));
    for origin in 0..zones.len() {
        for dest in 0..zones.len() {
            if origin == dest {
                continue;
            }
            records.push(DemandRecord {
                origin_id: origin,
                dest_id: dest,
                distance_km: distances.get(origin, dest),
                peak_volume: demand.peak(origin, dest),
                volumes: TimePeriod::ALL.map(|period| demand.get(origin, dest, period)),
            });
        }
    }
    records
}

/// Everything a choropleth/flow renderer needs for one time period.
#[derive(Debug, Clone, Serialize)]
pub struct ChoroplethFrame<'a> {
    pub period: TimePeriod,
    /// Zone population in zone-id order.
    pub populations: Vec<f64>,
    pub demand: &'a DemandMatrix,
}

pub fn choropleth_frame<'a>(
    attributes: &[ZoneAttributes],
    demand: &'a DemandMatrix,
    period: TimePeriod,
) -> ChoroplethFrame<'a> {
    ChoroplethFrame {
        period,
        populations: attributes.iter().map(|a| a.population).collect(),
        demand,
    }
}
