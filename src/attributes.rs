//! Spatial aggregation of population, land-use mix, and POI density per zone.
//!
//! Failure policy: a geometry fault while clipping one zone zeroes that
//! zone's attributes and records a diagnostic; it never aborts the batch.
//! Zones without any road-network presence are zeroed by policy, since the
//! distance stage could never reach them anyway.

use geo::{Area, BooleanOps, BoundingRect, Intersects, Polygon};
use tracing::{debug, warn};

use crate::city::City;
use crate::config::ModelConfig;
use crate::model::LanduseClass;
use crate::zones::Zone;

/// Raw spatial attributes of one zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ZoneAttributes {
    /// Estimated residents, from building occupancy.
    pub population: f64,
    /// Percent of zone area per land-use class. May sum below 100 when part
    /// of the zone is unclassified.
    pub landuse_share: [f64; LanduseClass::COUNT],
    /// Number of classified POI features intersecting the zone.
    pub poi_count: u32,
}

/// Why a zone ended up with all-zero attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A clip against invalid or degenerate input geometry failed.
    GeometryFailure,
    /// No road node falls inside the zone. Policy, not an error.
    NoRoadCoverage,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDiagnostic {
    pub zone_id: usize,
    pub kind: DiagnosticKind,
}

/// A geometry operation that failed, as opposed to one with a valid empty
/// result (which simply contributes zero).
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryFault {
    pub detail: String,
}

/// Aggregate attributes for every zone. Always returns one entry per zone,
/// in zone-id order, alongside the diagnostics for zeroed zones.
pub fn aggregate(
    city: &City,
    zones: &[Zone],
    config: &ModelConfig,
) -> (Vec<ZoneAttributes>, Vec<ZoneDiagnostic>) {
    let mut attributes = Vec::with_capacity(zones.len());
    let mut diagnostics = Vec::new();

    for zone in zones {
        if !has_road_coverage(city, zone) {
            diagnostics.push(ZoneDiagnostic {
                zone_id: zone.id,
                kind: DiagnosticKind::NoRoadCoverage,
            });
            attributes.push(ZoneAttributes::default());
            continue;
        }

        match aggregate_zone(city, zone, config) {
            Ok(zone_attributes) => {
                debug!(
                    zone = zone.id,
                    population = zone_attributes.population,
                    pois = zone_attributes.poi_count,
                    "aggregated zone attributes"
                );
                attributes.push(zone_attributes);
            }
            Err(fault) => {
                warn!(zone = zone.id, detail = %fault.detail, "geometry fault, zeroing zone");
                diagnostics.push(ZoneDiagnostic {
                    zone_id: zone.id,
                    kind: DiagnosticKind::GeometryFailure,
                });
                attributes.push(ZoneAttributes::default());
            }
        }
    }

    (attributes, diagnostics)
}

fn has_road_coverage(city: &City, zone: &Zone) -> bool {
    city.road_nodes
        .iter()
        .any(|node| zone.boundary.intersects(&node.location))
}

fn aggregate_zone(
    city: &City,
    zone: &Zone,
    config: &ModelConfig,
) -> Result<ZoneAttributes, GeometryFault> {
    let mut population = 0.0;
    for building in &city.buildings {
        if !touches_zone(zone, &building.footprint) {
            continue;
        }
        check_valid(&building.footprint)?;
        if zone.boundary.intersects(&building.footprint) {
            if let Some(kind) = building.kind {
                population += config.occupancy_for(kind);
            }
        }
    }

    let zone_area = zone.boundary.unsigned_area();
    let mut landuse_share = [0.0; LanduseClass::COUNT];
    for area in &city.landuse {
        if !touches_zone(zone, &area.geometry) {
            continue;
        }
        let clipped = clip_area(&zone.boundary, &area.geometry)?;
        landuse_share[area.class.index()] += clipped / zone_area * 100.0;
    }

    let mut poi_count = 0;
    for poi in &city.pois {
        if poi.amenity.is_some() && zone.boundary.intersects(&poi.location) {
            poi_count += 1;
        }
    }

    Ok(ZoneAttributes {
        population,
        landuse_share,
        poi_count,
    })
}

/// Bounding-box prefilter scoping geometry faults to the zones a feature
/// actually touches. Non-finite geometry has no usable bounding box and is
/// skipped everywhere.
fn touches_zone(zone: &Zone, subject: &Polygon<f64>) -> bool {
    match subject.bounding_rect() {
        Some(rect)
            if rect.min().x.is_finite()
                && rect.min().y.is_finite()
                && rect.max().x.is_finite()
                && rect.max().y.is_finite() =>
        {
            zone.boundary.intersects(&rect)
        }
        _ => false,
    }
}

/// Area of `subject` clipped to `zone`, in squared CRS units.
///
/// `Ok(0.0)` is a valid empty intersection; `Err` means the operation could
/// not be performed on the given geometry.
fn clip_area(zone: &Polygon<f64>, subject: &Polygon<f64>) -> Result<f64, GeometryFault> {
    check_valid(subject)?;
    if !zone.intersects(subject) {
        return Ok(0.0);
    }
    Ok(zone.intersection(subject).unsigned_area())
}

fn check_valid(polygon: &Polygon<f64>) -> Result<(), GeometryFault> {
    let exterior = polygon.exterior();
    if exterior.0.len() < 4 {
        return Err(GeometryFault {
            detail: format!("degenerate ring with {} coordinates", exterior.0.len()),
        });
    }
    if exterior
        .0
        .iter()
        .any(|coordinate| !coordinate.x.is_finite() || !coordinate.y.is_finite())
    {
        return Err(GeometryFault {
            detail: "non-finite coordinate".to_string(),
        });
    }
    if polygon.unsigned_area() == 0.0 {
        return Err(GeometryFault {
            detail: "zero-area polygon".to_string(),
        });
    }
    Ok(())
}
