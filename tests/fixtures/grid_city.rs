//! Synthetic city builder over a fixed 2x2 analysis extent.
//!
//! The extent is pinned by road nodes at its corners: longitude -115.12 to
//! -115.08, latitude 36.10 to 36.14. With a 2x2 grid, zone 0 is the
//! south-west cell, zone 1 south-east, zone 2 north-west, zone 3 north-east.

use demand_planner::city::{Building, City, LanduseArea, Poi, RoadEdge, RoadNode};
use demand_planner::model::{BuildingKind, LanduseClass};
use geo::{point, polygon, Polygon};

/// Axis-aligned square centered on `(x, y)` with the given half-width.
pub fn square(x: f64, y: f64, half: f64) -> Polygon<f64> {
    polygon![
        (x: x - half, y: y - half),
        (x: x + half, y: y - half),
        (x: x + half, y: y + half),
        (x: x - half, y: y + half),
    ]
}

/// Zone center coordinates for the 2x2 grid over the fixture extent.
pub const ZONE_CENTERS: [(f64, f64); 4] = [
    (-115.11, 36.11), // zone 0, south-west
    (-115.09, 36.11), // zone 1, south-east
    (-115.11, 36.13), // zone 2, north-west
    (-115.09, 36.13), // zone 3, north-east
];

#[derive(Debug, Default)]
pub struct CityBuilder {
    city: City,
    next_node_id: i64,
}

impl CityBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Road nodes at all four extent corners, chained by edges. Every zone
    /// of the 2x2 grid gets road coverage.
    pub fn with_corner_roads(mut self) -> Self {
        let corners = [
            (-115.12, 36.10),
            (-115.08, 36.10),
            (-115.12, 36.14),
            (-115.08, 36.14),
        ];
        for (x, y) in corners {
            self = self.road_node(x, y);
        }
        self.road_edge(1, 2, Some(3600.0))
            .road_edge(2, 4, Some(4400.0))
            .road_edge(4, 3, Some(3600.0))
            .road_edge(3, 1, Some(4400.0))
    }

    /// Corner road nodes for zones 0, 1, and 2 only; zone 3 is left without
    /// any road presence.
    pub fn with_partial_roads(mut self) -> Self {
        let corners = [(-115.12, 36.10), (-115.08, 36.10), (-115.12, 36.14)];
        for (x, y) in corners {
            self = self.road_node(x, y);
        }
        self.road_edge(1, 2, Some(3600.0)).road_edge(1, 3, Some(4400.0))
    }

    pub fn road_node(mut self, x: f64, y: f64) -> Self {
        self.next_node_id += 1;
        self.city.road_nodes.push(RoadNode {
            id: self.next_node_id,
            location: point! { x: x, y: y },
        });
        self
    }

    pub fn road_edge(mut self, from: i64, to: i64, length_m: Option<f64>) -> Self {
        self.city.road_edges.push(RoadEdge { from, to, length_m });
        self
    }

    pub fn poi(mut self, x: f64, y: f64, amenity: Option<&str>) -> Self {
        self.city.pois.push(Poi {
            location: point! { x: x, y: y },
            amenity: amenity.map(str::to_string),
        });
        self
    }

    pub fn building(mut self, x: f64, y: f64, half: f64, kind: Option<BuildingKind>) -> Self {
        self.city.buildings.push(Building {
            footprint: square(x, y, half),
            kind,
        });
        self
    }

    pub fn landuse(mut self, x: f64, y: f64, half: f64, class: LanduseClass) -> Self {
        self.city.landuse.push(LanduseArea {
            geometry: square(x, y, half),
            class,
        });
        self
    }

    pub fn build(self) -> City {
        self.city
    }
}

/// A fully populated 2x2 fixture city with hand-computable attributes:
/// zone 0 has 400 residents (apartments), 3 classified POIs, and a
/// commercial square covering 25% of the zone; the other zones carry
/// smaller signals.
pub fn populated_city() -> City {
    let (x0, y0) = ZONE_CENTERS[0];
    let (x1, y1) = ZONE_CENTERS[1];
    let (x2, y2) = ZONE_CENTERS[2];
    let (x3, y3) = ZONE_CENTERS[3];

    CityBuilder::new()
        .with_corner_roads()
        // zone 0: strongest signals
        .building(x0, y0, 0.001, Some(BuildingKind::Apartments))
        .poi(x0 - 0.004, y0, Some("cafe"))
        .poi(x0 + 0.004, y0, Some("school"))
        .poi(x0, y0 + 0.004, Some("bank"))
        .poi(x0, y0 - 0.004, None) // unclassified, must not count
        .landuse(x0, y0, 0.005, LanduseClass::Commercial)
        // zone 1
        .building(x1 - 0.003, y1, 0.001, Some(BuildingKind::House))
        .building(x1 + 0.003, y1, 0.001, Some(BuildingKind::House))
        .poi(x1, y1, Some("restaurant"))
        .landuse(x1, y1, 0.005, LanduseClass::Residential)
        // zone 2
        .building(x2, y2, 0.001, Some(BuildingKind::Hotel))
        .poi(x2 - 0.003, y2, Some("bar"))
        .poi(x2 + 0.003, y2, Some("library"))
        .landuse(x2, y2, 0.005, LanduseClass::Retail)
        // zone 3: weakest signals
        .building(x3, y3, 0.001, Some(BuildingKind::House))
        .building(x3, y3 + 0.004, 0.001, None) // unrecognized kind
        .landuse(x3, y3, 0.0025, LanduseClass::Residential)
        .build()
}
