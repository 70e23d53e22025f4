//! Input bundle produced by the data-acquisition collaborator.
//!
//! The core never parses raw geographic data; it consumes this bundle as-is.
//! All geometries are assumed to share one coordinate reference system
//! (WGS84, `x` = longitude, `y` = latitude).

use geo::{coord, Point, Polygon, Rect};

use crate::model::{BuildingKind, LanduseClass};

/// A node of the road network (intersection or shape point).
#[derive(Debug, Clone)]
pub struct RoadNode {
    pub id: i64,
    pub location: Point<f64>,
}

/// An undirected road segment between two nodes.
#[derive(Debug, Clone)]
pub struct RoadEdge {
    pub from: i64,
    pub to: i64,
    /// Measured segment length in meters. When absent, the great-circle
    /// distance between the endpoints is used instead.
    pub length_m: Option<f64>,
}

/// A point of interest. Only features carrying a classification attribute
/// (e.g. an amenity tag) count towards zone POI density.
#[derive(Debug, Clone)]
pub struct Poi {
    pub location: Point<f64>,
    pub amenity: Option<String>,
}

/// A classified land-use polygon.
#[derive(Debug, Clone)]
pub struct LanduseArea {
    pub geometry: Polygon<f64>,
    pub class: LanduseClass,
}

/// A building footprint. Unclassified buildings contribute no population.
#[derive(Debug, Clone)]
pub struct Building {
    pub footprint: Polygon<f64>,
    pub kind: Option<BuildingKind>,
}

/// Everything the pipeline needs to know about a city.
#[derive(Debug, Clone, Default)]
pub struct City {
    pub road_nodes: Vec<RoadNode>,
    pub road_edges: Vec<RoadEdge>,
    pub pois: Vec<Poi>,
    pub landuse: Vec<LanduseArea>,
    pub buildings: Vec<Building>,
}

impl City {
    /// Bounding extent of the road network, which defines the analysis area.
    /// `None` when there are no road nodes at all.
    pub fn extent(&self) -> Option<Rect<f64>> {
        let mut nodes = self.road_nodes.iter();
        let first = nodes.next()?.location;
        let (mut min_x, mut min_y) = (first.x(), first.y());
        let (mut max_x, mut max_y) = (first.x(), first.y());
        for node in nodes {
            min_x = min_x.min(node.location.x());
            min_y = min_y.min(node.location.y());
            max_x = max_x.max(node.location.x());
            max_y = max_y.max(node.location.y());
        }
        Some(Rect::new(
            coord! { x: min_x, y: min_y },
            coord! { x: max_x, y: max_y },
        ))
    }
}
