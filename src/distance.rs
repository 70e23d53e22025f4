//! Inter-zone distance matrices: geodesic or road-network shortest path.
//!
//! Both strategies sit behind [`DistanceProvider`]; the matrix builder visits
//! each unordered pair once and mirrors the result into both cells, so the
//! matrix is symmetric by construction.

use std::collections::HashMap;

use geo::Point;
use petgraph::algo::astar;
use petgraph::graphmap::UnGraphMap;
use tracing::debug;

use crate::city::City;
use crate::error::ModelError;
use crate::zones::Zone;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Symmetric Z×Z matrix of inter-zone distances in kilometers.
///
/// The diagonal is never written; self-distance is undefined and the solver
/// never consults it.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    zones: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    fn new(zones: usize) -> Self {
        Self {
            zones,
            cells: vec![f64::NAN; zones * zones],
        }
    }

    pub fn zones(&self) -> usize {
        self.zones
    }

    /// Distance between two distinct zones in kilometers.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        debug_assert_ne!(from, to, "self-distance is undefined");
        self.cells[from * self.zones + to]
    }

    fn set_pair(&mut self, a: usize, b: usize, km: f64) {
        self.cells[a * self.zones + b] = km;
        self.cells[b * self.zones + a] = km;
    }
}

/// Strategy seam for inter-zone distance computation.
pub trait DistanceProvider {
    fn distance_km(&self, from: &Zone, to: &Zone) -> Result<f64, ModelError>;
}

/// Build the full matrix from a provider, flooring every distance to
/// `min_km` so downstream inverse-power impedance stays finite for
/// near-coincident centroids.
pub fn build_matrix<P: DistanceProvider>(
    zones: &[Zone],
    provider: &P,
    min_km: f64,
) -> Result<DistanceMatrix, ModelError> {
    let mut matrix = DistanceMatrix::new(zones.len());
    for i in 0..zones.len() {
        for j in i + 1..zones.len() {
            let km = provider.distance_km(&zones[i], &zones[j])?;
            matrix.set_pair(i, j, km.max(min_km));
        }
    }
    debug!(zones = zones.len(), "built distance matrix");
    Ok(matrix)
}

/// Great-circle distance between zone centroids.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeodesicDistance;

impl DistanceProvider for GeodesicDistance {
    fn distance_km(&self, from: &Zone, to: &Zone) -> Result<f64, ModelError> {
        Ok(haversine_km(&from.centroid, &to.centroid))
    }
}

/// Haversine distance between two lon/lat points, in kilometers.
pub fn haversine_km(from: &Point<f64>, to: &Point<f64>) -> f64 {
    let lat1 = from.y().to_radians();
    let lat2 = to.y().to_radians();
    let delta_lat = (to.y() - from.y()).to_radians();
    let delta_lng = (to.x() - from.x()).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);

    EARTH_RADIUS_KM * 2.0 * a.sqrt().asin()
}

/// Shortest-path distance over the road graph, between the road nodes
/// nearest to each zone centroid. A* with the great-circle lower bound as
/// an admissible heuristic.
pub struct NetworkDistance {
    graph: UnGraphMap<i64, f64>,
    positions: HashMap<i64, Point<f64>>,
}

impl NetworkDistance {
    pub fn new(city: &City) -> Self {
        let mut positions = HashMap::new();
        for node in &city.road_nodes {
            positions.insert(node.id, node.location);
        }

        let mut graph = UnGraphMap::new();
        for node in &city.road_nodes {
            graph.add_node(node.id);
        }
        for edge in &city.road_edges {
            let (Some(from), Some(to)) = (positions.get(&edge.from), positions.get(&edge.to))
            else {
                continue;
            };
            let km = edge
                .length_m
                .map(|meters| meters / 1000.0)
                .unwrap_or_else(|| haversine_km(from, to));
            graph.add_edge(edge.from, edge.to, km);
        }

        Self { graph, positions }
    }

    fn nearest_node(&self, point: &Point<f64>) -> Option<i64> {
        self.positions
            .iter()
            .min_by(|(_, a), (_, b)| {
                haversine_km(a, point).total_cmp(&haversine_km(b, point))
            })
            .map(|(id, _)| *id)
    }
}

impl DistanceProvider for NetworkDistance {
    fn distance_km(&self, from: &Zone, to: &Zone) -> Result<f64, ModelError> {
        let unreachable = || ModelError::Unreachable {
            from_zone: from.id,
            to_zone: to.id,
        };

        let start = self.nearest_node(&from.centroid).ok_or_else(unreachable)?;
        let goal = self.nearest_node(&to.centroid).ok_or_else(unreachable)?;
        let goal_position = self.positions[&goal];

        let (km, _) = astar(
            &self.graph,
            start,
            |node| node == goal,
            |(_, _, km)| *km,
            |node| haversine_km(&self.positions[&node], &goal_position),
        )
        .ok_or_else(unreachable)?;

        Ok(km)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::{RoadEdge, RoadNode};
    use geo::{point, polygon};

    fn zone_at(id: usize, x: f64, y: f64) -> Zone {
        Zone {
            id,
            boundary: polygon![
                (x: x - 0.01, y: y - 0.01),
                (x: x + 0.01, y: y - 0.01),
                (x: x + 0.01, y: y + 0.01),
                (x: x - 0.01, y: y + 0.01),
            ],
            centroid: point! { x: x, y: y },
        }
    }

    #[test]
    fn test_haversine_same_point() {
        let p = point! { x: -115.1, y: 36.1 };
        assert!(haversine_km(&p, &p) < 0.001);
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, ~370 km.
        let vegas = point! { x: -115.14, y: 36.17 };
        let los_angeles = point! { x: -118.24, y: 34.05 };
        let km = haversine_km(&vegas, &los_angeles);
        assert!(km > 350.0 && km < 400.0, "expected ~370km, got {}", km);
    }

    #[test]
    fn test_matrix_symmetric() {
        let zones = vec![
            zone_at(0, -115.1, 36.1),
            zone_at(1, -115.2, 36.2),
            zone_at(2, -115.3, 36.3),
        ];
        let matrix = build_matrix(&zones, &GeodesicDistance, 0.001).unwrap();
        for i in 0..zones.len() {
            for j in 0..zones.len() {
                if i != j {
                    assert_eq!(matrix.get(i, j), matrix.get(j, i));
                }
            }
        }
    }

    #[test]
    fn test_coincident_centroids_floored() {
        let zones = vec![zone_at(0, -115.1, 36.1), zone_at(1, -115.1, 36.1)];
        let matrix = build_matrix(&zones, &GeodesicDistance, 0.001).unwrap();
        assert_eq!(matrix.get(0, 1), 0.001);
    }

    fn line_city() -> City {
        // Three nodes in a row, 1000 m apart by measured length.
        City {
            road_nodes: vec![
                RoadNode { id: 1, location: point! { x: -115.10, y: 36.10 } },
                RoadNode { id: 2, location: point! { x: -115.11, y: 36.10 } },
                RoadNode { id: 3, location: point! { x: -115.12, y: 36.10 } },
            ],
            road_edges: vec![
                RoadEdge { from: 1, to: 2, length_m: Some(1000.0) },
                RoadEdge { from: 2, to: 3, length_m: Some(1000.0) },
            ],
            ..City::default()
        }
    }

    #[test]
    fn test_network_path_length() {
        let provider = NetworkDistance::new(&line_city());
        let from = zone_at(0, -115.10, 36.10);
        let to = zone_at(1, -115.12, 36.10);
        let km = provider.distance_km(&from, &to).unwrap();
        assert!((km - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_network_unreachable_pair() {
        let mut city = line_city();
        // Disconnect node 3.
        city.road_edges.pop();
        let provider = NetworkDistance::new(&city);
        let from = zone_at(0, -115.10, 36.10);
        let to = zone_at(1, -115.12, 36.10);
        assert!(matches!(
            provider.distance_km(&from, &to),
            Err(ModelError::Unreachable { from_zone: 0, to_zone: 1 })
        ));
    }

    #[test]
    fn test_network_falls_back_to_geodesic_edge_length() {
        let mut city = line_city();
        for edge in &mut city.road_edges {
            edge.length_m = None;
        }
        let provider = NetworkDistance::new(&city);
        let from = zone_at(0, -115.10, 36.10);
        let to = zone_at(1, -115.12, 36.10);
        let km = provider.distance_km(&from, &to).unwrap();
        // 0.02 degrees of longitude at this latitude is roughly 1.8 km.
        assert!(km > 1.0 && km < 3.0, "got {}", km);
    }
}
