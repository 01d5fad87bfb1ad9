//! Road network components - nodes and edges

use geo::{LineString, Point};

use crate::Millis;

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// Stable external ID of the node (e.g. an OSM node ID)
    pub id: i64,
    /// Node coordinates (lon/lat degrees)
    pub geometry: Point<f64>,
}

/// Road graph edge (one directed street segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Segment length in meters
    pub length: f64,
    /// Free-flow speed in m/s; non-positive means impassable
    pub speed: f64,
    /// Full polyline from the source node to the target node, endpoints
    /// included. Interior points are the pillar points used for contour
    /// interpolation.
    pub geometry: LineString<f64>,
}

impl RoadEdge {
    /// Edge without intermediate geometry; the builder fills in the
    /// straight line between the endpoints.
    pub fn new(length: f64, speed: f64) -> Self {
        Self {
            length,
            speed,
            geometry: LineString::new(Vec::new()),
        }
    }

    pub fn with_geometry(length: f64, speed: f64, geometry: LineString<f64>) -> Self {
        Self {
            length,
            speed,
            geometry,
        }
    }

    /// Free-flow traversal time. Zero for impassable edges; weightings
    /// block those before asking for a duration.
    pub fn travel_millis(&self) -> Millis {
        if self.speed > 0.0 {
            (self.length / self.speed * 1000.0).round() as Millis
        } else {
            0
        }
    }
}
