//! Spatial index over the road network
//!
//! Two R-trees: node points for nearest-valid snapping, edge envelopes
//! for bounding-box candidate enumeration.

use geo::{BoundingRect, Distance, Haversine, Point, Rect};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use rstar::{
    AABB, RTree,
    primitives::{GeomWithData, Rectangle},
};

use super::components::{RoadEdge, RoadNode};

pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;
type IndexedEnvelope = GeomWithData<Rectangle<[f64; 2]>, EdgeIndex>;

/// A geographic point snapped onto the graph
#[derive(Debug, Clone, Copy)]
pub struct Snap {
    pub node: NodeIndex,
    /// Residual offset between the queried point and the snapped node,
    /// in meters
    pub distance: f64,
}

#[derive(Debug, Clone)]
pub struct SpatialIndex {
    nodes: RTree<IndexedPoint>,
    edges: RTree<IndexedEnvelope>,
}

impl SpatialIndex {
    pub(crate) fn build(graph: &DiGraph<RoadNode, RoadEdge>) -> Self {
        let node_entries: Vec<IndexedPoint> = graph
            .node_indices()
            .map(|n| {
                let p = graph[n].geometry;
                GeomWithData::new([p.x(), p.y()], n)
            })
            .collect();

        let edge_entries: Vec<IndexedEnvelope> = graph
            .edge_references()
            .map(|edge| {
                // Edges without stored geometry fall back to the endpoint bbox
                let rect = edge.weight().geometry.bounding_rect().unwrap_or_else(|| {
                    Rect::new(
                        graph[edge.source()].geometry.0,
                        graph[edge.target()].geometry.0,
                    )
                });
                GeomWithData::new(
                    Rectangle::from_corners(
                        [rect.min().x, rect.min().y],
                        [rect.max().x, rect.max().y],
                    ),
                    edge.id(),
                )
            })
            .collect();

        Self {
            nodes: RTree::bulk_load(node_entries),
            edges: RTree::bulk_load(edge_entries),
        }
    }

    /// Nearest node accepted by `filter`, or `None` when no node passes.
    /// The residual snap distance is haversine meters.
    pub fn nearest_valid<F>(&self, point: Point<f64>, filter: F) -> Option<Snap>
    where
        F: Fn(NodeIndex) -> bool,
    {
        self.nodes
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .find(|candidate| filter(candidate.data))
            .map(|candidate| {
                let geom = candidate.geom();
                Snap {
                    node: candidate.data,
                    distance: Haversine.distance(point, Point::new(geom[0], geom[1])),
                }
            })
    }

    /// Edges whose geometry envelope intersects `rect`.
    pub fn edges_in_envelope(&self, rect: Rect<f64>) -> Vec<EdgeIndex> {
        let envelope =
            AABB::from_corners([rect.min().x, rect.min().y], [rect.max().x, rect.max().y]);
        self.edges
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.data)
            .collect()
    }
}
