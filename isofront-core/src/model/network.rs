//! The road graph and its builder

use geo::{Coord, LineString, Point};
use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::components::{RoadEdge, RoadNode};
use super::index::SpatialIndex;

/// Directed road graph plus its spatial index.
///
/// Bidirectional streets are stored as two directed edges, so a
/// forward search only ever walks `Outgoing` edges and a reverse
/// search only `Incoming` ones.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    index: SpatialIndex,
}

impl RoadNetwork {
    pub fn builder() -> RoadNetworkBuilder {
        RoadNetworkBuilder::default()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, node: NodeIndex) -> &RoadNode {
        &self.graph[node]
    }

    pub fn node_point(&self, node: NodeIndex) -> Point<f64> {
        self.graph[node].geometry
    }

    pub fn edge(&self, edge: EdgeIndex) -> &RoadEdge {
        &self.graph[edge]
    }

    pub fn endpoints(&self, edge: EdgeIndex) -> Option<(NodeIndex, NodeIndex)> {
        self.graph.edge_endpoints(edge)
    }

    /// Interior (pillar) points of the edge polyline, source to target,
    /// endpoints excluded.
    pub fn pillar_points(&self, edge: EdgeIndex) -> &[Coord<f64>] {
        let coords = &self.graph[edge].geometry.0;
        if coords.len() <= 2 {
            &[]
        } else {
            &coords[1..coords.len() - 1]
        }
    }

    /// Edges leaving `node` (or entering it when `reverse` is set),
    /// yielded as (edge, adjacent node).
    pub fn edges_from(
        &self,
        node: NodeIndex,
        reverse: bool,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex)> + '_ {
        let direction = if reverse {
            Direction::Incoming
        } else {
            Direction::Outgoing
        };
        self.graph.edges_directed(node, direction).map(move |edge| {
            let adjacent = if reverse { edge.source() } else { edge.target() };
            (edge.id(), adjacent)
        })
    }

    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }
}

#[derive(Debug, Default)]
pub struct RoadNetworkBuilder {
    graph: DiGraph<RoadNode, RoadEdge>,
}

impl RoadNetworkBuilder {
    pub fn add_node(&mut self, id: i64, point: Point<f64>) -> NodeIndex {
        self.graph.add_node(RoadNode {
            id,
            geometry: point,
        })
    }

    /// Adds one directed edge. An empty geometry is replaced by the
    /// straight line between the endpoints.
    pub fn add_edge(&mut self, from: NodeIndex, to: NodeIndex, mut edge: RoadEdge) -> EdgeIndex {
        if edge.geometry.0.is_empty() {
            edge.geometry =
                LineString::new(vec![self.graph[from].geometry.0, self.graph[to].geometry.0]);
        }
        self.graph.add_edge(from, to, edge)
    }

    /// Adds a bidirectional street: the forward edge plus a backward
    /// twin with reversed geometry.
    pub fn add_two_way(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        edge: RoadEdge,
    ) -> (EdgeIndex, EdgeIndex) {
        let forward = self.add_edge(from, to, edge.clone());
        let mut backward = self.graph[forward].clone();
        backward.geometry.0.reverse();
        let backward = self.graph.add_edge(to, from, backward);
        (forward, backward)
    }

    pub fn build(self) -> RoadNetwork {
        let index = SpatialIndex::build(&self.graph);
        RoadNetwork {
            graph: self.graph,
            index,
        }
    }
}
