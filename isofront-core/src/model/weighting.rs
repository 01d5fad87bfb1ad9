//! The weighting seam between the search engine and a routing profile

use petgraph::graph::{EdgeIndex, NodeIndex};

use super::components::RoadEdge;
use crate::{Millis, Weight};

/// Routing cost of individual edge traversals and turns.
///
/// Implementations must be deterministic and must never return a
/// negative weight; `f64::INFINITY` marks an impassable edge or a
/// forbidden turn. Implementations with non-trivial turn costs should
/// be searched with [`crate::search::TraversalMode::EdgeBased`] so that
/// labels are deduplicated per (node, incoming edge).
pub trait Weighting {
    /// Incremental routing weight for traversing `edge`.
    fn edge_weight(&self, edge: EdgeIndex, payload: &RoadEdge, reverse: bool) -> Weight;

    /// Incremental elapsed time for traversing `edge`.
    fn edge_millis(&self, edge: EdgeIndex, payload: &RoadEdge, reverse: bool) -> Millis;

    /// Extra weight for entering `to` from `from` at the shared node.
    /// `from` is `None` when expanding a seed.
    fn turn_weight(&self, _from: Option<EdgeIndex>, _via: NodeIndex, _to: EdgeIndex) -> Weight {
        0.0
    }

    /// Extra elapsed time for the turn.
    fn turn_millis(&self, _from: Option<EdgeIndex>, _via: NodeIndex, _to: EdgeIndex) -> Millis {
        0
    }
}

/// Travel-time weighting: weight is free-flow seconds. Edges with
/// non-positive speed are blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastestWeighting;

impl Weighting for FastestWeighting {
    fn edge_weight(&self, _edge: EdgeIndex, payload: &RoadEdge, _reverse: bool) -> Weight {
        if payload.speed > 0.0 {
            payload.length / payload.speed
        } else {
            f64::INFINITY
        }
    }

    fn edge_millis(&self, _edge: EdgeIndex, payload: &RoadEdge, _reverse: bool) -> Millis {
        payload.travel_millis()
    }
}

/// Distance weighting: weight is meters. Speed still drives elapsed
/// time, and still blocks impassable edges.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestWeighting;

impl Weighting for ShortestWeighting {
    fn edge_weight(&self, _edge: EdgeIndex, payload: &RoadEdge, _reverse: bool) -> Weight {
        if payload.speed > 0.0 {
            payload.length
        } else {
            f64::INFINITY
        }
    }

    fn edge_millis(&self, _edge: EdgeIndex, payload: &RoadEdge, _reverse: bool) -> Millis {
        payload.travel_millis()
    }
}
