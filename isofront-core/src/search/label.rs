//! Labels, their arena, and traversal identities

use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{Millis, Weight};

/// Handle into the [`LabelStore`] arena. Parent links are handles into
/// the same arena, which keeps the forest acyclic by construction: a
/// label can only point at labels created before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(u32);

impl LabelId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One discovered search state: a graph position, the three accumulated
/// costs of the cheapest known way to reach it, and the label it was
/// derived from.
///
/// Labels are immutable after creation except for the `deleted`
/// tombstone, which is flipped when the label is settled or superseded
/// by a cheaper label for the same traversal identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachLabel {
    pub node: NodeIndex,
    /// Edge this label arrived through; `None` for seeds
    pub edge: Option<EdgeIndex>,
    /// Accumulated routing weight; the frontier queue orders by this
    pub weight: Weight,
    /// Accumulated elapsed time
    pub time: Millis,
    /// Accumulated distance in meters
    pub distance: f64,
    pub parent: Option<LabelId>,
    pub(crate) deleted: bool,
}

impl ReachLabel {
    pub fn is_seed(&self) -> bool {
        self.parent.is_none()
    }
}

/// Arena owning every label created during one search.
#[derive(Debug, Default)]
pub(crate) struct LabelStore {
    labels: Vec<ReachLabel>,
}

impl LabelStore {
    pub(crate) fn push(&mut self, label: ReachLabel) -> LabelId {
        let id = LabelId::new(self.labels.len());
        self.labels.push(label);
        id
    }

    pub(crate) fn get(&self, id: LabelId) -> &ReachLabel {
        &self.labels[id.index()]
    }

    pub(crate) fn mark_deleted(&mut self, id: LabelId) {
        self.labels[id.index()].deleted = true;
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Which accumulated scalar the search budget applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExploreKind {
    Time,
    Distance,
    Weight,
}

impl ExploreKind {
    /// The label's exploration value, as a comparable scalar
    /// (milliseconds for [`ExploreKind::Time`]).
    pub fn value(self, label: &ReachLabel) -> f64 {
        match self {
            ExploreKind::Time => label.time as f64,
            ExploreKind::Distance => label.distance,
            ExploreKind::Weight => label.weight,
        }
    }
}

/// Label deduplication granularity.
///
/// Node-based traversal keys labels by node alone. Edge-based traversal
/// keys them by (edge, arrival node) so that turn costs conditioned on
/// the incoming edge stay admissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    NodeBased,
    EdgeBased,
}

impl TraversalMode {
    pub(crate) fn id_for(self, edge: EdgeIndex, adjacent: NodeIndex) -> TraversalId {
        match self {
            TraversalMode::NodeBased => TraversalId::Node(adjacent),
            TraversalMode::EdgeBased => TraversalId::Edge(edge, adjacent),
        }
    }
}

/// Deduplication key for the best-known map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraversalId {
    Node(NodeIndex),
    Edge(EdgeIndex, NodeIndex),
}
