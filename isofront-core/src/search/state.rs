use std::cmp::Ordering;

use super::label::LabelId;
use crate::Weight;

/// Frontier queue entry. The label's weight is denormalized into the
/// entry because superseded labels stay in the heap as tombstones and
/// must keep their original position.
#[derive(Copy, Clone)]
pub(super) struct QueueEntry {
    pub(super) weight: Weight,
    pub(super) label: LabelId,
}

// Implement Ord for QueueEntry to use in BinaryHeap
impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by weight (reversed from standard Rust BinaryHeap)
        other.weight.total_cmp(&self.weight)
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}
