//! The reachability tree search engine
//!
//! A label-setting search that explores the network in order of
//! increasing weight and keeps, per traversal identity, the cheapest
//! label seen so far. The frontier queue has no decrease-key: a
//! superseded or settled label is tombstoned in place and popped
//! entries with the tombstone set are discarded unprocessed.

use std::collections::BinaryHeap;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use log::debug;
use petgraph::graph::NodeIndex;

use super::label::{ExploreKind, LabelId, LabelStore, ReachLabel, TraversalId, TraversalMode};
use super::state::QueueEntry;
use crate::error::Error;
use crate::model::{RoadNetwork, Weighting};
use crate::seed::Seed;

/// Builds the tree of everything reachable within a time, distance or
/// weight budget. One instance serves exactly one search; the network
/// and weighting collaborators are only read.
pub struct ReachabilityTree<'a, W: Weighting> {
    network: &'a RoadNetwork,
    weighting: &'a W,
    reverse_flow: bool,
    traversal: TraversalMode,
    labels: LabelStore,
    best_known: HashMap<TraversalId, LabelId>,
    queue: BinaryHeap<QueueEntry>,
    visited: usize,
    limit: f64,
    explore_kind: ExploreKind,
    already_run: bool,
}

impl<'a, W: Weighting> ReachabilityTree<'a, W> {
    pub fn new(
        network: &'a RoadNetwork,
        weighting: &'a W,
        reverse_flow: bool,
        traversal: TraversalMode,
    ) -> Self {
        Self {
            network,
            weighting,
            reverse_flow,
            traversal,
            labels: LabelStore::default(),
            best_known: HashMap::with_capacity(1000),
            queue: BinaryHeap::with_capacity(1000),
            visited: 0,
            limit: -1.0,
            explore_kind: ExploreKind::Time,
            already_run: false,
        }
    }

    /// Time budget in milliseconds
    pub fn set_time_limit(&mut self, limit_ms: f64) {
        self.explore_kind = ExploreKind::Time;
        self.limit = limit_ms;
    }

    /// Distance budget in meters
    pub fn set_distance_limit(&mut self, limit_m: f64) {
        self.explore_kind = ExploreKind::Distance;
        self.limit = limit_m;
    }

    /// Weight budget in the active weighting's unit
    pub fn set_weight_limit(&mut self, limit: f64) {
        self.explore_kind = ExploreKind::Weight;
        self.limit = limit;
    }

    pub fn explore_kind(&self) -> ExploreKind {
        self.explore_kind
    }

    pub fn limit(&self) -> f64 {
        self.limit
    }

    pub fn reverse_flow(&self) -> bool {
        self.reverse_flow
    }

    /// Labels settled so far
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// The label's exploration value under the configured budget kind
    pub fn explore_value(&self, label: &ReachLabel) -> f64 {
        self.explore_kind.value(label)
    }

    pub fn parent_of(&self, label: &ReachLabel) -> Option<&ReachLabel> {
        label.parent.map(|id| self.labels.get(id))
    }

    /// Single-source convenience over [`ReachabilityTree::search`].
    pub fn search_from_node<F>(&mut self, from: NodeIndex, on_label: F) -> Result<usize, Error>
    where
        F: FnMut(&ReachLabel, Option<&ReachLabel>),
    {
        self.search(
            &[Seed {
                node: from,
                distance: 0.0,
            }],
            false,
            on_label,
        )
    }

    /// Runs the bounded multi-source search and returns the number of
    /// settled labels.
    ///
    /// `on_label` observes every seed (in node-based traversal) and
    /// every edge relaxation attempt, as `(candidate, parent)`, before
    /// the retention decision. The callback therefore sees the full
    /// explored-edge set, not only the retained tree.
    ///
    /// With `use_distance_as_weight` the frontier is ordered by
    /// accumulated distance instead of routing weight. Seeding from
    /// more than one disjoint origin requires this: routing weight is
    /// not a monotone lower bound across independently-seeded
    /// components, so settling by weight would no longer be safe.
    ///
    /// # Errors
    ///
    /// [`Error::SearchAlreadyRun`] on a second call, [`Error::NoSeeds`]
    /// for an empty seed set, [`Error::LimitNotSet`] when no positive
    /// budget has been configured.
    pub fn search<F>(
        &mut self,
        seeds: &[Seed],
        use_distance_as_weight: bool,
        mut on_label: F,
    ) -> Result<usize, Error>
    where
        F: FnMut(&ReachLabel, Option<&ReachLabel>),
    {
        if self.already_run {
            return Err(Error::SearchAlreadyRun);
        }
        self.already_run = true;
        if seeds.is_empty() {
            return Err(Error::NoSeeds);
        }
        if !(self.limit > 0.0) {
            return Err(Error::LimitNotSet);
        }

        let network = self.network;
        let weighting = self.weighting;

        for seed in seeds {
            let label = ReachLabel {
                node: seed.node,
                edge: None,
                // A distance-ordered frontier needs the seed's priority
                // key to equal its distance, snap residual included
                weight: if use_distance_as_weight {
                    seed.distance
                } else {
                    0.0
                },
                time: 0,
                distance: seed.distance,
                parent: None,
                deleted: false,
            };
            let id = self.labels.push(label);
            self.queue.push(QueueEntry {
                weight: label.weight,
                label: id,
            });
            if self.traversal == TraversalMode::NodeBased {
                self.best_known.insert(TraversalId::Node(seed.node), id);
                on_label(self.labels.get(id), None);
            }
        }

        while let Some(entry) = self.queue.pop() {
            if self.labels.get(entry.label).deleted {
                continue;
            }
            // Settled: reject future duplicates of this entry
            self.labels.mark_deleted(entry.label);
            self.visited += 1;

            let settled = *self.labels.get(entry.label);
            let settled_id = entry.label;

            for (edge, adjacent) in network.edges_from(settled.node, self.reverse_flow) {
                // No immediate u-turn back onto the incoming edge
                if settled.edge == Some(edge) {
                    continue;
                }
                let payload = network.edge(edge);
                let incremental_weight = weighting.edge_weight(edge, payload, self.reverse_flow)
                    + weighting.turn_weight(settled.edge, settled.node, edge);
                if !incremental_weight.is_finite() {
                    continue;
                }
                debug_assert!(incremental_weight >= 0.0, "negative edge weight");

                let next_distance = settled.distance + payload.length;
                let next_weight = if use_distance_as_weight {
                    next_distance
                } else {
                    settled.weight + incremental_weight
                };
                let next_time = settled.time
                    + weighting.edge_millis(edge, payload, self.reverse_flow)
                    + weighting.turn_millis(settled.edge, settled.node, edge);

                let candidate = ReachLabel {
                    node: adjacent,
                    edge: Some(edge),
                    weight: next_weight,
                    time: next_time,
                    distance: next_distance,
                    parent: Some(settled_id),
                    deleted: false,
                };
                on_label(&candidate, Some(&settled));

                let explore = self.explore_kind.value(&candidate);
                match self.best_known.entry(self.traversal.id_for(edge, adjacent)) {
                    Entry::Vacant(slot) => {
                        let id = self.labels.push(candidate);
                        slot.insert(id);
                        // Over-limit labels stay in the map as the
                        // boundary but are never expanded
                        if explore <= self.limit {
                            self.queue.push(QueueEntry {
                                weight: candidate.weight,
                                label: id,
                            });
                        }
                    }
                    Entry::Occupied(mut slot) => {
                        let current = *slot.get();
                        if self.labels.get(current).weight > candidate.weight {
                            self.labels.mark_deleted(current);
                            let id = self.labels.push(candidate);
                            slot.insert(id);
                            if explore <= self.limit {
                                self.queue.push(QueueEntry {
                                    weight: candidate.weight,
                                    label: id,
                                });
                            }
                        }
                    }
                }
            }
        }

        debug!(
            "reachability search settled {} labels ({} created)",
            self.visited,
            self.labels.len()
        );
        Ok(self.visited)
    }

    /// Every label retained in the best-known map, in deterministic
    /// (node, edge) order.
    ///
    /// # Errors
    ///
    /// [`Error::SearchNotRun`] before a search has completed.
    pub fn retained_labels(&self) -> Result<Vec<&ReachLabel>, Error> {
        if !self.already_run {
            return Err(Error::SearchNotRun);
        }
        let mut labels: Vec<&ReachLabel> = self
            .best_known
            .values()
            .map(|&id| self.labels.get(id))
            .collect();
        labels.sort_by_key(|l| (l.node, l.edge));
        Ok(labels)
    }

    /// The frontier of the tree: retained labels whose exploration
    /// value exceeds the limit. Their parents are at or below the
    /// limit, so these are the leaves where the budget ran out.
    ///
    /// # Errors
    ///
    /// [`Error::SearchNotRun`] before a search has completed.
    pub fn boundary_labels(&self) -> Result<Vec<&ReachLabel>, Error> {
        let labels = self.retained_labels()?;
        let boundary: Vec<&ReachLabel> = labels
            .into_iter()
            .filter(|label| self.explore_value(label) > self.limit)
            .collect();
        debug_assert!(boundary.iter().all(|label| {
            self.parent_of(label)
                .map(|parent| self.explore_value(parent) <= self.limit)
                .unwrap_or(true)
        }));
        Ok(boundary)
    }

    /// This engine grows a tree, not a point-to-point path.
    ///
    /// # Errors
    ///
    /// Always [`Error::UnsupportedOperation`].
    pub fn extract_path(&self, _from: NodeIndex, _to: NodeIndex) -> Result<Vec<NodeIndex>, Error> {
        Err(Error::UnsupportedOperation(
            "reachability trees do not yield point-to-point paths",
        ))
    }
}
