//! Contour segment extraction
//!
//! Turns the label forest (or the live relaxation stream) into
//! cost-interpolated line segments along each explored edge's geometry.
//! Downstream contour/polygon builders consume the segment list; this
//! module stops there.

pub mod segment;
mod to_geojson;

pub use segment::{CostedCoord, CostedSegment};
pub use to_geojson::segments_to_geojson;

use geo::{Distance, Euclidean, Point};
use itertools::Itertools;

use crate::error::Error;
use crate::model::{RoadNetwork, Weighting};
use crate::search::{ExploreKind, ReachLabel, ReachabilityTree};

/// Collects cost-annotated segments from labels.
///
/// Two ways to drive it: feed [`SegmentCollector::observe`] from the
/// search's `on_label` callback to capture the full explored-edge set
/// (dominated and over-limit relaxations included), or call
/// [`SegmentCollector::collect_tree`] afterwards to walk only the
/// retained tree within the budget.
pub struct SegmentCollector<'a> {
    network: &'a RoadNetwork,
    explore_kind: ExploreKind,
    reverse_flow: bool,
    segments: Vec<CostedSegment>,
}

impl<'a> SegmentCollector<'a> {
    pub fn new(network: &'a RoadNetwork, explore_kind: ExploreKind, reverse_flow: bool) -> Self {
        Self {
            network,
            explore_kind,
            reverse_flow,
            segments: Vec::new(),
        }
    }

    /// Emits the segments for one label transition. Matches the search
    /// engine's `on_label` signature; seeds (no parent) yield nothing.
    pub fn observe(&mut self, label: &ReachLabel, parent: Option<&ReachLabel>) {
        let Some(parent) = parent else { return };
        let Some(edge) = label.edge else { return };
        let Some((source, target)) = self.network.endpoints(edge) else {
            return;
        };

        // Reverse searches accumulate cost against the travel
        // direction; negating keeps the output ordering convention
        // identical for both directions
        let sign = if self.reverse_flow { -1.0 } else { 1.0 };
        let from_cost = sign * self.cost_of(parent);
        let to_cost = sign * self.cost_of(label);

        let mut points: Vec<Point<f64>> = Vec::new();
        points.push(self.network.node_point(parent.node));
        let pillars = self.network.pillar_points(edge);
        if parent.node == target && label.node == source {
            // Traversed against the stored geometry direction
            points.extend(pillars.iter().rev().map(|c| Point::from(*c)));
        } else {
            points.extend(pillars.iter().map(|c| Point::from(*c)));
        }
        points.push(self.network.node_point(label.node));

        let coords = interpolate_costs(&points, from_cost, to_cost);
        self.segments
            .extend(coords.into_iter().tuple_windows().map(|(from, to)| {
                CostedSegment { from, to }
            }));
    }

    /// Walks the finished tree and emits segments for every retained
    /// label within the budget.
    ///
    /// # Errors
    ///
    /// [`Error::SearchNotRun`] when the tree has not searched yet.
    pub fn collect_tree<W: Weighting>(
        &mut self,
        tree: &ReachabilityTree<'_, W>,
    ) -> Result<(), Error> {
        for label in tree.retained_labels()? {
            if tree.explore_value(label) > tree.limit() {
                continue;
            }
            self.observe(label, tree.parent_of(label));
        }
        Ok(())
    }

    pub fn segments(&self) -> &[CostedSegment] {
        &self.segments
    }

    /// Finishes collection; segments come out in their total order for
    /// stable output across runs.
    pub fn into_sorted_segments(mut self) -> Vec<CostedSegment> {
        self.segments.sort();
        self.segments
    }

    fn cost_of(&self, label: &ReachLabel) -> f64 {
        match self.explore_kind {
            ExploreKind::Time => label.time as f64 / 1000.0,
            ExploreKind::Distance => label.distance,
            ExploreKind::Weight => label.weight,
        }
    }
}

/// Linear cost interpolation along the point chain, weighted by
/// cumulative euclidean arc length; falls back to index fractions when
/// the chain's length is degenerate.
fn interpolate_costs(points: &[Point<f64>], from_cost: f64, to_cost: f64) -> Vec<CostedCoord> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in points.windows(2) {
        total += Euclidean.distance(pair[0], pair[1]);
        cumulative.push(total);
    }

    let span = points.len().saturating_sub(1).max(1) as f64;
    points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let fraction = if total.is_finite() && total > 0.0 {
                cumulative[i] / total
            } else {
                i as f64 / span
            };
            CostedCoord::new(
                point.y(),
                point.x(),
                from_cost + (to_cost - from_cost) * fraction,
            )
        })
        .collect()
}
