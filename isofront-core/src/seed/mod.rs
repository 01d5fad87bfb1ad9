//! Multi-source seeding from points and polygonal regions
//!
//! Turns request geometry into the zero-cost start states of a search.
//! Polygon boundaries are densified and snapped onto the graph; nodes
//! strictly inside a region (and outside its holes) become exact seeds.

use geo::{Contains, LineString, Point, Polygon};
use hashbrown::HashMap;
use log::{info, trace};
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::error::Error;
use crate::model::{RoadNetwork, Weighting};

/// Maximum spacing of densified boundary points, in degrees.
pub const BOUNDARY_DENSIFY_DEG: f64 = 1e-4;

/// One search start state: a graph node plus the residual offset of the
/// snap that produced it. Weight and time always start at zero;
/// boundary-snapped seeds carry the snap residual as distance so they
/// are not mistaken for exact-cost sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seed {
    pub node: NodeIndex,
    pub distance: f64,
}

/// The seeds of one search, plus the frontier-ordering constraint they
/// impose on it.
#[derive(Debug, Clone)]
pub struct SeedSet {
    pub seeds: Vec<Seed>,
    /// True when the seeds originate from more than one disjoint
    /// origin. The search must then order its frontier by distance:
    /// routing weight is not a monotone lower bound across
    /// independently-seeded components admitted at zero cost.
    pub force_distance_weight: bool,
}

/// Snaps each raw request point to its nearest valid graph node.
///
/// Each point counts as its own (degenerate) region, so two or more
/// points force distance-ordered searching.
///
/// # Errors
///
/// [`Error::NoSeeds`] for an empty input, [`Error::PointNotFound`] when
/// a point cannot be snapped to any node the weighting can leave.
pub fn seeds_from_points<W>(
    network: &RoadNetwork,
    weighting: &W,
    points: &[Point<f64>],
) -> Result<SeedSet, Error>
where
    W: Weighting + Sync,
{
    if points.is_empty() {
        return Err(Error::NoSeeds);
    }

    let seeds = points
        .iter()
        .map(|point| {
            snap_point(network, weighting, *point).ok_or(Error::PointNotFound {
                lat: point.y(),
                lon: point.x(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeedSet {
        seeds: dedupe_seeds(seeds),
        force_distance_weight: points.len() > 1,
    })
}

/// Seeds a search from polygonal regions (exterior ring plus optional
/// hole rings).
///
/// Per region: the exterior ring is densified to at most
/// [`BOUNDARY_DENSIFY_DEG`] spacing and every densified point is
/// snapped, seeding at the snap residual; additionally every graph node
/// strictly inside the region (hole interiors excluded) becomes a
/// zero-distance seed. More than one region forces distance-ordered
/// searching.
///
/// # Errors
///
/// [`Error::NoSeeds`] for an empty input, [`Error::InvalidData`] for a
/// degenerate boundary ring, [`Error::PointNotFound`] when a boundary
/// point cannot be snapped at all.
pub fn seeds_from_regions<W>(
    network: &RoadNetwork,
    weighting: &W,
    regions: &[Polygon<f64>],
) -> Result<SeedSet, Error>
where
    W: Weighting + Sync,
{
    if regions.is_empty() {
        return Err(Error::NoSeeds);
    }

    let mut seeds = Vec::new();
    for region in regions {
        let boundary = densify_ring(region.exterior(), BOUNDARY_DENSIFY_DEG)?;

        let snapped: Vec<Seed> = boundary
            .par_iter()
            .map(|point| {
                snap_point(network, weighting, *point).ok_or(Error::PointNotFound {
                    lat: point.y(),
                    lon: point.x(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let interior = interior_nodes(network, region);
        info!(
            "seeded region with {} boundary snaps and {} interior nodes",
            snapped.len(),
            interior.len()
        );

        seeds.extend(snapped);
        seeds.extend(interior.into_iter().map(|node| Seed {
            node,
            distance: 0.0,
        }));
    }

    Ok(SeedSet {
        seeds: dedupe_seeds(seeds),
        force_distance_weight: regions.len() > 1,
    })
}

fn snap_point<W>(network: &RoadNetwork, weighting: &W, point: Point<f64>) -> Option<Seed>
where
    W: Weighting,
{
    let snap = network.index().nearest_valid(point, |node| {
        // Same validity rule as routing itself: the node must have at
        // least one passable edge
        network.edges_from(node, false).any(|(edge, _)| {
            weighting
                .edge_weight(edge, network.edge(edge), false)
                .is_finite()
        })
    });
    if snap.is_none() {
        trace!("no valid snap for ({}, {})", point.x(), point.y());
    }
    snap.map(|snap| Seed {
        node: snap.node,
        distance: snap.distance,
    })
}

/// Graph nodes strictly inside the region, found by testing the
/// endpoints of every edge whose envelope intersects the region bbox.
/// `Polygon::contains` already excludes points inside hole rings.
fn interior_nodes(network: &RoadNetwork, region: &Polygon<f64>) -> Vec<NodeIndex> {
    use geo::BoundingRect;

    let Some(rect) = region.bounding_rect() else {
        return Vec::new();
    };

    let mut inside: Vec<NodeIndex> = Vec::new();
    for edge in network.index().edges_in_envelope(rect) {
        let Some((a, b)) = network.endpoints(edge) else {
            continue;
        };
        for node in [a, b] {
            if region.contains(&network.node_point(node)) {
                inside.push(node);
            }
        }
    }
    inside.sort();
    inside.dedup();
    inside
}

/// Inserts intermediate points so that no two consecutive boundary
/// points are more than `max_step` degrees apart (per axis).
fn densify_ring(ring: &LineString<f64>, max_step: f64) -> Result<Vec<Point<f64>>, Error> {
    if ring.0.len() < 4 {
        // A closed ring needs at least a triangle plus the closing point
        return Err(Error::InvalidData(format!(
            "region boundary needs at least 3 distinct points, got {}",
            ring.0.len().saturating_sub(1)
        )));
    }

    let mut out = Vec::new();
    for line in ring.lines() {
        out.push(Point::from(line.start));
        let span = (line.end.x - line.start.x)
            .abs()
            .max((line.end.y - line.start.y).abs());
        if span > max_step {
            let steps = (span / max_step).ceil() as usize;
            for k in 1..steps {
                let t = k as f64 / steps as f64;
                out.push(Point::new(
                    line.start.x + (line.end.x - line.start.x) * t,
                    line.start.y + (line.end.y - line.start.y) * t,
                ));
            }
        }
    }
    Ok(out)
}

/// One seed per node, keeping the smallest residual, in node order.
fn dedupe_seeds(seeds: Vec<Seed>) -> Vec<Seed> {
    let mut best: HashMap<NodeIndex, f64> = HashMap::with_capacity(seeds.len());
    for seed in seeds {
        best.entry(seed.node)
            .and_modify(|distance| *distance = distance.min(seed.distance))
            .or_insert(seed.distance);
    }
    let mut out: Vec<Seed> = best
        .into_iter()
        .map(|(node, distance)| Seed { node, distance })
        .collect();
    out.sort_by_key(|seed| seed.node);
    out
}
