//! Cost-annotated output geometry

use std::cmp::Ordering;

use serde::Serialize;

/// A geographic point with its interpolated exploration cost
/// (seconds for time searches, meters for distance searches).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostedCoord {
    pub lat: f64,
    pub lon: f64,
    pub cost: f64,
}

impl CostedCoord {
    pub fn new(lat: f64, lon: f64, cost: f64) -> Self {
        Self { lat, lon, cost }
    }
}

impl Eq for CostedCoord {}

// Total order by (cost, lat, lon) so equal-cost coordinates still sort
// deterministically
impl Ord for CostedCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then(self.lat.total_cmp(&other.lat))
            .then(self.lon.total_cmp(&other.lon))
    }
}

impl PartialOrd for CostedCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One piece of explored edge geometry, ordered by its `to` endpoint
/// then its `from` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostedSegment {
    pub from: CostedCoord,
    pub to: CostedCoord,
}

impl Eq for CostedSegment {}

impl Ord for CostedSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to.cmp(&other.to).then(self.from.cmp(&other.from))
    }
}

impl PartialOrd for CostedSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
