// Re-export key components
pub use crate::contour::{CostedCoord, CostedSegment, SegmentCollector, segments_to_geojson};
pub use crate::error::Error;
pub use crate::model::{
    FastestWeighting, RoadEdge, RoadNetwork, RoadNetworkBuilder, RoadNode, ShortestWeighting,
    Snap, SpatialIndex, Weighting,
};
pub use crate::search::{ExploreKind, ReachLabel, ReachabilityTree, TraversalMode};
pub use crate::seed::{Seed, SeedSet, seeds_from_points, seeds_from_regions};

// Core scalar types
pub use crate::Millis;
pub use crate::Weight;
