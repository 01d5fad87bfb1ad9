//! Road network model
//!
//! The graph, its spatial index, and the weighting seam consumed by the
//! search engine. Everything here is read-only during a search and may be
//! shared across concurrently running searches.

pub mod components;
pub mod index;
pub mod network;
pub mod weighting;

pub use components::{RoadEdge, RoadNode};
pub use index::{Snap, SpatialIndex};
pub use network::{RoadNetwork, RoadNetworkBuilder};
pub use weighting::{FastestWeighting, ShortestWeighting, Weighting};
