//! Reachability trees over weighted road networks
//!
//! Starting from one or more seed locations, a bounded multi-source
//! label-setting search explores the network in order of increasing cost
//! and records, for every reached node, the cheapest known way to get
//! there, until a configurable time/distance/weight budget is exceeded.
//! The resulting label forest is the raw material for isochrone maps:
//! the [`contour`] module turns it into cost-annotated line segments for
//! downstream polygon construction.
//!
//! The crate deliberately stops at the segment list. Request parsing,
//! polygon triangulation and serving the result over HTTP belong to the
//! calling service.

pub mod contour;
pub mod error;
pub mod model;
pub mod prelude;
pub mod search;
pub mod seed;

pub use error::Error;

/// Elapsed travel time in milliseconds.
pub type Millis = u64;

/// Routing weight. Dimensionless; whatever the active [`model::Weighting`]
/// accumulates.
pub type Weight = f64;
