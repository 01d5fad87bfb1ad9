//! Bounded multi-source label-setting search

pub mod label;
mod state;
pub mod tree;

pub use label::{ExploreKind, LabelId, ReachLabel, TraversalId, TraversalMode};
pub use tree::ReachabilityTree;
