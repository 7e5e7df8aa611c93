//! Umbrella crate for the `region-tracking` workspace.
//!
//! Re-exports the raster primitives, the tracker, the reference predicates
//! and the shape helpers, so applications depend on a single crate.

pub use rt_core::*;
pub use rt_predicate::*;
pub use rt_shape::*;
pub use rt_track::*;
