//! Incremental region tracking by growing and shrinking.
//!
//! A [`RegionTracker`] follows one connected region of a fixed-size raster
//! across frames. Membership is decided by a caller-supplied
//! [`RegionPredicate`]; each [`RegionTracker::track`] step:
//! - retests the previous frontier and erodes pixels that are no longer
//!   accepted ([`shrink`]),
//! - scans for new seeds at a configurable stride ([`find_seeds`]),
//! - grows into accepted neighbors, recording blocked sides as directed edges
//!   on the vertex lattice ([`grow`], [`ConnectivityGrid`]),
//! - walks those edges into closed vertex lines ([`trace_boundary`]), keeping
//!   every `decimation`-th vertex and backfilling the gaps ([`interpolate`]),
//! - resamples every long enough line to a fixed point count ([`resample`]).
//!
//! Work per step is bounded by the frontier and the pixels that changed, not
//! by the raster size, apart from the seed scan.

mod boundary;
mod config;
mod edge;
mod grid;
mod interp;
mod predicate;
mod propagate;
mod resample;
mod stack;
mod trace;
mod tracker;

pub use boundary::BoundaryLines;
pub use config::{ConfigError, MAX_RASTER_SIDE, TrackerConfig, validate_raster};
pub use edge::Side;
pub use grid::{ConnectivityGrid, OccupancyGrid};
pub use interp::{DigitalLine, Fixed16, interpolate};
pub use predicate::{FnPredicate, OccupancyQuery, RegionPredicate};
pub use propagate::{find_seeds, grow, shrink};
pub use resample::resample;
pub use stack::CandidateStack;
pub use trace::{frame_side, trace_boundary};
pub use tracker::{RegionTracker, StepReport};
