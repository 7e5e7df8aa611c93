//! Shape statistics over traced boundaries.
//!
//! Everything here works on plain vertex slices, typically one line of an
//! [`rt_track::BoundaryLines`]. Integer results truncate toward zero.

mod hull;
mod stats;

pub use hull::{OrientedBox, convex_hull, min_width_box};
pub use stats::{BoundingBox, bounding_box, center_of_mass, longest_line, longest_lines, median_center};
