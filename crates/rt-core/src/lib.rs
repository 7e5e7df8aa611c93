//! Foundational raster and geometry primitives for region tracking.
//!
//! ## Rasters and Stride
//! [`Image`] owns a dense row-major buffer. [`ImageView`] borrows one and uses
//! element stride (not byte stride): `stride` is the distance, in elements,
//! between adjacent row starts and may be greater than `width`, which lets
//! callers wrap padded camera buffers without copying.
//!
//! ## Coordinates
//! Pixel `(x, y)` addresses column `x` of row `y`. Boundary vertices live on
//! the lattice of pixel corners, so a `w x h` raster has vertices in
//! `[0, w] x [0, h]`; they are carried as [`Point2i`].
//!
//! ## Border Modes
//! Neighborhood windows near the raster edge are either clamped to the
//! raster or rejected, see [`BorderMode`].

mod border;
mod error;
mod geom;
mod image;

pub use border::{BorderMode, window};
pub use error::Error;
pub use geom::{Point2f, Point2i, Vec2f};
pub use image::{Image, ImageView};
