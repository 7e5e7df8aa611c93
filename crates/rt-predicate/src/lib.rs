//! Reference predicates for `rt-track`.
//!
//! - [`MaskPredicate`] accepts the nonzero pixels of a binary mask.
//! - [`DepthPredicate`] accepts depth readings that stand out in front of a
//!   learned per-pixel [`BackgroundModel`], and keeps that model current from
//!   the pixels the tracker leaves unoccupied.
//!
//! Frames are supplied as [`rt_core::ImageView`]s and copied, so padded
//! camera buffers can be passed directly. Size mismatches surface as
//! [`rt_core::Error`].

mod background;
mod depth;
mod mask;

pub use background::BackgroundModel;
pub use depth::{DepthPredicate, DepthPredicateConfig};
pub use mask::MaskPredicate;
