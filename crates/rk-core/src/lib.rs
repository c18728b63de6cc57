//! Foundational primitives for the refkern reference kernels.
//!
//! ## Buffers and Views
//! Reference kernels operate on flat, row-major `u8` buffers that the caller
//! allocates and owns. `Image` is an owned container for tests and tooling;
//! `ImageView`/`ImageViewMut` are borrowed views with element stride (the
//! distance, in elements, between adjacent row starts, which may exceed
//! `width`).
//!
//! ## Border Policy
//! Out-of-bounds neighbor coordinates are resolved by clamping each axis to
//! the nearest valid index (replicate border). See [`clamp_index`].

mod border;
mod error;
mod image;

pub use border::clamp_index;
pub use error::Error;
pub use image::{Image, ImageView, ImageViewMut};
