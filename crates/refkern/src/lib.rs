//! Umbrella crate for the `refkern` workspace.
//!
//! Re-exports the image primitives, the reference kernels and the
//! verification helpers so downstream harnesses depend on a single crate.

pub use rk_core::*;
pub use rk_filter::*;
pub use rk_morph::*;
pub use rk_verify::*;
