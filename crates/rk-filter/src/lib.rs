//! Pointwise and small-window reference filters.
//!
//! Like the dilation oracle, these are plain, auditable loops meant to pin
//! down exact semantics for accelerated implementations, not to be fast.

mod gaussian;
mod threshold;

pub use gaussian::{gaussian5x5_blur_u8, gaussian5x5_blur_u8_into, gaussian5x5_u8};
pub use threshold::{threshold_binary_u8, threshold_u8};
