//! Convolution filters.
//!
//! Like the transforms, filters read from the input buffer only and write
//! every result into a freshly allocated output, so a pixel is never
//! computed from already-filtered neighbours.

mod gaussian;

pub use gaussian::{blur_bitmap, gaussian_blur, GAUSSIAN_KERNEL_5X5, KERNEL_RADIUS};
