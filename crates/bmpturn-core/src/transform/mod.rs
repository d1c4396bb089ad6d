//! Geometric transforms.
//!
//! Transforms take a borrowed buffer and return a newly allocated one; the
//! input is never modified.
//!
//! # Coordinate System
//!
//! - `(x, y)` addresses pixels in storage order: `y = 0` is the first row in
//!   the file, which is the bottom row of a bottom-up bitmap
//! - Only quarter turns are supported, so no interpolation is involved

mod rotate;

pub use rotate::{rotate_90_clockwise, rotate_bitmap};
