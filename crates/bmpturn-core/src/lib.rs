//! bmpturn core - 24-bit bitmap rotation and Gaussian blur
//!
//! This crate provides the bitmap codec and the two pixel transforms used by
//! the `bmpturn` command-line tool and the WASM bindings:
//!
//! - [`bitmap`] - header model, row-padded pixel buffer, file codec
//! - [`transform`] - lossless 90 degree rotation
//! - [`filter`] - 5x5 Gaussian blur with a black border
//! - [`pipeline`] - load, rotate, write, reload, blur, write
//!
//! The transforms are pure functions: they borrow their input and return a
//! new buffer. Only the pipeline performs file I/O.

pub mod bitmap;
pub mod filter;
pub mod pipeline;
pub mod transform;

pub use bitmap::{Bitmap, BitmapError, BitmapHeader, ErrorKind, PixelBuffer};
pub use filter::{blur_bitmap, gaussian_blur};
pub use pipeline::{run_pipeline, PipelineConfig, PipelineError, PipelineReport, Stage};
pub use transform::{rotate_90_clockwise, rotate_bitmap};
