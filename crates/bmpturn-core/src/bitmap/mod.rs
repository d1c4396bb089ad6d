//! Uncompressed 24-bit bitmap (BMP) model and codec.
//!
//! This module provides:
//! - The fixed 54-byte header, decoded and encoded field by field
//! - Row-padded pixel storage with stride-based addressing
//! - Whole-file reading and writing
//!
//! # Layout
//!
//! A file is the header followed by `row_size * height` bytes of pixel data,
//! where each row holds 3 bytes per pixel padded to a multiple of 4 bytes.
//! Compressed, palette-indexed and other bit depths are rejected.
//!
//! # Examples
//!
//! ```ignore
//! use bmpturn_core::bitmap::Bitmap;
//!
//! let bmp = Bitmap::load("photo.bmp")?;
//! println!("{}x{}, row size {}", bmp.width(), bmp.height(), bmp.header.row_size());
//! ```

mod codec;
mod error;
mod header;
mod pixels;

pub use codec::Bitmap;
pub use error::{BitmapError, ErrorKind};
pub use header::{
    buffer_len, checked_row_size, row_size, BitmapHeader, BITS_PER_PIXEL, BMP_SIGNATURE,
    BYTES_PER_PIXEL, HEADER_LEN, INFO_HEADER_LEN,
};
pub use pixels::PixelBuffer;
