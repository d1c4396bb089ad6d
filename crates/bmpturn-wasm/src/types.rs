//! WASM-compatible wrapper types for bitmap data.
//!
//! This module provides JavaScript-friendly types that wrap the core bmpturn
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use bmpturn_core::bitmap::{Bitmap, PixelBuffer};
use std::fmt::Display;
use wasm_bindgen::prelude::*;

/// A decoded 24-bit bitmap for JavaScript.
///
/// Holds the header as read from the file together with the row-padded pixel
/// data. Pixels handed to and from JavaScript are tightly packed, 3 bytes per
/// pixel in the bitmap's own channel order (blue, green, red).
#[wasm_bindgen]
pub struct JsBitmap {
    inner: Bitmap,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from dimensions and packed pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - Packed pixel data (3 bytes per pixel, no row padding)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        let buffer = PixelBuffer::from_packed_rgb(width, height, &pixels).map_err(to_js_error)?;
        Ok(Self::from_bitmap(Bitmap::from_pixels(buffer)))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of bytes per padded row
    #[wasm_bindgen(getter)]
    pub fn row_stride(&self) -> usize {
        self.inner.pixels.row_stride()
    }

    /// Get the number of bytes in the packed pixel data (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.pixel_count() * 3
    }

    /// Returns packed pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data without row padding.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.to_packed_rgb()
    }

    /// Returns the header fields as a plain JavaScript object.
    pub fn header(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.header).map_err(to_js_error)
    }
}

impl JsBitmap {
    /// Wrap a core bitmap.
    pub(crate) fn from_bitmap(inner: Bitmap) -> Self {
        Self { inner }
    }

    /// Borrow the core bitmap.
    pub(crate) fn as_bitmap(&self) -> &Bitmap {
        &self.inner
    }
}

/// Turn any displayable error into a JavaScript `Error` object.
pub(crate) fn to_js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}
