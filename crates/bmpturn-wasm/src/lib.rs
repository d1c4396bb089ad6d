//! bmpturn WASM - WebAssembly bindings for bmpturn
//!
//! This crate provides WASM bindings to expose the bmpturn-core bitmap codec
//! and transforms to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for bitmap data
//! - `codec` - Bitmap file decoding and encoding
//! - `transform` - 90 degree rotation and Gaussian blur
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_bmp, rotate_90_clockwise, gaussian_blur, encode_bmp } from '@bmpturn/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const image = decode_bmp(new Uint8Array(await file.arrayBuffer()));
//! const rotated = rotate_90_clockwise(image);
//! const blurred = gaussian_blur(rotated);
//! const bytes = encode_bmp(blurred);
//! ```

use wasm_bindgen::prelude::*;

mod codec;
mod transform;
mod types;

// Re-export public types
pub use codec::{decode_bmp, encode_bmp};
pub use transform::{gaussian_blur, rotate_90_clockwise};
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
