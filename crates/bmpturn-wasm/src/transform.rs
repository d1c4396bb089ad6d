//! WASM bindings for the pixel transforms.
//!
//! Both functions return a new image and leave their argument untouched.

use crate::types::JsBitmap;
use bmpturn_core::filter::blur_bitmap;
use bmpturn_core::transform::rotate_bitmap;
use wasm_bindgen::prelude::*;

/// Rotate an image by 90 degrees.
///
/// Width and height are swapped. For bitmaps stored bottom-up (the usual
/// case) the displayed image turns clockwise.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rotated = rotate_90_clockwise(image);
/// console.log(`${image.width}x${image.height} -> ${rotated.width}x${rotated.height}`);
/// ```
#[wasm_bindgen]
pub fn rotate_90_clockwise(image: &JsBitmap) -> JsBitmap {
    JsBitmap::from_bitmap(rotate_bitmap(image.as_bitmap()))
}

/// Apply the 5x5 Gaussian blur.
///
/// The two outermost pixels on every edge come out black.
#[wasm_bindgen]
pub fn gaussian_blur(image: &JsBitmap) -> JsBitmap {
    JsBitmap::from_bitmap(blur_bitmap(image.as_bitmap()))
}
