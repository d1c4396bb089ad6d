//! Bitmap file decoding and encoding bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_bmp, encode_bmp } from '@bmpturn/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_bmp(bytes);
//! console.log(`Decoded ${image.width}x${image.height}`);
//!
//! const out = encode_bmp(image);
//! await writable.write(new Blob([out], { type: 'image/bmp' }));
//! ```

use crate::types::{to_js_error, JsBitmap};
use bmpturn_core::bitmap::Bitmap;
use wasm_bindgen::prelude::*;

/// Decode the bytes of a 24-bit uncompressed bitmap file.
///
/// # Errors
///
/// Throws if the header is truncated, the image is not 24-bit uncompressed,
/// the dimensions are not positive, or the pixel data is short.
#[wasm_bindgen]
pub fn decode_bmp(bytes: &[u8]) -> Result<JsBitmap, JsValue> {
    let bitmap = Bitmap::from_bytes(bytes).map_err(to_js_error)?;
    web_sys::console::debug_1(
        &format!(
            "bmpturn: decoded {}x{} bitmap ({} bytes)",
            bitmap.width(),
            bitmap.height(),
            bytes.len()
        )
        .into(),
    );
    Ok(JsBitmap::from_bitmap(bitmap))
}

/// Encode a bitmap to file bytes (54-byte header followed by pixel rows).
#[wasm_bindgen]
pub fn encode_bmp(image: &JsBitmap) -> Vec<u8> {
    image.as_bitmap().to_bytes()
}

/// Tests for codec bindings.
///
/// Note: `decode_bmp` returns `Result<T, JsValue>` and logs to the browser
/// console, so it only runs on wasm32 targets. The decoder itself is covered
/// by the tests in `bmpturn_core::bitmap`.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_bmp_layout() {
        let img = JsBitmap::new(3, 2, vec![200u8; 18]).unwrap();
        let bytes = encode_bmp(&img);

        assert_eq!(&bytes[0..2], b"BM");
        // 3 * 3 = 9 bytes padded to 12, 2 rows
        assert_eq!(bytes.len(), 54 + 24);
        assert_eq!(&bytes[54..63], &[200u8; 9]);
        assert_eq!(&bytes[63..66], &[0u8; 3]);
    }

    #[test]
    fn test_encoded_bytes_decode_in_core() {
        let img = JsBitmap::new(5, 4, (0..60).collect()).unwrap();
        let decoded = Bitmap::from_bytes(&encode_bmp(&img)).unwrap();
        assert_eq!(decoded.pixels.to_packed_rgb(), img.pixels());
    }
}
