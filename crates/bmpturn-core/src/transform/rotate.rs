//! Lossless quarter-turn rotation.
//!
//! # Mapping
//!
//! For a `width x height` source, the pixel with linear index
//! `y * width + x` moves to linear index `(width - 1 - x) * height + y` of a
//! `height x width` destination. Linear indices are resolved through each
//! buffer's own row stride, so source padding is dropped and destination
//! padding is derived from the new width.
//!
//! Bitmaps with a positive height store the bottom row first, and for those
//! the mapping turns the displayed image clockwise. Read as top-down storage
//! the same mapping is a counter-clockwise turn:
//!
//! ```text
//! stored rows      stored rows
//!   A B      ->      B D
//!   C D              A C
//! ```

use log::debug;

use crate::bitmap::{Bitmap, PixelBuffer, BYTES_PER_PIXEL};

/// Rotate a pixel buffer by 90 degrees into a new buffer.
///
/// The result is `height` pixels wide and `width` pixels tall. Every source
/// pixel lands on exactly one destination pixel with its channels unchanged,
/// so four rotations give back the original buffer.
pub fn rotate_90_clockwise(src: &PixelBuffer) -> PixelBuffer {
    let (width, height) = (src.width(), src.height());
    let mut dst = PixelBuffer::new(height, width);

    let src_stride = src.row_stride();
    let dst_stride = dst.row_stride();
    let src_bytes = src.as_bytes();
    let dst_bytes = dst.as_bytes_mut();

    for x in 0..width as usize {
        for y in 0..height as usize {
            let src_offset = y * src_stride + x * BYTES_PER_PIXEL;

            // Linear destination index, resolved against the new width
            let dst_index = (width as usize - 1 - x) * height as usize + y;
            let (dst_x, dst_y) = (dst_index % height as usize, dst_index / height as usize);
            let dst_offset = dst_y * dst_stride + dst_x * BYTES_PER_PIXEL;

            dst_bytes[dst_offset..dst_offset + BYTES_PER_PIXEL]
                .copy_from_slice(&src_bytes[src_offset..src_offset + BYTES_PER_PIXEL]);
        }
    }

    dst
}

/// Rotate a bitmap and update its header.
///
/// Width and height are swapped, and `file_size`/`data_size` are recomputed
/// for the new row padding. Other header fields are carried over.
pub fn rotate_bitmap(bitmap: &Bitmap) -> Bitmap {
    let pixels = rotate_90_clockwise(&bitmap.pixels);
    let header = bitmap.header.with_dimensions(pixels.width(), pixels.height());

    debug!(
        "Rotated {}x{} -> {}x{}, file size {}",
        bitmap.width(),
        bitmap.height(),
        pixels.width(),
        pixels.height(),
        header.file_size
    );

    Bitmap { header, pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [u8; 3] = [1, 2, 3];
    const B: [u8; 3] = [4, 5, 6];
    const C: [u8; 3] = [7, 8, 9];
    const D: [u8; 3] = [10, 11, 12];

    /// Create a test image where every pixel is unique.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let i = y * width + x;
                buf.set_pixel(x, y, [i as u8, (i >> 8) as u8, (x ^ y) as u8]);
            }
        }
        buf
    }

    #[test]
    fn test_2x2_mapping() {
        let mut src = PixelBuffer::new(2, 2);
        src.set_pixel(0, 0, A);
        src.set_pixel(1, 0, B);
        src.set_pixel(0, 1, C);
        src.set_pixel(1, 1, D);

        let dst = rotate_90_clockwise(&src);

        // dest index = (W - 1 - x) * H + y
        assert_eq!(dst.pixel(0, 0), B);
        assert_eq!(dst.pixel(1, 0), D);
        assert_eq!(dst.pixel(0, 1), A);
        assert_eq!(dst.pixel(1, 1), C);
    }

    #[test]
    fn test_non_square_mapping() {
        // 3 wide, 2 tall:
        //   0 1 2
        //   3 4 5
        let src = test_image(3, 2);
        let dst = rotate_90_clockwise(&src);

        assert_eq!((dst.width(), dst.height()), (2, 3));
        // Rows of the result:
        //   2 5
        //   1 4
        //   0 3
        let expected = [[2, 5], [1, 4], [0, 3]];
        for (y, row) in expected.iter().enumerate() {
            for (x, &i) in row.iter().enumerate() {
                assert_eq!(dst.pixel(x as u32, y as u32)[0], i, "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_dimension_swap() {
        let dst = rotate_90_clockwise(&test_image(7, 3));
        assert_eq!(dst.width(), 3);
        assert_eq!(dst.height(), 7);
        // 3 * 3 = 9 bytes padded to 12, 7 rows
        assert_eq!(dst.as_bytes().len(), 84);
    }

    #[test]
    fn test_padding_stays_zero() {
        let mut src = PixelBuffer::new(3, 5);
        for y in 0..5 {
            for x in 0..3 {
                src.set_pixel(x, y, [255, 255, 255]);
            }
        }
        let dst = rotate_90_clockwise(&src);
        // 5 * 3 = 15 bytes per row, one byte of padding
        for row in dst.as_bytes().chunks_exact(dst.row_stride()) {
            assert!(row[..15].iter().all(|&b| b == 255));
            assert_eq!(row[15], 0);
        }
    }

    #[test]
    fn test_four_rotations_identity() {
        let src = test_image(5, 3);
        let mut img = src.clone();
        for _ in 0..4 {
            img = rotate_90_clockwise(&img);
        }
        assert_eq!(img, src);
    }

    #[test]
    fn test_single_pixel() {
        let mut src = PixelBuffer::new(1, 1);
        src.set_pixel(0, 0, A);
        let dst = rotate_90_clockwise(&src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_single_row_becomes_column() {
        let src = test_image(4, 1);
        let dst = rotate_90_clockwise(&src);
        assert_eq!((dst.width(), dst.height()), (1, 4));
        // Last column of the row comes first
        assert_eq!(dst.pixel(0, 0)[0], 3);
        assert_eq!(dst.pixel(0, 3)[0], 0);
    }

    #[test]
    fn test_empty_image() {
        let dst = rotate_90_clockwise(&PixelBuffer::new(0, 0));
        assert!(dst.is_empty());
    }

    #[test]
    fn test_rotate_bitmap_updates_header() {
        let bmp = Bitmap::from_pixels(test_image(5, 2));
        let rotated = rotate_bitmap(&bmp);

        assert_eq!(rotated.header.width, 2);
        assert_eq!(rotated.header.height, 5);
        // 2 * 3 = 6 bytes padded to 8, 5 rows
        assert_eq!(rotated.header.data_size, 40);
        assert_eq!(rotated.header.file_size, 94);
        assert_eq!(rotated.header.horizontal_res, bmp.header.horizontal_res);
        assert_eq!(rotated.pixels.as_bytes().len(), 40);
    }

    #[test]
    fn test_uniform_color_is_preserved() {
        let mut src = PixelBuffer::new(4, 4);
        for y in 0..4 {
            for x in 0..4 {
                src.set_pixel(x, y, [0, 0, 255]);
            }
        }
        assert_eq!(rotate_90_clockwise(&src), src);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
