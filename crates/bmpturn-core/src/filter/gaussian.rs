//! 5x5 Gaussian blur.
//!
//! # Algorithm
//!
//! Each output channel is the kernel-weighted sum of the 5x5 neighbourhood
//! around the pixel, accumulated in `f64` row by row and then truncated to
//! `u8`. The kernel weights sum to 0.987, so a flat region comes out slightly
//! darker (a uniform 128 becomes 126).
//!
//! Pixels closer than [`KERNEL_RADIUS`] to any edge have no full
//! neighbourhood. They are not computed and stay black in the output.
//! Images 4 pixels or less in either dimension come out entirely black.
//!
//! With the `parallel` feature, output rows are computed on the rayon thread
//! pool. Every pixel is still summed in the same order, so the output is
//! identical to the single-threaded path.

use log::debug;

use crate::bitmap::{Bitmap, PixelBuffer, BYTES_PER_PIXEL};

/// Distance from the center to the edge of the kernel.
pub const KERNEL_RADIUS: usize = 2;

/// Kernel weights, indexed `[row][column]`.
pub const GAUSSIAN_KERNEL_5X5: [[f64; 5]; 5] = [
    [0.003, 0.013, 0.022, 0.013, 0.003],
    [0.013, 0.059, 0.097, 0.059, 0.013],
    [0.022, 0.097, 0.159, 0.097, 0.022],
    [0.013, 0.059, 0.097, 0.059, 0.013],
    [0.003, 0.013, 0.022, 0.013, 0.003],
];

/// Blur a pixel buffer into a new buffer of the same size.
///
/// The border of [`KERNEL_RADIUS`] pixels on every edge is left zero. Row
/// padding is left zero as well.
pub fn gaussian_blur(src: &PixelBuffer) -> PixelBuffer {
    let width = src.width() as usize;
    let height = src.height() as usize;
    let mut dst = PixelBuffer::new(src.width(), src.height());

    // No pixel has a full neighbourhood
    if width <= 2 * KERNEL_RADIUS || height <= 2 * KERNEL_RADIUS {
        return dst;
    }

    let stride = src.row_stride();
    let src_bytes = src.as_bytes();
    let interior_rows = height - 2 * KERNEL_RADIUS;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        dst.as_bytes_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .skip(KERNEL_RADIUS)
            .take(interior_rows)
            .for_each(|(y, out_row)| blur_row(src_bytes, stride, width, y, out_row));
    }

    #[cfg(not(feature = "parallel"))]
    {
        dst.as_bytes_mut()
            .chunks_mut(stride)
            .enumerate()
            .skip(KERNEL_RADIUS)
            .take(interior_rows)
            .for_each(|(y, out_row)| blur_row(src_bytes, stride, width, y, out_row));
    }

    dst
}

/// Compute the interior pixels of output row `y`.
fn blur_row(src: &[u8], stride: usize, width: usize, y: usize, out_row: &mut [u8]) {
    for x in KERNEL_RADIUS..width - KERNEL_RADIUS {
        let mut sum = [0.0f64; 3];

        for (j, kernel_row) in GAUSSIAN_KERNEL_5X5.iter().enumerate() {
            let row_start = (y + j - KERNEL_RADIUS) * stride;
            for (i, &weight) in kernel_row.iter().enumerate() {
                let offset = row_start + (x + i - KERNEL_RADIUS) * BYTES_PER_PIXEL;
                sum[0] += src[offset] as f64 * weight;
                sum[1] += src[offset + 1] as f64 * weight;
                sum[2] += src[offset + 2] as f64 * weight;
            }
        }

        // Truncate, don't round
        let offset = x * BYTES_PER_PIXEL;
        out_row[offset] = sum[0] as u8;
        out_row[offset + 1] = sum[1] as u8;
        out_row[offset + 2] = sum[2] as u8;
    }
}

/// Blur a bitmap. The header is carried over unchanged.
pub fn blur_bitmap(bitmap: &Bitmap) -> Bitmap {
    debug!(
        "Blurring {}x{} with a {}x{} kernel",
        bitmap.width(),
        bitmap.height(),
        2 * KERNEL_RADIUS + 1,
        2 * KERNEL_RADIUS + 1
    );
    Bitmap {
        header: bitmap.header,
        pixels: gaussian_blur(&bitmap.pixels),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
