//! The fixed 54-byte bitmap header.
//!
//! The header is the 14-byte file header immediately followed by the 40-byte
//! `BITMAPINFOHEADER`. Fields are stored little-endian with no padding between
//! them, so the record is read and written field by field rather than by
//! reinterpreting memory.
//!
//! | offset | field              | type |
//! |--------|--------------------|------|
//! | 0      | `signature`        | u16  |
//! | 2      | `file_size`        | u32  |
//! | 6      | `reserved1`        | u16  |
//! | 8      | `reserved2`        | u16  |
//! | 10     | `data_offset`      | u32  |
//! | 14     | `header_size`      | u32  |
//! | 18     | `width`            | i32  |
//! | 22     | `height`           | i32  |
//! | 26     | `planes`           | u16  |
//! | 28     | `bits_per_pixel`   | u16  |
//! | 30     | `compression`      | u32  |
//! | 34     | `data_size`        | u32  |
//! | 38     | `horizontal_res`   | i32  |
//! | 42     | `vertical_res`     | i32  |
//! | 46     | `colors`           | u32  |
//! | 50     | `important_colors` | u32  |

use serde::{Deserialize, Serialize};

use super::error::BitmapError;

/// Total size of the encoded header in bytes.
pub const HEADER_LEN: usize = 54;

/// Size of the `BITMAPINFOHEADER` part, as stored in `header_size`.
pub const INFO_HEADER_LEN: u32 = 40;

/// `"BM"` read as a little-endian u16.
pub const BMP_SIGNATURE: u16 = u16::from_le_bytes(*b"BM");

/// The only color depth this crate handles.
pub const BITS_PER_PIXEL: u16 = 24;

/// Bytes per pixel at 24 bits per pixel.
pub const BYTES_PER_PIXEL: usize = 3;

/// 72 DPI expressed in pixels per meter.
const DEFAULT_RESOLUTION: i32 = 2835;

/// Number of bytes in one padded scanline.
///
/// Rows are padded to a multiple of 4 bytes. Saturates at `usize::MAX` when
/// the row does not fit the address space; see [`checked_row_size`].
#[inline]
pub fn row_size(width: u32, bits_per_pixel: u16) -> usize {
    checked_row_size(width, bits_per_pixel).unwrap_or(usize::MAX)
}

/// Number of bytes in one padded scanline, or `None` if it overflows `usize`.
///
/// Computed in 64-bit arithmetic, so a 32-bit target never sees a wrapped
/// size.
#[inline]
pub fn checked_row_size(width: u32, bits_per_pixel: u16) -> Option<usize> {
    let bits = u64::from(width) * u64::from(bits_per_pixel);
    usize::try_from(bits.div_ceil(8).next_multiple_of(4)).ok()
}

/// Length of a 24-bit pixel buffer, `row_size * height`, or `None` if it
/// overflows `usize`.
#[inline]
pub fn buffer_len(width: u32, height: u32) -> Option<usize> {
    checked_row_size(width, BITS_PER_PIXEL)?.checked_mul(usize::try_from(height).ok()?)
}

/// Decoded bitmap header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitmapHeader {
    /// Magic identifying the format, normally `"BM"`.
    pub signature: u16,
    /// Total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte offset from the start of the file to the pixel data.
    pub data_offset: u32,
    /// Size of the info header that follows the file header.
    pub header_size: u32,
    /// Image width in pixels.
    pub width: i32,
    /// Image height in pixels.
    ///
    /// Positive heights are stored bottom-up. Negative (top-down) heights are
    /// rejected when a full bitmap is decoded.
    pub height: i32,
    /// Must be 1.
    pub planes: u16,
    /// Color depth; only 24 is supported.
    pub bits_per_pixel: u16,
    /// Must be 0 (uncompressed).
    pub compression: u32,
    /// Size of the pixel data in bytes. May be 0 for uncompressed images.
    pub data_size: u32,
    /// Horizontal pixels per meter, passed through.
    pub horizontal_res: i32,
    /// Vertical pixels per meter, passed through.
    pub vertical_res: i32,
    /// Palette length, passed through.
    pub colors: u32,
    /// Important palette entries, passed through.
    pub important_colors: u32,
}

impl BitmapHeader {
    /// Create a consistent header for a 24-bit image of the given size.
    pub fn new_rgb24(width: u32, height: u32) -> Self {
        let pixel_bytes = row_size(width, BITS_PER_PIXEL) * height as usize;
        Self {
            signature: BMP_SIGNATURE,
            file_size: (HEADER_LEN + pixel_bytes) as u32,
            reserved1: 0,
            reserved2: 0,
            data_offset: HEADER_LEN as u32,
            header_size: INFO_HEADER_LEN,
            width: width as i32,
            height: height as i32,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: 0,
            data_size: pixel_bytes as u32,
            horizontal_res: DEFAULT_RESOLUTION,
            vertical_res: DEFAULT_RESOLUTION,
            colors: 0,
            important_colors: 0,
        }
    }

    /// Read the raw field layout from the first [`HEADER_LEN`] bytes.
    ///
    /// Unlike [`decode`](Self::decode) this does not check the pixel format.
    pub fn parse_fields(bytes: &[u8]) -> Result<Self, BitmapError> {
        let raw: &[u8; HEADER_LEN] = bytes
            .get(..HEADER_LEN)
            .and_then(|b| b.try_into().ok())
            .ok_or(BitmapError::TruncatedHeader {
                expected: HEADER_LEN,
                actual: bytes.len(),
            })?;

        Ok(Self {
            signature: read_u16(raw, 0),
            file_size: read_u32(raw, 2),
            reserved1: read_u16(raw, 6),
            reserved2: read_u16(raw, 8),
            data_offset: read_u32(raw, 10),
            header_size: read_u32(raw, 14),
            width: read_i32(raw, 18),
            height: read_i32(raw, 22),
            planes: read_u16(raw, 26),
            bits_per_pixel: read_u16(raw, 28),
            compression: read_u32(raw, 30),
            data_size: read_u32(raw, 34),
            horizontal_res: read_i32(raw, 38),
            vertical_res: read_i32(raw, 42),
            colors: read_u32(raw, 46),
            important_colors: read_u32(raw, 50),
        })
    }

    /// Decode a header and check that it describes a supported pixel format.
    ///
    /// # Errors
    ///
    /// * [`BitmapError::TruncatedHeader`] if fewer than 54 bytes are given
    /// * [`BitmapError::UnsupportedBitDepth`] unless 24 bits per pixel
    /// * [`BitmapError::UnsupportedCompression`] unless uncompressed
    /// * [`BitmapError::UnsupportedPlanes`] unless exactly one plane
    ///
    /// Width, height and the signature are not checked here.
    pub fn decode(bytes: &[u8]) -> Result<Self, BitmapError> {
        let header = Self::parse_fields(bytes)?;

        if header.bits_per_pixel != BITS_PER_PIXEL {
            return Err(BitmapError::UnsupportedBitDepth(header.bits_per_pixel));
        }
        if header.compression != 0 {
            return Err(BitmapError::UnsupportedCompression(header.compression));
        }
        if header.planes != 1 {
            return Err(BitmapError::UnsupportedPlanes(header.planes));
        }

        Ok(header)
    }

    /// Encode the header into its exact 54-byte representation.
    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..2].copy_from_slice(&self.signature.to_le_bytes());
        out[2..6].copy_from_slice(&self.file_size.to_le_bytes());
        out[6..8].copy_from_slice(&self.reserved1.to_le_bytes());
        out[8..10].copy_from_slice(&self.reserved2.to_le_bytes());
        out[10..14].copy_from_slice(&self.data_offset.to_le_bytes());
        out[14..18].copy_from_slice(&self.header_size.to_le_bytes());
        out[18..22].copy_from_slice(&self.width.to_le_bytes());
        out[22..26].copy_from_slice(&self.height.to_le_bytes());
        out[26..28].copy_from_slice(&self.planes.to_le_bytes());
        out[28..30].copy_from_slice(&self.bits_per_pixel.to_le_bytes());
        out[30..34].copy_from_slice(&self.compression.to_le_bytes());
        out[34..38].copy_from_slice(&self.data_size.to_le_bytes());
        out[38..42].copy_from_slice(&self.horizontal_res.to_le_bytes());
        out[42..46].copy_from_slice(&self.vertical_res.to_le_bytes());
        out[46..50].copy_from_slice(&self.colors.to_le_bytes());
        out[50..54].copy_from_slice(&self.important_colors.to_le_bytes());
        out
    }

    /// Bytes per padded row for this header's width and depth.
    ///
    /// Negative widths are treated as zero.
    pub fn row_size(&self) -> usize {
        row_size(self.width.max(0) as u32, self.bits_per_pixel)
    }

    /// Expected pixel buffer length: `row_size * height`.
    ///
    /// Negative heights are treated as zero.
    pub fn pixel_buffer_size(&self) -> usize {
        self.checked_pixel_buffer_size().unwrap_or(usize::MAX)
    }

    /// [`pixel_buffer_size`](Self::pixel_buffer_size), or `None` if the size
    /// does not fit `usize`.
    pub fn checked_pixel_buffer_size(&self) -> Option<usize> {
        checked_row_size(self.width.max(0) as u32, self.bits_per_pixel)?
            .checked_mul(self.height.max(0) as usize)
    }

    /// Copy of this header describing an image of a new size.
    ///
    /// The pixel data is assumed to follow the header directly, so
    /// `data_offset` becomes 54 and `file_size`/`data_size` are recomputed
    /// from the new geometry. Everything else is carried over.
    pub fn with_dimensions(&self, width: u32, height: u32) -> Self {
        let mut header = *self;
        header.width = width as i32;
        header.height = height as i32;
        let pixel_bytes = header.pixel_buffer_size();
        header.data_offset = HEADER_LEN as u32;
        header.file_size = HEADER_LEN.saturating_add(pixel_bytes) as u32;
        header.data_size = pixel_bytes as u32;
        header
    }

    /// The signature as two ASCII characters, e.g. `"BM"`.
    pub fn signature_str(&self) -> String {
        self.signature
            .to_le_bytes()
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '?' })
            .collect()
    }
}

#[inline]
fn read_u16(raw: &[u8; HEADER_LEN], at: usize) -> u16 {
    u16::from_le_bytes([raw[at], raw[at + 1]])
}

#[inline]
fn read_u32(raw: &[u8; HEADER_LEN], at: usize) -> u32 {
    u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

#[inline]
fn read_i32(raw: &[u8; HEADER_LEN], at: usize) -> i32 {
    i32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::ErrorKind;

    /// Header of a 3x2 24-bit bitmap as written by common editors.
    const SAMPLE: [u8; HEADER_LEN] = [
        0x42, 0x4D, // "BM"
        0x4E, 0x00, 0x00, 0x00, // file size 78
        0x00, 0x00, 0x00, 0x00, // reserved
        0x36, 0x00, 0x00, 0x00, // data offset 54
        0x28, 0x00, 0x00, 0x00, // info header 40
        0x03, 0x00, 0x00, 0x00, // width 3
        0x02, 0x00, 0x00, 0x00, // height 2
        0x01, 0x00, // planes
        0x18, 0x00, // 24 bpp
        0x00, 0x00, 0x00, 0x00, // BI_RGB
        0x18, 0x00, 0x00, 0x00, // data size 24
        0x13, 0x0B, 0x00, 0x00, // 2835 px/m
        0x13, 0x0B, 0x00, 0x00, // 2835 px/m
        0x00, 0x00, 0x00, 0x00, // colors
        0x00, 0x00, 0x00, 0x00, // important colors
    ];

    #[test]
    fn test_decode_sample() {
        let header = BitmapHeader::decode(&SAMPLE).unwrap();
        assert_eq!(header.signature, BMP_SIGNATURE);
        assert_eq!(header.signature_str(), "BM");
        assert_eq!(header.file_size, 78);
        assert_eq!(header.data_offset, 54);
        assert_eq!(header.header_size, 40);
        assert_eq!(header.width, 3);
        assert_eq!(header.height, 2);
        assert_eq!(header.planes, 1);
        assert_eq!(header.bits_per_pixel, 24);
        assert_eq!(header.data_size, 24);
        assert_eq!(header.horizontal_res, 2835);
        assert_eq!(header.row_size(), 12);
        assert_eq!(header.pixel_buffer_size(), 24);
    }

    #[test]
    fn test_round_trip_is_byte_exact() {
        let header = BitmapHeader::decode(&SAMPLE).unwrap();
        assert_eq!(header.encode(), SAMPLE);
    }

    #[test]
    fn test_new_rgb24_matches_sample() {
        assert_eq!(BitmapHeader::new_rgb24(3, 2).encode(), SAMPLE);
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let mut bytes = SAMPLE.to_vec();
        bytes.extend_from_slice(&[0xAA; 24]);
        let header = BitmapHeader::decode(&bytes).unwrap();
        assert_eq!(header.encode(), SAMPLE);
    }

    #[test]
    fn test_truncated_header() {
        let err = BitmapHeader::decode(&SAMPLE[..53]).unwrap_err();
        assert!(matches!(
            err,
            BitmapError::TruncatedHeader {
                expected: 54,
                actual: 53
            }
        ));
        assert_eq!(err.kind(), ErrorKind::Format);

        assert!(BitmapHeader::decode(&[]).is_err());
    }

    #[test]
    fn test_rejects_other_bit_depths() {
        let mut header = BitmapHeader::new_rgb24(4, 4);
        header.bits_per_pixel = 32;
        let err = BitmapHeader::decode(&header.encode()).unwrap_err();
        assert!(matches!(err, BitmapError::UnsupportedBitDepth(32)));
    }

    #[test]
    fn test_rejects_compression() {
        let mut header = BitmapHeader::new_rgb24(4, 4);
        header.compression = 1;
        let err = BitmapHeader::decode(&header.encode()).unwrap_err();
        assert!(matches!(err, BitmapError::UnsupportedCompression(1)));
    }

    #[test]
    fn test_rejects_planes() {
        let mut header = BitmapHeader::new_rgb24(4, 4);
        header.planes = 2;
        let err = BitmapHeader::decode(&header.encode()).unwrap_err();
        assert!(matches!(err, BitmapError::UnsupportedPlanes(2)));
    }

    #[test]
    fn test_parse_fields_skips_format_checks() {
        let mut header = BitmapHeader::new_rgb24(4, 4);
        header.bits_per_pixel = 8;
        let parsed = BitmapHeader::parse_fields(&header.encode()).unwrap();
        assert_eq!(parsed.bits_per_pixel, 8);
    }

    #[test]
    fn test_signature_not_checked() {
        let mut header = BitmapHeader::new_rgb24(2, 2);
        header.signature = u16::from_le_bytes(*b"XY");
        let decoded = BitmapHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded.signature_str(), "XY");
    }

    #[test]
    fn test_negative_height_passes_header_decode() {
        let mut header = BitmapHeader::new_rgb24(2, 2);
        header.height = -2;
        let decoded = BitmapHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded.height, -2);
        assert_eq!(decoded.pixel_buffer_size(), 0);
    }

    #[test]
    fn test_row_size_examples() {
        assert_eq!(row_size(1, 24), 4);
        assert_eq!(row_size(2, 24), 8);
        assert_eq!(row_size(3, 24), 12);
        assert_eq!(row_size(4, 24), 12);
        assert_eq!(row_size(5, 24), 16);
        assert_eq!(row_size(0, 24), 0);
        // Other depths round bits up to whole bytes first
        assert_eq!(row_size(3, 1), 4);
        assert_eq!(row_size(33, 1), 8);
    }

    #[test]
    fn test_row_size_computed_in_64_bits() {
        // 0x5555_5556 * 3 bytes wraps to 4 in 32-bit arithmetic
        let width = 0x5555_5556;
        let exact = usize::try_from(4_294_967_300u64).ok();
        assert_eq!(checked_row_size(width, BITS_PER_PIXEL), exact);
        assert_ne!(row_size(width, BITS_PER_PIXEL), 4);
        #[cfg(target_pointer_width = "32")]
        assert_eq!(checked_row_size(width, BITS_PER_PIXEL), None);
    }

    #[test]
    fn test_buffer_len_overflow() {
        assert_eq!(buffer_len(3, 2), Some(24));
        assert_eq!(buffer_len(0, 7), Some(0));
        assert_eq!(buffer_len(u32::MAX, u32::MAX), None);

        let mut header = BitmapHeader::new_rgb24(1, 1);
        header.width = i32::MAX;
        header.height = i32::MAX;
        let expected = usize::try_from(
            (i32::MAX as u64 * 3).next_multiple_of(4) * i32::MAX as u64,
        )
        .ok();
        assert_eq!(header.checked_pixel_buffer_size(), expected);
    }

    #[test]
    fn test_with_dimensions_recomputes_sizes() {
        let header = BitmapHeader::new_rgb24(3, 2);
        let swapped = header.with_dimensions(2, 3);
        assert_eq!(swapped.width, 2);
        assert_eq!(swapped.height, 3);
        // 2 pixels * 3 bytes = 6, padded to 8; 3 rows
        assert_eq!(swapped.data_size, 24);
        assert_eq!(swapped.file_size, 78);
        assert_eq!(swapped.horizontal_res, header.horizontal_res);

        let tall = header.with_dimensions(5, 1);
        assert_eq!(tall.data_size, 16);
        assert_eq!(tall.file_size, 70);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for arbitrary but well-formed 24-bit header bytes.
    fn header_bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), HEADER_LEN..=HEADER_LEN).prop_map(|mut bytes| {
            bytes[26..28].copy_from_slice(&1u16.to_le_bytes());
            bytes[28..30].copy_from_slice(&24u16.to_le_bytes());
            bytes[30..34].copy_from_slice(&0u32.to_le_bytes());
            bytes
        })
    }

    proptest! {
        /// Property: decode then encode reproduces the input bytes.
        #[test]
        fn prop_header_round_trip(bytes in header_bytes_strategy()) {
            let header = BitmapHeader::decode(&bytes).unwrap();
            prop_assert_eq!(header.encode().to_vec(), bytes);
        }

        /// Property: rows are 4-byte aligned and hold every pixel.
        #[test]
        fn prop_row_size_padding(width in 0u32..=100_000) {
            let size = row_size(width, BITS_PER_PIXEL);
            prop_assert_eq!(size % 4, 0);
            prop_assert!(size >= width as usize * 3);
            prop_assert!(size < width as usize * 3 + 4);
        }
    }
}
