use std::{fs, path::Path};

use crate::error::{Error, Result};

/// Number of interleaved channels in an RGB pixel.
pub const RGB_CHANNELS: u8 = 3;

/// Stores a single frame of image data in a simple bitmap form
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// The number of color channels in the image. Always 3 (RGB) for now.
    pub channels: u8,

    /// The size of the image
    pub size: (u32, u32),
    /// The raw bitmap data, row by row, channels interleaved
    pub data: Vec<u8>,
}

impl Bitmap {
    /// Wraps an interleaved RGB buffer, checking it holds exactly `width * height` pixels.
    pub fn rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        check_rgb_len(width, height, data.len() as u64)?;
        Ok(Self {
            channels: RGB_CHANNELS,
            size: (width, height),
            data,
        })
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.size.0
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.size.1
    }
}

/// Byte length of an RGB buffer of the given dimensions, saturating at `u64::MAX`.
pub fn rgb_len(width: u32, height: u32) -> u64 {
    (width as u64 * height as u64).saturating_mul(RGB_CHANNELS as u64)
}

/// Fails with [`Error::DimensionMismatch`] unless `actual` is `width * height * 3`.
pub fn check_rgb_len(width: u32, height: u32, actual: u64) -> Result<()> {
    let expected = rgb_len(width, height);
    if expected != actual {
        return Err(Error::DimensionMismatch {
            width,
            height,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Used to decode an image. Implemented for every format the converter reads.
pub trait ImageDecoder<'data> {
    /// Supplies the decoder with the encoded image data
    fn new(image_data: &'data [u8]) -> Self;
    /// Decodes the image
    fn decode(&self) -> Result<Bitmap>;
}

/// Used to encode an image. Implemented for every format the converter writes.
pub trait ImageEncoder<'bitmap> {
    /// Supplies the encoder with a raw bitmap to encode.
    fn new(bitmap: &'bitmap Bitmap) -> Self;
    /// Encodes the bitmap into an in-memory file.
    fn encode(&self) -> Result<Vec<u8>>;
    /// Encodes the bitmap and saves the result to a file at the given path.
    fn encode_to_file(&self, path: &Path) -> Result<()> {
        let bytes = self.encode()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}

#[test]
fn rgb_checks_length() {
    let bitmap = Bitmap::rgb(2, 1, vec![1, 2, 3, 4, 5, 6]).unwrap();
    assert_eq!(bitmap.channels, 3);
    assert_eq!(bitmap.width(), 2);
    assert_eq!(bitmap.height(), 1);

    assert!(matches!(
        Bitmap::rgb(2, 2, vec![0; 6]),
        Err(Error::DimensionMismatch {
            expected: 12,
            actual: 6,
            ..
        })
    ));
}

#[test]
fn rgb_len_saturates() {
    assert_eq!(rgb_len(2, 1), 6);
    assert_eq!(rgb_len(u32::MAX, u32::MAX), u64::MAX);
    assert!(check_rgb_len(u32::MAX, u32::MAX, 0).is_err());
}
