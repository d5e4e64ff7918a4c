//! PNG/JPEG glue around the `image` crate.
//!
//! Everything read here is flattened to 8-bit RGB, any alpha channel is dropped.

use ::image::{DynamicImage, ExtendedColorType, ImageFormat, ImageReader};
use log::debug;
use std::{io::Cursor, path::Path};

use crate::{
    bitmap::{check_rgb_len, Bitmap, ImageDecoder, ImageEncoder},
    error::Result,
};

/// Loads a raster image from disk, detecting the format from its contents.
pub fn load_image_from_path<P: AsRef<Path>>(path: P) -> Result<Bitmap> {
    let image = ImageReader::open(path.as_ref())?
        .with_guessed_format()?
        .decode()?;
    into_bitmap(image)
}

/// Loads a raster image from memory, detecting the format from its contents.
pub fn load_image_from_bytes(data: &[u8]) -> Result<Bitmap> {
    let image = ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;
    into_bitmap(image)
}

/// Saves a bitmap, picking the format from the file extension.
pub fn save_image<P: AsRef<Path>>(bitmap: &Bitmap, path: P) -> Result<()> {
    let (width, height) = bitmap.size;
    check_rgb_len(width, height, bitmap.data.len() as u64)?;
    ::image::save_buffer(
        path.as_ref(),
        &bitmap.data,
        width,
        height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(())
}

fn into_bitmap(image: DynamicImage) -> Result<Bitmap> {
    debug!(
        "raster: {}x{} {:?} -> rgb8",
        image.width(),
        image.height(),
        image.color()
    );
    let rgb = image.into_rgb8();
    let (width, height) = rgb.dimensions();
    Bitmap::rgb(width, height, rgb.into_raw())
}

/// Decodes any raster format the `image` crate was built with
pub struct RasterDecoder<'data> {
    image_data: &'data [u8],
}

impl<'data> ImageDecoder<'data> for RasterDecoder<'data> {
    fn new(image_data: &'data [u8]) -> Self {
        Self { image_data }
    }

    fn decode(&self) -> Result<Bitmap> {
        load_image_from_bytes(self.image_data)
    }
}

/// Encodes bitmaps as PNG in memory, or as whatever the extension names on disk
pub struct RasterEncoder<'bitmap> {
    bitmap: &'bitmap Bitmap,
}

impl<'bitmap> ImageEncoder<'bitmap> for RasterEncoder<'bitmap> {
    fn new(bitmap: &'bitmap Bitmap) -> Self {
        Self { bitmap }
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let (width, height) = self.bitmap.size;
        check_rgb_len(width, height, self.bitmap.data.len() as u64)?;

        let mut cursor = Cursor::new(Vec::new());
        ::image::write_buffer_with_format(
            &mut cursor,
            &self.bitmap.data,
            width,
            height,
            ExtendedColorType::Rgb8,
            ImageFormat::Png,
        )?;
        Ok(cursor.into_inner())
    }

    fn encode_to_file(&self, path: &Path) -> Result<()> {
        save_image(self.bitmap, path)
    }
}

#[cfg(test)]
fn checkerboard() -> Bitmap {
    let data = (0..4 * 4)
        .flat_map(|i| {
            if (i % 4 + i / 4) % 2 == 0 {
                [255, 0, 0]
            } else {
                [0, 0, 255]
            }
        })
        .collect();
    Bitmap::rgb(4, 4, data).unwrap()
}

#[test]
fn png_round_trip() {
    let bitmap = checkerboard();
    let png = RasterEncoder::new(&bitmap).encode().unwrap();
    assert_eq!(&png[1..4], b"PNG");
    assert_eq!(RasterDecoder::new(&png).decode().unwrap(), bitmap);
}

#[test]
fn alpha_is_dropped() {
    let rgba = ::image::RgbaImage::from_pixel(2, 1, ::image::Rgba([10, 20, 30, 128]));
    let mut cursor = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut cursor, ImageFormat::Png)
        .unwrap();

    let bitmap = load_image_from_bytes(cursor.get_ref()).unwrap();
    assert_eq!(bitmap.channels, 3);
    assert_eq!(bitmap.data, [10, 20, 30, 10, 20, 30]);
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkerboard.png");
    let bitmap = checkerboard();
    RasterEncoder::new(&bitmap).encode_to_file(&path).unwrap();
    assert_eq!(load_image_from_path(&path).unwrap(), bitmap);
}

#[test]
fn missing_file_is_io_error() {
    assert!(matches!(
        load_image_from_path("/nonexistent/bks/input.png"),
        Err(crate::error::Error::Io(_))
    ));
}

#[test]
fn garbage_is_image_error() {
    assert!(matches!(
        load_image_from_bytes(b"definitely not an image"),
        Err(crate::error::Error::Image(_))
    ));
}
