mod header;

pub use header::{BksHeader, HEADER_LEN};

use log::debug;

use crate::{
    bitmap::{check_rgb_len, Bitmap, ImageDecoder, ImageEncoder},
    error::{Error, Result},
    rle,
};

/// Compresses an RGB buffer and wraps it in a BKS container.
pub fn write(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    check_rgb_len(width, height, buffer.len() as u64)?;

    let payload = rle::encode(buffer)?;
    let header = BksHeader {
        width,
        height,
        payload_len: u32::try_from(payload.len())
            .map_err(|_| Error::PayloadTooLarge { len: payload.len() })?,
    };

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    header.write_to(&mut bytes)?;
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Reads only the header of a BKS container.
pub fn read_header(data: &[u8]) -> Result<BksHeader> {
    BksHeader::parse(data)
}

/// Unpacks a BKS container into the RGB buffer and dimensions it holds.
pub fn read(data: &[u8]) -> Result<Bitmap> {
    let header = BksHeader::parse(data)?;
    let body = &data[HEADER_LEN..];
    let payload = body
        .get(..header.payload_len as usize)
        .ok_or(Error::TruncatedPayload {
            declared: header.payload_len,
            available: body.len(),
        })?;
    if body.len() > payload.len() {
        debug!(
            "bks: ignoring {} bytes after payload",
            body.len() - payload.len()
        );
    }

    // Dimensions are checked before the payload is expanded
    check_rgb_len(header.width, header.height, rle::decoded_len(payload)?)?;
    Bitmap::rgb(header.width, header.height, rle::decode(payload)?)
}

/// Decodes BKS files
pub struct BksDecoder<'data> {
    image_data: &'data [u8],
}

impl<'data> ImageDecoder<'data> for BksDecoder<'data> {
    fn new(image_data: &'data [u8]) -> Self {
        Self { image_data }
    }

    fn decode(&self) -> Result<Bitmap> {
        read(self.image_data)
    }
}

/// Encodes BKS files
pub struct BksEncoder<'bitmap> {
    bitmap: &'bitmap Bitmap,
}

impl<'bitmap> ImageEncoder<'bitmap> for BksEncoder<'bitmap> {
    fn new(bitmap: &'bitmap Bitmap) -> Self {
        Self { bitmap }
    }

    fn encode(&self) -> Result<Vec<u8>> {
        write(&self.bitmap.data, self.bitmap.width(), self.bitmap.height())
    }
}

#[test]
fn write_two_by_one() {
    let bytes = write(&[5, 5, 5, 5, 5, 5], 2, 1).unwrap();
    assert_eq!(bytes.len(), HEADER_LEN + 2);
    assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()), 2);
    assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 1);
    assert_eq!(u32::from_le_bytes(bytes[8..12].try_into().unwrap()), 2);
    assert_eq!(bytes[12..], [6, 5]);
}

#[test]
fn round_trip() {
    let data: Vec<u8> = (0..4 * 3 * 3).map(|i| (i / 5) as u8).collect();
    let bytes = write(&data, 4, 3).unwrap();
    let bitmap = read(&bytes).unwrap();
    assert_eq!(bitmap.size, (4, 3));
    assert_eq!(bitmap.data, data);

    let header = read_header(&bytes).unwrap();
    assert_eq!(header.payload_len as usize, bytes.len() - HEADER_LEN);
}

#[test]
fn encoder_decoder_round_trip() {
    let bitmap = Bitmap::rgb(1, 2, vec![10, 20, 30, 10, 20, 30]).unwrap();
    let bytes = BksEncoder::new(&bitmap).encode().unwrap();
    assert_eq!(BksDecoder::new(&bytes).decode().unwrap(), bitmap);
}

#[test]
fn write_dimension_mismatch_fails() {
    assert!(matches!(
        write(&[1, 2, 3], 2, 1),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(matches!(write(&[], 0, 0), Err(Error::EmptyInput)));
}

#[test]
fn read_truncated_payload_fails() {
    let bytes = write(&[1, 2, 3, 4, 5, 6], 2, 1).unwrap();
    assert!(matches!(
        read(&bytes[..bytes.len() - 1]),
        Err(Error::TruncatedPayload {
            declared: 12,
            available: 11
        })
    ));
    assert!(matches!(
        read(&bytes[..5]),
        Err(Error::MalformedHeader { len: 5 })
    ));
}

#[test]
fn read_ignores_trailing_bytes() {
    let mut bytes = write(&[9; 6], 2, 1).unwrap();
    bytes.extend_from_slice(&[0xDE, 0xAD]);
    assert_eq!(read(&bytes).unwrap().data, [9; 6]);
}

#[test]
fn read_dimension_mismatch_fails() {
    let mut bytes = write(&[9; 6], 2, 1).unwrap();
    // Claim 3x1 while the payload still expands to 6 bytes
    bytes[0] = 3;
    assert!(matches!(
        read(&bytes),
        Err(Error::DimensionMismatch {
            width: 3,
            height: 1,
            expected: 9,
            actual: 6
        })
    ));
}

#[test]
fn read_odd_payload_fails() {
    #[rustfmt::skip]
    let bytes = [
        1, 0, 0, 0,
        1, 0, 0, 0,
        3, 0, 0, 0,
        0x02, 0x09, 0x01,
    ];
    assert!(matches!(
        read(&bytes),
        Err(Error::OddLengthStream { len: 3 })
    ));
}
