use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::io::{Cursor, Write};

use crate::{
    bitmap::rgb_len,
    error::{Error, Result},
};

/// Size of the fixed header in front of every payload.
pub const HEADER_LEN: usize = 12;

/// The fixed part of a BKS file: three little-endian u32 fields, no padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BksHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Length of the compressed payload following the header
    pub payload_len: u32,
}

impl BksHeader {
    /// Parses the header at the start of `data`.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(Error::MalformedHeader { len: data.len() });
        }

        let mut cursor = Cursor::new(data);
        Ok(Self {
            width: cursor.read_u32::<LittleEndian>()?,
            height: cursor.read_u32::<LittleEndian>()?,
            payload_len: cursor.read_u32::<LittleEndian>()?,
        })
    }

    /// Writes the header fields in file order.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_u32::<LittleEndian>(self.width)?;
        writer.write_u32::<LittleEndian>(self.height)?;
        writer.write_u32::<LittleEndian>(self.payload_len)?;
        Ok(())
    }

    /// Byte length of the RGB buffer this header describes.
    pub fn expected_pixel_bytes(&self) -> u64 {
        rgb_len(self.width, self.height)
    }

    /// Size of the container this header describes, header included.
    pub fn stored_len(&self) -> u64 {
        HEADER_LEN as u64 + self.payload_len as u64
    }

    /// Decoded pixel bytes per stored byte, or `None` for an empty image.
    pub fn compression_ratio(&self) -> Option<f64> {
        match self.expected_pixel_bytes() {
            0 => None,
            pixel_bytes => Some(pixel_bytes as f64 / self.stored_len() as f64),
        }
    }
}

#[rustfmt::skip]
#[allow(dead_code)]
static TEST_HEADER: [u8; 14] = [
    2, 0, 0, 0,     // Width
    1, 0, 0, 0,     // Height
    2, 0, 0, 0,     // Payload length
    6, 0xAB,        // Payload
];

#[test]
fn parse_header() {
    let header = BksHeader::parse(&TEST_HEADER).unwrap();
    assert_eq!(
        header,
        BksHeader {
            width: 2,
            height: 1,
            payload_len: 2
        }
    );
    assert_eq!(header.expected_pixel_bytes(), 6);
}

#[test]
fn parse_is_little_endian() {
    #[rustfmt::skip]
    let bytes = [
        0x01, 0x02, 0, 0,
        0, 0, 0x01, 0,
        0xFF, 0xFF, 0xFF, 0xFF,
    ];
    let header = BksHeader::parse(&bytes).unwrap();
    assert_eq!(header.width, 0x0201);
    assert_eq!(header.height, 0x0001_0000);
    assert_eq!(header.payload_len, u32::MAX);
}

#[test]
fn parse_short_header_fails() {
    assert!(matches!(
        BksHeader::parse(&TEST_HEADER[..11]),
        Err(Error::MalformedHeader { len: 11 })
    ));
    assert!(matches!(
        BksHeader::parse(&[]),
        Err(Error::MalformedHeader { len: 0 })
    ));
}

#[test]
fn write_header() {
    let mut bytes = Vec::new();
    BksHeader::parse(&TEST_HEADER)
        .unwrap()
        .write_to(&mut bytes)
        .unwrap();
    assert_eq!(bytes, TEST_HEADER[..HEADER_LEN]);
}

#[test]
fn ratio_comes_from_header() {
    let mut bytes = TEST_HEADER.to_vec();
    bytes.extend_from_slice(&[0; 100]);
    let header = BksHeader::parse(&bytes).unwrap();
    assert_eq!(header.stored_len(), 14);
    assert_eq!(header.compression_ratio(), Some(6.0 / 14.0));

    let empty = BksHeader {
        width: 0,
        height: 5,
        payload_len: 0,
    };
    assert_eq!(empty.compression_ratio(), None);
}
