use thiserror::Error;

/// Result type for BKS operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Describes an error encountered while compressing or decompressing an image.
#[derive(Debug, Error)]
pub enum Error {
    /// The container is shorter than its fixed header.
    #[error("BKS header is malformed: expected 12 bytes, found {len}")]
    MalformedHeader {
        /// Bytes actually present
        len: usize,
    },

    /// The header declares more payload than follows it.
    #[error("BKS payload is truncated: header declares {declared} bytes, {available} available")]
    TruncatedPayload {
        /// Payload length stored in the header
        declared: u32,
        /// Bytes left after the header
        available: usize,
    },

    /// A compressed stream can't be split into (count, value) pairs.
    #[error("compressed stream has odd length {len}")]
    OddLengthStream {
        /// Length of the offending stream
        len: usize,
    },

    /// There is nothing to compress.
    #[error("cannot compress an empty pixel buffer")]
    EmptyInput,

    /// The pixel data doesn't match the dimensions it travels with.
    #[error("{width}x{height} RGB image needs {expected} bytes, found {actual}")]
    DimensionMismatch {
        /// Declared width in pixels
        width: u32,
        /// Declared height in pixels
        height: u32,
        /// width * height * 3
        expected: u64,
        /// Length of the pixel buffer
        actual: u64,
    },

    /// The compressed payload doesn't fit the 32-bit length field.
    #[error("compressed payload of {len} bytes exceeds the 32-bit length field")]
    PayloadTooLarge {
        /// Length of the compressed payload
        len: usize,
    },

    /// There was an error reading or writing a file
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The image library failed to decode or encode a raster image
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
