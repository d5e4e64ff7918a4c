use log::debug;

use crate::error::{Error, Result};

/// Longest run a single (count, value) pair can hold.
pub const MAX_RUN: u8 = u8::MAX;

/// `count` consecutive copies of `value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    /// Number of repetitions, 1..=255 when produced by the encoder
    pub count: u8,
    /// The repeated byte
    pub value: u8,
}

impl Run {
    /// The run as it appears in a compressed stream.
    pub fn to_bytes(self) -> [u8; 2] {
        [self.count, self.value]
    }
}

/// Splits a byte slice into runs of at most [`MAX_RUN`] identical bytes.
#[derive(Debug)]
pub struct Runs<'data> {
    data: &'data [u8],
    cursor: usize,
}

impl<'data> Runs<'data> {
    /// Creates a run iterator over `data`.
    pub fn new(data: &'data [u8]) -> Self {
        Self { data, cursor: 0 }
    }
}

impl Iterator for Runs<'_> {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        let value = *self.data.get(self.cursor)?;
        let mut count = 1;
        while count < MAX_RUN && self.data.get(self.cursor + count as usize) == Some(&value) {
            count += 1;
        }
        self.cursor += count as usize;
        Some(Run { count, value })
    }
}

/// Returns the runs making up `data`, left to right.
pub fn runs(data: &[u8]) -> Runs<'_> {
    Runs::new(data)
}

/// Run-length encodes `data` into alternating (count, value) byte pairs.
///
/// Runs are capped at 255 bytes, so 300 copies of a byte come out as two pairs.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut compressed = Vec::new();
    for run in runs(data) {
        compressed.extend_from_slice(&run.to_bytes());
    }

    debug!(
        "rle: {} bytes -> {} runs ({} bytes)",
        data.len(),
        compressed.len() / 2,
        compressed.len()
    );
    Ok(compressed)
}

/// Number of bytes `stream` expands to, summed in `u64`.
pub fn decoded_len(stream: &[u8]) -> Result<u64> {
    check_pairs(stream)?;
    Ok(stream.chunks_exact(2).map(|pair| pair[0] as u64).sum())
}

/// Expands a stream of (count, value) pairs back into the original bytes.
///
/// A pair with count 0 contributes nothing.
pub fn decode(stream: &[u8]) -> Result<Vec<u8>> {
    let capacity = usize::try_from(decoded_len(stream)?).unwrap_or(0);
    let mut decompressed = Vec::with_capacity(capacity);
    for pair in stream.chunks_exact(2) {
        let (count, value) = (pair[0] as usize, pair[1]);
        decompressed.resize(decompressed.len() + count, value);
    }

    debug!(
        "rle: {} runs -> {} bytes",
        stream.len() / 2,
        decompressed.len()
    );
    Ok(decompressed)
}

fn check_pairs(stream: &[u8]) -> Result<()> {
    if stream.len() % 2 != 0 {
        return Err(Error::OddLengthStream { len: stream.len() });
    }
    Ok(())
}

#[test]
fn encode_single_run() {
    assert_eq!(encode(&[9, 9, 9]).unwrap(), [0x03, 0x09]);
}

#[test]
fn encode_alternating_runs() {
    assert_eq!(
        encode(&[1, 1, 2, 2, 2, 3]).unwrap(),
        [0x02, 0x01, 0x03, 0x02, 0x01, 0x03]
    );
}

#[test]
fn encode_splits_at_run_cap() {
    let data = [7u8; 300];
    assert_eq!(
        runs(&data).collect::<Vec<_>>(),
        [
            Run {
                count: 255,
                value: 7
            },
            Run {
                count: 45,
                value: 7
            }
        ]
    );
    assert_eq!(encode(&data).unwrap(), [0xFF, 0x07, 0x2D, 0x07]);
}

#[test]
fn encode_exact_cap_is_one_run() {
    assert_eq!(encode(&[4u8; 255]).unwrap(), [0xFF, 0x04]);
    assert_eq!(encode(&[4u8; 256]).unwrap(), [0xFF, 0x04, 0x01, 0x04]);
}

#[test]
fn encode_empty_fails() {
    assert!(matches!(encode(&[]), Err(Error::EmptyInput)));
}

#[test]
fn decode_expands_pairs() {
    assert_eq!(
        decode(&[0x02, 0x01, 0x03, 0x02, 0x01, 0x03]).unwrap(),
        [1, 1, 2, 2, 2, 3]
    );
    assert_eq!(decode(&[]).unwrap(), Vec::<u8>::new());
}

#[test]
fn decode_skips_zero_count() {
    assert_eq!(decode(&[0x00, 0x05, 0x02, 0x06]).unwrap(), [6, 6]);
}

#[test]
fn decode_odd_length_fails() {
    assert!(matches!(
        decode(&[0x02, 0x09, 0x01]),
        Err(Error::OddLengthStream { len: 3 })
    ));
}

#[test]
fn decoded_len_sums_counts() {
    assert_eq!(decoded_len(&[0xFF, 0x07, 0x2D, 0x07]).unwrap(), 300);
    assert!(decoded_len(&[0x01]).is_err());
}

#[test]
fn decoded_len_exceeds_u32() {
    let pairs = 0x0101_0102;
    let stream = vec![0xFF; 2 * pairs];
    let len = decoded_len(&stream).unwrap();
    assert_eq!(len, pairs as u64 * 255);
    assert!(len > u32::MAX as u64);
}

#[test]
fn round_trip() {
    let mut data: Vec<u8> = (0..=255u8).collect();
    data.extend_from_slice(&[0u8; 600]);
    data.extend((0..1000u32).map(|i| (i / 7) as u8));
    data.push(42);

    for len in [1, 2, 255, 256, 511, data.len()] {
        let slice = &data[..len];
        assert_eq!(decode(&encode(slice).unwrap()).unwrap(), slice);
    }
}
