//! Burrows-Wheeler Transform.
//!
//! The BWT is a reversible permutation of a block that groups bytes with
//! similar right-hand contexts together, making the data more compressible
//! for a following move-to-front and entropy coding stage.
//!
//! Encoding sorts the block's circular rotations with a
//! [`CircularSuffixArray`]; decoding never sorts and runs in
//! O(n + 256) using a counting sort of the last column.
//!
//! # Stream format
//!
//! ```text
//! +----------------+---------------------------+
//! | first: u32 BE  | transformed block (n B)   |
//! +----------------+---------------------------+
//! ```
//!
//! `n` is implied by the stream length. An empty block is an empty stream.

use crate::suffix::CircularSuffixArray;
use log::debug;
use oxibwt_core::{ALPHABET_SIZE, BinaryReader, BinaryWriter, OxiBwtError, Result, Transform};
use std::io::{Read, Write};

/// Largest block the stream format can frame.
pub const MAX_BLOCK_LEN: usize = u32::MAX as usize;

/// Perform the Burrows-Wheeler Transform.
///
/// Returns `(first, transformed)`: the sorted row holding the original
/// string, and the last column of the sorted rotation matrix. For an empty
/// block `first` is 0.
pub fn transform(data: &[u8]) -> (usize, Vec<u8>) {
    if data.is_empty() {
        return (0, Vec::new());
    }

    let n = data.len();
    let csa = CircularSuffixArray::new(data);

    let mut first = 0;
    let mut transformed = Vec::with_capacity(n);
    for (row, &start) in csa.indices().iter().enumerate() {
        if start == 0 {
            first = row;
        }
        // Last column: the byte cyclically preceding each rotation.
        let prev = if start == 0 { n - 1 } else { start - 1 };
        transformed.push(data[prev]);
    }

    (first, transformed)
}

/// Perform the inverse Burrows-Wheeler Transform.
///
/// Rebuilds the original block from `first` and the transformed block
/// without constructing a suffix array.
///
/// # Errors
///
/// Returns [`OxiBwtError::InvalidPrimaryIndex`] if `first` is not a row of
/// a non-empty block. An empty block decodes to an empty output whatever
/// `first` is.
pub fn inverse_transform(first: usize, data: &[u8]) -> Result<Vec<u8>> {
    let n = data.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    if first >= n {
        return Err(OxiBwtError::invalid_primary_index(first, n));
    }

    let mut counts = [0usize; ALPHABET_SIZE];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    // The first column is the last column sorted; lay it out by counts and
    // remember where each byte's run starts.
    let mut first_column = Vec::with_capacity(n);
    let mut starts = [0usize; ALPHABET_SIZE];
    for (byte, &count) in counts.iter().enumerate() {
        starts[byte] = first_column.len();
        first_column.resize(first_column.len() + count, byte as u8);
    }

    // The k-th occurrence of a byte in the last column is the k-th
    // occurrence in the first column. `next[row]` is the last-column
    // position of the occurrence that heads `row`, which is the row of the
    // following rotation.
    let mut next = vec![0usize; n];
    let mut cursor = starts;
    for (pos, &byte) in data.iter().enumerate() {
        let slot = &mut cursor[byte as usize];
        next[*slot] = pos;
        *slot += 1;
    }

    let mut result = Vec::with_capacity(n);
    let mut row = first;
    for _ in 0..n {
        result.push(first_column[row]);
        row = next[row];
    }

    Ok(result)
}

/// Transform `data` and write it to `writer` in the stream format.
///
/// # Errors
///
/// Returns [`OxiBwtError::InputTooLarge`] if `first` could not fit the
/// 32-bit header, or any write error.
pub fn encode_to<W: Write>(data: &[u8], writer: &mut BinaryWriter<W>) -> Result<()> {
    if data.is_empty() {
        return Ok(());
    }
    if data.len() > MAX_BLOCK_LEN {
        return Err(OxiBwtError::input_too_large(data.len(), MAX_BLOCK_LEN));
    }

    let (first, transformed) = transform(data);
    debug!("bwt: {} bytes, primary index {}", data.len(), first);

    writer.write_u32(first as u32)?;
    writer.write_bytes(&transformed)?;
    Ok(())
}

/// Read a stream-format block from `reader` and invert it.
///
/// Consumes the reader to its end.
pub fn decode_from<R: Read>(reader: &mut BinaryReader<R>) -> Result<Vec<u8>> {
    if reader.is_empty()? {
        return Ok(Vec::new());
    }

    let first = reader.read_u32()? as usize;
    let transformed = reader.read_to_end()?;
    debug!(
        "inverse bwt: {} bytes, primary index {}",
        transformed.len(),
        first
    );

    inverse_transform(first, &transformed)
}

/// Encode `data` into a stream-format buffer.
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    let header = if data.is_empty() { 0 } else { 4 };
    let mut writer = BinaryWriter::new(Vec::with_capacity(data.len() + header));
    encode_to(data, &mut writer)?;
    writer.into_inner()
}

/// Decode a stream-format buffer.
pub fn decode(stream: &[u8]) -> Result<Vec<u8>> {
    decode_from(&mut BinaryReader::new(stream))
}

/// The BWT as a pipeline stage over the stream format.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurrowsWheeler;

impl Transform for BurrowsWheeler {
    fn name(&self) -> &'static str {
        "bwt"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        encode(input)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        decode(input)
    }
}
