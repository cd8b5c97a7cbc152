//! Move-to-Front Transform.
//!
//! MTF replaces each byte with its position in a most-recently-used list of
//! all 256 byte values, then moves that byte to the front of the list.
//! After a BWT, runs of the same byte become runs of zeros.
//!
//! The stream format is one output byte per input byte.

use log::debug;
use oxibwt_core::{ALPHABET_SIZE, OxiBwtError, Result, Transform};

/// Move-to-front state: an ordering of all 256 byte values.
///
/// Encoding and decoding drive the same update, so a decoder that starts
/// from the same ordering as the encoder stays in lock step with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveToFront {
    order: [u8; ALPHABET_SIZE],
}

impl MoveToFront {
    /// Create a state in identity order `[0, 1, ..., 255]`.
    pub fn new() -> Self {
        Self {
            order: std::array::from_fn(|i| i as u8),
        }
    }

    /// Return to identity order.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// The current ordering, most recently used first.
    pub fn order(&self) -> &[u8; ALPHABET_SIZE] {
        &self.order
    }

    #[inline]
    fn move_to_front(&mut self, pos: usize) {
        let byte = self.order[pos];
        self.order.copy_within(..pos, 1);
        self.order[0] = byte;
    }

    /// Encode one byte, returning its rank before the update.
    #[inline]
    pub fn encode_byte(&mut self, byte: u8) -> u8 {
        let mut pos = 0;
        while self.order[pos] != byte {
            pos += 1;
        }
        self.move_to_front(pos);
        pos as u8
    }

    /// Decode one rank, returning the byte it stands for.
    #[inline]
    pub fn decode_rank(&mut self, rank: u8) -> u8 {
        let pos = rank as usize;
        let byte = self.order[pos];
        self.move_to_front(pos);
        byte
    }

    /// Decode a rank that may not fit the alphabet.
    ///
    /// # Errors
    ///
    /// Returns [`OxiBwtError::InvalidRank`] if `rank > 255`; the state is
    /// left untouched. `position` is only used for the error report.
    pub fn try_decode_rank(&mut self, rank: usize, position: usize) -> Result<u8> {
        let rank = u8::try_from(rank).map_err(|_| OxiBwtError::invalid_rank(rank, position))?;
        Ok(self.decode_rank(rank))
    }
}

impl Default for MoveToFront {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform the Move-to-Front transform from identity order.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut state = MoveToFront::new();
    data.iter().map(|&byte| state.encode_byte(byte)).collect()
}

/// Perform the inverse Move-to-Front transform from identity order.
pub fn decode(ranks: &[u8]) -> Vec<u8> {
    let mut state = MoveToFront::new();
    ranks.iter().map(|&rank| state.decode_rank(rank)).collect()
}

/// Inverse Move-to-Front over ranks wider than a byte.
///
/// For callers whose entropy decoder yields 16-bit symbols.
pub fn decode_ranks(ranks: &[u16]) -> Result<Vec<u8>> {
    let mut state = MoveToFront::new();
    ranks
        .iter()
        .enumerate()
        .map(|(position, &rank)| state.try_decode_rank(rank as usize, position))
        .collect()
}

/// MTF as a pipeline stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveToFrontCodec;

impl Transform for MoveToFrontCodec {
    fn name(&self) -> &'static str {
        "mtf"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let output = encode(input);
        debug!(
            "mtf: {} bytes, {} zero ranks",
            output.len(),
            output.iter().filter(|&&r| r == 0).count()
        );
        Ok(output)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        debug!("inverse mtf: {} bytes", input.len());
        Ok(decode(input))
    }
}
