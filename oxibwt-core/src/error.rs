//! Error types for OxiBWT operations.
//!
//! Every failure a transform can report is one of these variants. Decoding
//! errors are stream-corruption errors: the input was not produced by the
//! matching encoder.

use std::io;
use thiserror::Error;

/// The main error type for OxiBWT operations.
#[derive(Debug, Error)]
pub enum OxiBwtError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Unexpected end of stream while reading a fixed-width value.
    #[error("Unexpected end of stream: expected {expected} more bytes")]
    UnexpectedEof {
        /// Number of bytes that were expected but not available.
        expected: usize,
    },

    /// BWT primary index does not address a row of the block.
    #[error("Invalid BWT primary index {index} for block of {len} bytes")]
    InvalidPrimaryIndex {
        /// The primary index read from the stream.
        index: usize,
        /// Length of the transformed block.
        len: usize,
    },

    /// Move-to-front rank outside the 256-symbol alphabet.
    #[error("Invalid move-to-front rank {rank} at position {position}")]
    InvalidRank {
        /// The offending rank.
        rank: usize,
        /// Position of the rank in the input.
        position: usize,
    },

    /// Input is too long to be framed by the stream format.
    #[error("Input too large: {len} bytes exceeds maximum of {max}")]
    InputTooLarge {
        /// Length of the input.
        len: usize,
        /// Largest supported length.
        max: usize,
    },

    /// Direction flag other than `-` or `+`.
    #[error("Invalid direction {found:?}: use '-' to encode, '+' to decode")]
    InvalidDirection {
        /// The flag that was given.
        found: String,
    },
}

/// Result type alias for OxiBWT operations.
pub type Result<T> = std::result::Result<T, OxiBwtError>;

impl OxiBwtError {
    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize) -> Self {
        Self::UnexpectedEof { expected }
    }

    /// Create an invalid primary index error.
    pub fn invalid_primary_index(index: usize, len: usize) -> Self {
        Self::InvalidPrimaryIndex { index, len }
    }

    /// Create an invalid rank error.
    pub fn invalid_rank(rank: usize, position: usize) -> Self {
        Self::InvalidRank { rank, position }
    }

    /// Create an input too large error.
    pub fn input_too_large(len: usize, max: usize) -> Self {
        Self::InputTooLarge { len, max }
    }

    /// Create an invalid direction error.
    pub fn invalid_direction(found: impl Into<String>) -> Self {
        Self::InvalidDirection {
            found: found.into(),
        }
    }

    /// Whether this error means the input stream is corrupted.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            Self::UnexpectedEof { .. } | Self::InvalidPrimaryIndex { .. } | Self::InvalidRank { .. }
        )
    }
}
