//! Core traits for reversible byte transforms.
//!
//! Every stage of the pipeline (BWT, MTF, ...) implements [`Transform`],
//! which lets stages be chained and driven from the command line without
//! knowing what they do.

use crate::error::{OxiBwtError, Result};
use std::fmt;
use std::str::FromStr;

/// Which way a transform is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Forward transform, selected by `-`.
    Encode,
    /// Inverse transform, selected by `+`.
    Decode,
}

impl Direction {
    /// The single-character flag for this direction.
    pub fn flag(&self) -> char {
        match self {
            Self::Encode => '-',
            Self::Decode => '+',
        }
    }
}

impl FromStr for Direction {
    type Err = OxiBwtError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "-" => Ok(Self::Encode),
            "+" => Ok(Self::Decode),
            other => Err(OxiBwtError::invalid_direction(other)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flag())
    }
}

/// A reversible whole-buffer transform.
///
/// Implementations build any working state inside each call, so one value
/// can be shared between threads and reused freely.
pub trait Transform: Send + Sync {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Apply the forward transform.
    fn encode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Apply the inverse transform.
    ///
    /// # Errors
    ///
    /// Returns a corruption error if `input` could not have been produced
    /// by [`Transform::encode`].
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Apply the transform in the given direction.
    fn apply(&self, direction: Direction, input: &[u8]) -> Result<Vec<u8>> {
        match direction {
            Direction::Encode => self.encode(input),
            Direction::Decode => self.decode(input),
        }
    }
}
