//! # OxiBWT Core
//!
//! Core components for the OxiBWT transform library.
//!
//! - [`binary`]: Bit, byte and fixed-width integer stream I/O
//! - [`traits`]: The [`Transform`] trait and [`Direction`] flag
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: CLI                                                 │
//! │     oxibwt bwt / mtf / pipeline / verify / stats        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Transforms                                          │
//! │     Circular suffix array, BWT, MTF, Pipeline           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Binary stream (this crate)                          │
//! │     BinaryReader/BinaryWriter, Transform, errors        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_core::{BinaryReader, Direction};
//! use std::io::Cursor;
//!
//! let mut reader = BinaryReader::new(Cursor::new(vec![0x00, 0x00, 0x00, 0x03]));
//! assert_eq!(reader.read_u32().unwrap(), 3);
//!
//! let direction: Direction = "+".parse().unwrap();
//! assert_eq!(direction, Direction::Decode);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod binary;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use binary::{BinaryReader, BinaryWriter};
pub use error::{OxiBwtError, Result};
pub use traits::{Direction, Transform};

/// Size of the byte alphabet every transform works over.
pub const ALPHABET_SIZE: usize = 256;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::ALPHABET_SIZE;
    pub use crate::binary::{BinaryReader, BinaryWriter};
    pub use crate::error::{OxiBwtError, Result};
    pub use crate::traits::{Direction, Transform};
}
