//! Burrows-Wheeler and Move-to-Front transforms for OxiBWT.
//!
//! This crate provides the block-sorting half of a BWT compressor:
//! 1. Circular suffix array - Sorted rotations of a block
//! 2. Burrows-Wheeler Transform (BWT) - Groups bytes by context
//! 3. Move-to-Front Transform (MTF) - Turns byte runs into zero runs
//!
//! Entropy coding of the MTF output is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use oxibwt_transform::{bwt, mtf};
//!
//! let (first, transformed) = bwt::transform(b"ABRACADABRA!");
//! assert_eq!((first, transformed.as_slice()), (3, &b"ARD!RCAAAABB"[..]));
//!
//! let ranks = mtf::encode(&transformed);
//! let restored = bwt::inverse_transform(first, &mtf::decode(&ranks)).unwrap();
//! assert_eq!(restored, b"ABRACADABRA!");
//! ```
//!
//! ## Features
//!
//! - `parallel`: sort large partitions of the suffix array on the rayon
//!   thread pool.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Burrows-Wheeler Transform implementation.
pub mod bwt;
/// Move-to-Front Transform implementation.
pub mod mtf;
pub mod pipeline;
pub mod stats;
mod suffix;

pub use bwt::BurrowsWheeler;
pub use mtf::{MoveToFront, MoveToFrontCodec};
pub use pipeline::{Pipeline, PipelineOptions};
pub use stats::TransformStats;
pub use suffix::CircularSuffixArray;

pub use oxibwt_core::{Direction, OxiBwtError, Result, Transform};
