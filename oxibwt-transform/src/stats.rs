//! Transform diagnostics.
//!
//! Measures how much structure the BWT and MTF expose in a block: fewer
//! runs after the BWT and lower order-0 entropy after MTF mean an entropy
//! coder downstream has less work to do.

use crate::{bwt, mtf};
use oxibwt_core::ALPHABET_SIZE;
use serde::Serialize;

/// Statistics of one block run through BWT and MTF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformStats {
    /// Length of the input block.
    pub input_len: usize,
    /// BWT primary index, `None` for an empty block.
    pub primary_index: Option<usize>,
    /// Runs of equal bytes in the input.
    pub input_runs: usize,
    /// Runs of equal bytes in the BWT output.
    pub bwt_runs: usize,
    /// Fraction of MTF ranks that are zero.
    pub zero_rank_ratio: f64,
    /// Order-0 entropy of the input, in bits per byte.
    pub input_entropy: f64,
    /// Order-0 entropy of the MTF output, in bits per byte.
    pub mtf_entropy: f64,
}

impl TransformStats {
    /// Run BWT and MTF over `data` and measure the results.
    pub fn analyze(data: &[u8]) -> Self {
        let (first, transformed) = bwt::transform(data);
        let ranks = mtf::encode(&transformed);

        let zero_rank_ratio = if ranks.is_empty() {
            0.0
        } else {
            ranks.iter().filter(|&&r| r == 0).count() as f64 / ranks.len() as f64
        };

        Self {
            input_len: data.len(),
            primary_index: (!data.is_empty()).then_some(first),
            input_runs: count_runs(data),
            bwt_runs: count_runs(&transformed),
            zero_rank_ratio,
            input_entropy: order0_entropy(data),
            mtf_entropy: order0_entropy(&ranks),
        }
    }
}

/// Number of maximal runs of equal bytes.
pub fn count_runs(data: &[u8]) -> usize {
    if data.is_empty() {
        return 0;
    }
    1 + data.windows(2).filter(|w| w[0] != w[1]).count()
}

/// Order-0 (memoryless) entropy in bits per byte.
pub fn order0_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut counts = [0usize; ALPHABET_SIZE];
    for &byte in data {
        counts[byte as usize] += 1;
    }

    let total = data.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}
