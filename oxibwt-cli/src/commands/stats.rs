//! Stats command implementation.

use crate::utils::format_size;
use oxibwt_transform::TransformStats;
use std::fs;
use std::path::PathBuf;

pub fn cmd_stats(file: &PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    let stats = TransformStats::analyze(&data);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("File: {}", file.display());
    println!("Size: {}", format_size(stats.input_len));
    match stats.primary_index {
        Some(first) => println!("Primary index: {}", first),
        None => println!("Primary index: -"),
    }
    println!("Runs: {} -> {} after BWT", stats.input_runs, stats.bwt_runs);
    println!("Zero MTF ranks: {:.1}%", stats.zero_rank_ratio * 100.0);
    println!(
        "Order-0 entropy: {:.3} -> {:.3} bits/byte after BWT+MTF",
        stats.input_entropy, stats.mtf_entropy
    );

    Ok(())
}
