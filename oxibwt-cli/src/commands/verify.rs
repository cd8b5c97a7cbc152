//! Verify command implementation.

use crate::utils::format_size;
use oxibwt_core::Transform;
use oxibwt_transform::{Pipeline, PipelineOptions};
use std::fs;
use std::path::PathBuf;

/// Round-trip `file` through the pipeline and check the result matches.
pub fn cmd_verify(
    file: &PathBuf,
    options: PipelineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(file)?;
    let pipeline = Pipeline::standard(options);

    println!(
        "Verifying {} ({})",
        file.display(),
        pipeline.stage_names().join(" -> ")
    );

    let encoded = pipeline.encode(&data)?;
    let decoded = pipeline.decode(&encoded)?;

    if decoded != data {
        let offset = decoded
            .iter()
            .zip(&data)
            .position(|(a, b)| a != b)
            .unwrap_or(decoded.len().min(data.len()));
        return Err(format!(
            "round trip mismatch at byte {} ({} bytes in, {} bytes out)",
            offset,
            data.len(),
            decoded.len()
        )
        .into());
    }

    println!(
        "  OK: {} -> {} -> {}",
        format_size(data.len()),
        format_size(encoded.len()),
        format_size(decoded.len())
    );
    Ok(())
}
