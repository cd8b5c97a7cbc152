//! Encode/decode commands (`bwt`, `mtf`, `pipeline`).

use crate::utils::{format_size, read_input, write_output};
use log::info;
use oxibwt_core::{Direction, Transform};
use std::path::Path;
use std::time::Instant;

/// Run `stage` over the whole input in `direction`.
pub fn cmd_transform(
    stage: &dyn Transform,
    direction: Direction,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_input(input)?;

    let start = Instant::now();
    let result = stage.apply(direction, &data)?;
    let elapsed = start.elapsed();

    let verb = match direction {
        Direction::Encode => "encoded",
        Direction::Decode => "decoded",
    };
    info!(
        "{} {}: {} -> {} in {:.2?}",
        stage.name(),
        verb,
        format_size(data.len()),
        format_size(result.len()),
        elapsed
    );

    write_output(output, &result)?;
    Ok(())
}
