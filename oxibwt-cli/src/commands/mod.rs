//! Command implementations for OxiBWT CLI.

pub mod stats;
pub mod transform;
pub mod verify;

pub use stats::cmd_stats;
pub use transform::cmd_transform;
pub use verify::cmd_verify;
