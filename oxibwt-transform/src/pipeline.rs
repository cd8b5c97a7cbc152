//! Chained transforms.
//!
//! A [`Pipeline`] runs its stages in order to encode and in reverse order
//! to decode. The standard pipeline is BWT followed by MTF, the same as
//! piping `oxibwt bwt -` into `oxibwt mtf -`.

use crate::bwt::BurrowsWheeler;
use crate::mtf::MoveToFrontCodec;
use log::debug;
use oxibwt_core::{Result, Transform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Options for [`Pipeline::standard`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Run move-to-front after the BWT.
    pub move_to_front: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            move_to_front: true,
        }
    }
}

/// An ordered list of transform stages.
#[derive(Default)]
pub struct Pipeline {
    stages: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Create an empty pipeline (the identity transform).
    pub fn new() -> Self {
        Self::default()
    }

    /// BWT, then MTF if enabled.
    pub fn standard(options: PipelineOptions) -> Self {
        let pipeline = Self::new().with_stage(BurrowsWheeler);
        if options.move_to_front {
            pipeline.with_stage(MoveToFrontCodec)
        } else {
            pipeline
        }
    }

    /// Append a stage.
    pub fn with_stage(mut self, stage: impl Transform + 'static) -> Self {
        self.push(Box::new(stage));
        self
    }

    /// Append a boxed stage.
    pub fn push(&mut self, stage: Box<dyn Transform>) {
        self.stages.push(stage);
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage names in encoding order.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl Transform for Pipeline {
    fn name(&self) -> &'static str {
        "pipeline"
    }

    fn encode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut data = input.to_vec();
        for stage in &self.stages {
            let output = stage.encode(&data)?;
            debug!("{}: {} -> {} bytes", stage.name(), data.len(), output.len());
            data = output;
        }
        Ok(data)
    }

    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut data = input.to_vec();
        for stage in self.stages.iter().rev() {
            let output = stage.decode(&data)?;
            debug!(
                "inverse {}: {} -> {} bytes",
                stage.name(),
                data.len(),
                output.len()
            );
            data = output;
        }
        Ok(data)
    }
}
