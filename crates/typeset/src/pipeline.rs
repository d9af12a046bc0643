//! Render pipeline - coordinates the typesetting stages.

use crate::config::{OutputFormat, TypesetConfig};
use common::error::FormulaResult;
use layout::{LayoutEngine, PositionedTree};
use render::{CommandList, Painter, SvgDocument};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::debug;

/// Runs parse, layout, paint and write over one input.
pub struct RenderPipeline {
    config: TypesetConfig,
    /// Completed runs.
    runs: u64,
}

impl RenderPipeline {
    /// Create a new render pipeline.
    pub fn new(config: TypesetConfig) -> Self {
        Self { config, runs: 0 }
    }

    pub fn config(&self) -> &TypesetConfig {
        &self.config
    }

    /// Number of completed runs.
    pub fn runs(&self) -> u64 {
        self.runs
    }

    /// Typeset `input` and write the document to `out`.
    pub fn run<W: Write>(&mut self, input: &str, out: &mut W) -> FormulaResult<PipelineResult> {
        let mut stage_times = Vec::with_capacity(4);

        let expr = timed(PipelineStage::Parse, &mut stage_times, || notation::parse(input))?;

        let engine = LayoutEngine::new(self.config.root_scale, self.config.origin);
        let tree = timed(PipelineStage::Layout, &mut stage_times, || engine.layout(expr))?;

        let commands = timed(PipelineStage::Paint, &mut stage_times, || {
            Painter::new().paint_to_list(&tree)
        })?;

        timed(PipelineStage::Write, &mut stage_times, || {
            self.write(&commands, &mut *out)
        })?;

        self.runs += 1;
        Ok(PipelineResult {
            tree,
            commands,
            stage_times,
        })
    }

    fn write<W: Write>(&self, commands: &CommandList, out: &mut W) -> FormulaResult<()> {
        match self.config.format {
            OutputFormat::Svg => {
                SvgDocument::new(self.config.svg_options()).write_to(commands, out)?;
            }
            OutputFormat::Json => {
                writeln!(out, "{}", commands.to_json()?)?;
                out.flush()?;
            }
        }
        Ok(())
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new(TypesetConfig::default())
    }
}

fn timed<T>(
    stage: PipelineStage,
    stage_times: &mut Vec<(PipelineStage, Duration)>,
    f: impl FnOnce() -> FormulaResult<T>,
) -> FormulaResult<T> {
    let start = Instant::now();
    let result = f();
    let elapsed = start.elapsed();
    debug!(?stage, ?elapsed, ok = result.is_ok(), "stage finished");
    stage_times.push((stage, elapsed));
    result
}

/// Pipeline stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    /// Parse notation into an expression.
    Parse,
    /// Run the scale, size and position passes.
    Layout,
    /// Emit drawing commands.
    Paint,
    /// Write the output document.
    Write,
}

/// Result of running the pipeline.
#[derive(Debug)]
pub struct PipelineResult {
    /// The laid-out tree.
    pub tree: PositionedTree,
    /// Commands in emission order.
    pub commands: CommandList,
    /// Time spent in each stage.
    pub stage_times: Vec<(PipelineStage, Duration)>,
}

impl PipelineResult {
    /// Get total time.
    pub fn total_time(&self) -> Duration {
        self.stage_times.iter().map(|(_, d)| *d).sum()
    }
}
