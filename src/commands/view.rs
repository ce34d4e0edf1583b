//! View command implementation.
//!
//! Loads a read file, a reference file and an alignment file, orients the
//! mates and writes the rendered pileup.

use crate::alignments::read_alignments;
use crate::config::{PileupConfig, DEFAULT_LINE_WIDTH};
use crate::error::Result;
use crate::orient::{orient_pairs, Orientation};
use crate::pileup::{PileupRenderer, PileupStats};
use crate::reads::read_pairs;
use crate::reference::read_reference;
use std::io::{self, Write};
use std::path::Path;

/// View command configuration.
#[derive(Debug, Clone)]
pub struct ViewCommand {
    /// Reference bases per printed line.
    pub line_width: usize,
    /// Orientation of right mates as stored in the read file.
    pub right_orientation: Orientation,
}

impl Default for ViewCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewCommand {
    pub fn new() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            right_orientation: Orientation::Forward,
        }
    }

    fn renderer(&self) -> PileupRenderer {
        PileupRenderer::with_config(PileupConfig::new().with_line_width(self.line_width))
    }

    /// Check the render settings without touching any file.
    pub fn validate(&self) -> Result<()> {
        self.renderer().config().validate()
    }

    /// Load the three inputs and render the pileup into `output`.
    pub fn run<W: Write>(
        &self,
        reads_path: &Path,
        reference_path: &Path,
        alignments_path: &Path,
        output: &mut W,
    ) -> Result<PileupStats> {
        self.validate()?;

        let pairs = read_pairs(reads_path)?;
        let reference = read_reference(reference_path)?;
        let alignments = read_alignments(alignments_path)?;

        let (reads, offsets) = orient_pairs(&pairs, &alignments, self.right_orientation)?;

        self.renderer()
            .render_to(&reads, &offsets, reference.as_str(), output)
    }

    /// Render to stdout.
    pub fn run_stdout(
        &self,
        reads_path: &Path,
        reference_path: &Path,
        alignments_path: &Path,
    ) -> Result<PileupStats> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.run(reads_path, reference_path, alignments_path, &mut handle)
    }
}
