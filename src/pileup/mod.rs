//! Pileup rendering.
//!
//! Stacks reads under a reference at their alignment offsets. The reference
//! is wrapped into fixed-width segments; each read starts in the segment
//! containing its offset, padded to its column, and keeps printing in the
//! same lane across following segments until it is used up.
//!
//! # Algorithm
//!
//! 1. Drop reads whose offset is `-1` (unaligned).
//! 2. Order the rest by `(offset, input index)`.
//! 3. For each segment of `line_width` reference bases:
//!    - left-pad every read starting in the segment to its column and put it
//!      in the first free lane (or a new lane),
//!    - print up to `line_width` characters from every lane,
//!    - trim free lanes off the end of the lane list.
//!
//! A read starting in the slack after the reference end but inside the last
//! window is still placed in that window. Reads starting beyond the last
//! segment window fall in no segment and are not rendered.

pub mod lanes;
pub mod writer;

pub use lanes::LaneRegistry;
pub use writer::{PileupWriter, INDEX_LABEL, READ_LABEL, REF_LABEL};

use crate::config::{PileupConfig, UNALIGNED};
use crate::error::{PileupError, Result};
use std::io::{self, Write};

/// An aligned read ready for placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedRead<'a> {
    /// Position of the read in the caller's input.
    pub index: usize,
    /// 0-based reference offset of the first base.
    pub offset: usize,
    pub read: &'a str,
}

/// One fixed-width window of the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// Reference index of the first base in the window.
    pub start: usize,
    /// Reference bases in the window (shorter for the final partial window).
    pub bases: &'a str,
}

/// Split a reference into consecutive `width`-base windows.
///
/// The last window is shorter when the reference length is not a multiple
/// of `width`. `width` must be positive and `reference` ASCII.
pub fn segments(reference: &str, width: usize) -> impl Iterator<Item = Segment<'_>> {
    let count = reference.len().div_ceil(width);
    (0..count).map(move |i| {
        let start = i * width;
        let end = (start + width).min(reference.len());
        Segment {
            start,
            bases: &reference[start..end],
        }
    })
}

/// Keep aligned reads and order them by offset, breaking ties by input index.
pub fn select_aligned<'a, S: AsRef<str>>(reads: &'a [S], offsets: &[i64]) -> Vec<PlacedRead<'a>> {
    let mut placed: Vec<PlacedRead<'a>> = reads
        .iter()
        .zip(offsets)
        .enumerate()
        .filter(|(_, (_, offset))| **offset != UNALIGNED)
        .map(|(index, (read, &offset))| PlacedRead {
            index,
            offset: offset as usize,
            read: read.as_ref(),
        })
        .collect();

    placed.sort_unstable_by_key(|p| (p.offset, p.index));
    placed
}

/// Prefix a read with `column` spaces.
#[inline]
fn pad_read(read: &str, column: usize) -> String {
    let mut padded = String::with_capacity(column + read.len());
    padded.extend(std::iter::repeat_n(' ', column));
    padded.push_str(read);
    padded
}

/// Counters collected during a render.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PileupStats {
    pub reads_total: usize,
    pub reads_unaligned: usize,
    pub reads_rendered: usize,
    /// Aligned reads starting beyond the last segment window.
    pub reads_past_last_window: usize,
    pub segments: usize,
    pub max_lanes: usize,
}

impl std::fmt::Display for PileupStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reads: {}, Unaligned: {}, Rendered: {}, Past last window: {}, Segments: {}, Max lanes: {}",
            self.reads_total,
            self.reads_unaligned,
            self.reads_rendered,
            self.reads_past_last_window,
            self.segments,
            self.max_lanes
        )
    }
}

/// Renders reads stacked under a reference.
#[derive(Debug, Clone, Default)]
pub struct PileupRenderer {
    config: PileupConfig,
}

impl PileupRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PileupConfig) -> Self {
        Self { config }
    }

    pub fn with_line_width(line_width: usize) -> Self {
        Self::with_config(PileupConfig::new().with_line_width(line_width))
    }

    pub fn config(&self) -> &PileupConfig {
        &self.config
    }

    /// Render the pileup and return it as a string.
    ///
    /// `reads[i]` starts at reference offset `offsets[i]`; `-1` marks an
    /// unaligned read, which is left out.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the slices differ in length, the line width is zero,
    /// an offset is below `-1`, or an aligned read or the reference contains
    /// non-ASCII text.
    ///
    /// # Example
    ///
    /// ```
    /// use pileview::PileupRenderer;
    ///
    /// let out = PileupRenderer::with_line_width(4)
    ///     .render(&["CGT"], &[1], "ACGT")
    ///     .unwrap();
    /// assert!(out.contains("Ref:  ACGT\nRead:  CGT\n"));
    /// ```
    pub fn render<S: AsRef<str>>(
        &self,
        reads: &[S],
        offsets: &[i64],
        reference: &str,
    ) -> Result<String> {
        let mut out = Vec::new();
        self.render_to(reads, offsets, reference, &mut out)?;
        String::from_utf8(out)
            .map_err(|e| PileupError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Render the pileup into a writer.
    ///
    /// All input checks run before the first byte is written.
    pub fn render_to<S: AsRef<str>, W: Write>(
        &self,
        reads: &[S],
        offsets: &[i64],
        reference: &str,
        output: &mut W,
    ) -> Result<PileupStats> {
        self.config.validate()?;
        validate_inputs(reads, offsets, reference)?;

        let width = self.config.line_width;
        let placed = select_aligned(reads, offsets);

        let mut stats = PileupStats {
            reads_total: reads.len(),
            reads_unaligned: reads.len() - placed.len(),
            ..Default::default()
        };

        let mut writer = PileupWriter::new(output, &self.config);
        writer.write_leading_divider()?;

        let mut lanes = LaneRegistry::new();
        let mut next = 0;

        for segment in segments(reference, width) {
            let window_end = segment.start + width;
            let first_new = next;

            while next < placed.len() && placed[next].offset < window_end {
                let read = &placed[next];
                lanes = lanes.assign(pad_read(read.read, read.offset % width));
                next += 1;
            }

            let (emitted, rows) = lanes.emit(width);
            lanes = emitted.collect_garbage();

            log::debug!(
                "Segment {}: {} new reads, {} rows, {} lanes carried",
                segment.start,
                next - first_new,
                rows.len(),
                lanes.len()
            );

            writer.write_block(segment.start, segment.bases, &rows)?;
            stats.segments += 1;
        }

        writer.finish()?;

        stats.reads_rendered = next;
        stats.reads_past_last_window = placed.len() - next;
        stats.max_lanes = lanes.max_lanes();

        if stats.reads_past_last_window > 0 {
            log::warn!(
                "{} aligned reads start beyond the last segment window (ends at {}) and were not rendered",
                stats.reads_past_last_window,
                stats.segments * width
            );
        }

        Ok(stats)
    }
}

fn validate_inputs<S: AsRef<str>>(reads: &[S], offsets: &[i64], reference: &str) -> Result<()> {
    if reads.len() != offsets.len() {
        return Err(PileupError::invalid(format!(
            "{} reads but {} offsets",
            reads.len(),
            offsets.len()
        )));
    }

    for (i, (read, &offset)) in reads.iter().zip(offsets).enumerate() {
        if offset < UNALIGNED {
            return Err(PileupError::invalid(format!(
                "offset {} of read {} is below -1",
                offset, i
            )));
        }
        if offset != UNALIGNED && !read.as_ref().is_ascii() {
            return Err(PileupError::invalid(format!(
                "read {} contains non-ASCII characters",
                i
            )));
        }
    }

    if !reference.is_ascii() {
        return Err(PileupError::invalid(
            "reference contains non-ASCII characters",
        ));
    }

    Ok(())
}

/// Render a pileup with the given line width.
///
/// Shorthand for `PileupRenderer::with_line_width(line_width).render(..)`.
pub fn render<S: AsRef<str>>(
    reads: &[S],
    offsets: &[i64],
    reference: &str,
    line_width: usize,
) -> Result<String> {
    PileupRenderer::with_line_width(line_width).render(reads, offsets, reference)
}
