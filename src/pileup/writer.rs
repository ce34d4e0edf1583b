//! Pileup text output.
//!
//! Uses itoa for the segment index so block headers are written without
//! an intermediate allocation.

use crate::config::PileupConfig;
use crate::error::Result;
use std::io::{BufWriter, Write};

/// Label in front of the reference row.
pub const REF_LABEL: &str = "Ref:  ";

/// Label in front of every lane row.
pub const READ_LABEL: &str = "Read: ";

/// Prefix of the block header line.
pub const INDEX_LABEL: &str = "Reference index: ";

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Writes pileup blocks in the fixed layout:
///
/// ```text
///
///
/// ----------- (line_width + 6 dashes)
///
/// Reference index: 0
/// Ref:  ACGTA
/// Read: ACG
/// Read:     G
///
/// -----------
///
/// ```
pub struct PileupWriter<W: Write> {
    writer: BufWriter<W>,
    itoa_buf: itoa::Buffer,
    divider: Vec<u8>,
}

impl<W: Write> PileupWriter<W> {
    pub fn new(output: W, config: &PileupConfig) -> Self {
        Self {
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, output),
            itoa_buf: itoa::Buffer::new(),
            divider: vec![b'-'; config.divider_width()],
        }
    }

    /// Write the divider that opens the output, padded by blank lines.
    pub fn write_leading_divider(&mut self) -> Result<()> {
        self.writer.write_all(b"\n\n")?;
        self.write_divider_line()
    }

    /// Write one block: header, reference row, lane rows, closing divider.
    pub fn write_block<S: AsRef<str>>(
        &mut self,
        segment_start: usize,
        bases: &str,
        rows: &[S],
    ) -> Result<()> {
        self.writer.write_all(INDEX_LABEL.as_bytes())?;
        self.writer
            .write_all(self.itoa_buf.format(segment_start).as_bytes())?;
        self.writer.write_all(b"\n")?;

        self.writer.write_all(REF_LABEL.as_bytes())?;
        self.writer.write_all(bases.as_bytes())?;

        for row in rows {
            self.writer.write_all(b"\n")?;
            self.writer.write_all(READ_LABEL.as_bytes())?;
            self.writer.write_all(row.as_ref().as_bytes())?;
        }

        self.writer.write_all(b"\n\n")?;
        self.write_divider_line()
    }

    /// Divider followed by a blank line.
    fn write_divider_line(&mut self) -> Result<()> {
        self.writer.write_all(&self.divider)?;
        self.writer.write_all(b"\n\n")?;
        Ok(())
    }

    /// Flush buffered output.
    pub fn finish(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
