//! Reference sequence file parser.
//!
//! Format: the first line is a chromosome label; all following lines are
//! stripped and concatenated, in file order, into one sequence.

use crate::error::{open_source, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A linear reference sequence addressed by 0-based offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// Chromosome label from the header line (leading `>` removed).
    pub name: String,
    /// Concatenated bases.
    pub sequence: String,
}

impl Reference {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
        }
    }

    /// Load a reference from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reference = Self::from_reader(open_source(path)?)?;
        log::info!(
            "Loaded reference '{}' ({} bp) from {}",
            reference.name,
            reference.len(),
            path.display()
        );
        Ok(reference)
    }

    /// Parse a reference from any readable source.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = BufReader::new(reader);
        let mut name = String::new();
        let mut sequence = String::new();

        for (line_num, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let line = line.trim();

            if line_num == 0 {
                name = line.trim_start_matches('>').to_string();
                continue;
            }
            sequence.push_str(line);
        }

        Ok(Self { name, sequence })
    }

    /// Number of bases.
    #[inline]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.sequence
    }
}

/// Read the reference sequence from a file.
pub fn read_reference<P: AsRef<Path>>(path: P) -> Result<Reference> {
    Reference::from_file(path)
}

/// Parse a reference from a string (useful for testing).
pub fn parse_reference(content: &str) -> Result<Reference> {
    Reference::from_reader(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PileupError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_lines_concatenated() {
        let reference = parse_reference(">chr1\nACGT\nTTGG\nCA\n").unwrap();

        assert_eq!(reference.name, "chr1");
        assert_eq!(reference.as_str(), "ACGTTTGGCA");
        assert_eq!(reference.len(), 10);
    }

    #[test]
    fn test_line_terminators_stripped() {
        let reference = parse_reference("chr2\r\nAC\r\nGT").unwrap();
        assert_eq!(reference.as_str(), "ACGT");
    }

    #[test]
    fn test_header_only_is_empty() {
        let reference = parse_reference(">chr1\n").unwrap();
        assert!(reference.is_empty());
    }

    #[test]
    fn test_reference_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">chr_x").unwrap();
        writeln!(file, "AAAAACCCCC").unwrap();
        writeln!(file, "GGGGG").unwrap();
        file.flush().unwrap();

        let reference = read_reference(file.path()).unwrap();
        assert_eq!(reference.name, "chr_x");
        assert_eq!(reference.len(), 15);
    }

    #[test]
    fn test_missing_reference() {
        let err = read_reference("/no/reference/here.txt").unwrap_err();
        assert!(matches!(err, PileupError::SourceUnavailable { .. }));
    }
}
