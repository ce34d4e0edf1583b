//! Streaming paired-end read file parser.
//!
//! Format: the first line names the chromosome the reads came from and is
//! skipped. Every following line holds one read pair as `left,right`, split
//! at the first comma.

use crate::error::{open_source, PileupError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// One paired-end read as it appears in the read file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPair {
    pub left: String,
    pub right: String,
}

impl ReadPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

/// A streaming reader over read pairs.
pub struct ReadReader<R: Read> {
    reader: BufReader<R>,
    line_number: usize,
    buffer: String,
    header: Option<String>,
}

impl ReadReader<File> {
    /// Open a read file from a path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = open_source(path.as_ref())?;
        Ok(Self::new(file))
    }
}

impl<R: Read> ReadReader<R> {
    /// Create a new read reader from any readable source.
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            line_number: 0,
            buffer: String::with_capacity(512),
            header: None,
        }
    }

    /// The chromosome label from the header line, once it has been read.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Read the next pair, skipping the header and blank lines.
    pub fn read_pair(&mut self) -> Result<Option<ReadPair>> {
        loop {
            self.buffer.clear();
            let bytes_read = self.reader.read_line(&mut self.buffer)?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim();
            if self.line_number == 1 {
                self.header = Some(line.trim_start_matches('>').to_string());
                continue;
            }
            if line.is_empty() {
                continue;
            }

            return self.parse_line(line).map(Some);
        }
    }

    /// Split one `left,right` line at its first comma.
    fn parse_line(&self, line: &str) -> Result<ReadPair> {
        let comma = memchr::memchr(b',', line.as_bytes()).ok_or_else(|| PileupError::Parse {
            line: self.line_number,
            message: "Expected two comma-separated reads, found no comma".to_string(),
        })?;

        Ok(ReadPair::new(
            line[..comma].trim(),
            line[comma + 1..].trim(),
        ))
    }

    /// Get an iterator over all pairs.
    pub fn pairs(self) -> ReadPairIter<R> {
        ReadPairIter { reader: self }
    }
}

/// Iterator over read pairs.
pub struct ReadPairIter<R: Read> {
    reader: ReadReader<R>,
}

impl<R: Read> Iterator for ReadPairIter<R> {
    type Item = Result<ReadPair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_pair().transpose()
    }
}

/// Read all pairs from a read file, preserving file order.
pub fn read_pairs<P: AsRef<Path>>(path: P) -> Result<Vec<ReadPair>> {
    let path = path.as_ref();
    let pairs: Vec<ReadPair> = ReadReader::from_path(path)?.pairs().collect::<Result<_>>()?;
    log::info!("Loaded {} read pairs from {}", pairs.len(), path.display());
    Ok(pairs)
}

/// Parse pairs from a string (useful for testing).
pub fn parse_pairs(content: &str) -> Result<Vec<ReadPair>> {
    ReadReader::new(content.as_bytes()).pairs().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_header_skipped() {
        let content = ">chr_test\nACGT,TTGA\nGGCC,AATT\n";
        let pairs = parse_pairs(content).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ReadPair::new("ACGT", "TTGA"));
        assert_eq!(pairs[1], ReadPair::new("GGCC", "AATT"));
    }

    #[test]
    fn test_header_label_kept() {
        let mut reader = ReadReader::new(">chr_test\nAC,GT\n".as_bytes());
        assert!(reader.read_pair().unwrap().is_some());
        assert_eq!(reader.header(), Some("chr_test"));
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let content = "chr1\r\nAC,GT\r\n\r\nTT,AA\r\n";
        let pairs = parse_pairs(content).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], ReadPair::new("TT", "AA"));
    }

    #[test]
    fn test_header_only() {
        assert!(parse_pairs(">chr1\n").unwrap().is_empty());
        assert!(parse_pairs("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_comma() {
        let err = parse_pairs("chr1\nACGT,TT\nACGT\n").unwrap_err();
        match err {
            PileupError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_split_at_first_comma() {
        let pairs = parse_pairs("chr1\nA,C,G\nAC, GT,\n").unwrap();
        assert_eq!(
            pairs,
            vec![ReadPair::new("A", "C,G"), ReadPair::new("AC", "GT,")]
        );
    }

    #[test]
    fn test_read_pairs_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, ">chr1").unwrap();
        writeln!(file, "AAAA,CCCC").unwrap();
        file.flush().unwrap();

        let pairs = read_pairs(file.path()).unwrap();
        assert_eq!(pairs, vec![ReadPair::new("AAAA", "CCCC")]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_pairs("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, PileupError::SourceUnavailable { .. }));
    }
}
