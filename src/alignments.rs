//! Alignment offset file parser.
//!
//! One line per read pair, in read-file order: `left,right` where each value
//! is the 0-based reference offset of that mate, or `-1` if it did not align.
//! Blank lines and `#` comments are skipped.

use crate::error::{open_source, PileupError, Result};
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Offsets of both mates of one read pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairAlignment {
    pub left: i64,
    pub right: i64,
}

impl PairAlignment {
    pub fn new(left: i64, right: i64) -> Self {
        Self { left, right }
    }
}

/// Parse alignments from any readable source.
pub fn read_alignments_from<R: Read>(reader: R) -> Result<Vec<PairAlignment>> {
    let reader = BufReader::new(reader);
    let mut alignments = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (left, right) = line.split_once(',').ok_or_else(|| PileupError::Parse {
            line: line_num + 1,
            message: "Expected two comma-separated offsets".to_string(),
        })?;

        alignments.push(PairAlignment::new(
            parse_offset(left, line_num + 1)?,
            parse_offset(right, line_num + 1)?,
        ));
    }

    Ok(alignments)
}

fn parse_offset(s: &str, line: usize) -> Result<i64> {
    let s = s.trim();
    s.parse().map_err(|_| PileupError::Parse {
        line,
        message: format!("Invalid offset: '{}'", s),
    })
}

/// Read all alignments from a file.
pub fn read_alignments<P: AsRef<Path>>(path: P) -> Result<Vec<PairAlignment>> {
    let path = path.as_ref();
    let alignments = read_alignments_from(open_source(path)?)?;
    log::info!(
        "Loaded {} pair alignments from {}",
        alignments.len(),
        path.display()
    );
    Ok(alignments)
}

/// Parse alignments from a string (useful for testing).
pub fn parse_alignments(content: &str) -> Result<Vec<PairAlignment>> {
    read_alignments_from(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_of_offsets() {
        let alignments = parse_alignments("0,150\n-1,-1\n\n# skipped\n42, 190\n").unwrap();

        assert_eq!(
            alignments,
            vec![
                PairAlignment::new(0, 150),
                PairAlignment::new(-1, -1),
                PairAlignment::new(42, 190),
            ]
        );
    }

    #[test]
    fn test_invalid_offset() {
        let err = parse_alignments("0,10\nabc,5\n").unwrap_err();
        match err {
            PileupError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("abc"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_column_rejected() {
        assert!(parse_alignments("17\n").is_err());
    }
}
