//! Read orientation and flattening of read pairs into renderer input.

use crate::alignments::PairAlignment;
use crate::error::{PileupError, Result};
use crate::reads::ReadPair;

/// How a mate's bases relate to the reference forward strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Already reads along the forward strand.
    #[default]
    Forward,
    /// Sequenced from the opposite strand; must be reverse complemented.
    ReverseComplement,
}

impl Orientation {
    /// Bring a read into forward-strand orientation.
    pub fn apply(&self, read: &str) -> String {
        match self {
            Self::Forward => read.to_string(),
            Self::ReverseComplement => reverse_complement(read),
        }
    }
}

/// Reverse complement a base string, preserving case.
///
/// A<->T, C<->G; `N` and any other symbol are kept as-is.
///
/// ```
/// use pileview::orient::reverse_complement;
///
/// assert_eq!(reverse_complement("AACG"), "CGTT");
/// assert_eq!(reverse_complement("acgN"), "Ncgt");
/// ```
#[must_use]
pub fn reverse_complement(read: &str) -> String {
    read.chars()
        .rev()
        .map(|c| match c {
            'A' => 'T',
            'T' => 'A',
            'C' => 'G',
            'G' => 'C',
            'a' => 't',
            't' => 'a',
            'c' => 'g',
            'g' => 'c',
            _ => c,
        })
        .collect()
}

/// Flatten read pairs and their offsets into the parallel vectors the
/// renderer takes: for each pair, the left mate then the right mate.
///
/// Left mates are used as-is; right mates go through `right_orientation`.
pub fn orient_pairs(
    pairs: &[ReadPair],
    alignments: &[PairAlignment],
    right_orientation: Orientation,
) -> Result<(Vec<String>, Vec<i64>)> {
    if pairs.len() != alignments.len() {
        return Err(PileupError::invalid(format!(
            "{} read pairs but {} alignments",
            pairs.len(),
            alignments.len()
        )));
    }

    let mut reads = Vec::with_capacity(pairs.len() * 2);
    let mut offsets = Vec::with_capacity(pairs.len() * 2);

    for (pair, alignment) in pairs.iter().zip(alignments) {
        reads.push(pair.left.clone());
        offsets.push(alignment.left);
        reads.push(right_orientation.apply(&pair.right));
        offsets.push(alignment.right);
    }

    Ok((reads, offsets))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement_palindrome() {
        assert_eq!(reverse_complement("ACGT"), "ACGT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_orient_pairs_interleaves_mates() {
        let pairs = vec![ReadPair::new("AAC", "GTT"), ReadPair::new("CCA", "TGA")];
        let alignments = vec![PairAlignment::new(0, 10), PairAlignment::new(-1, 20)];

        let (reads, offsets) = orient_pairs(&pairs, &alignments, Orientation::Forward).unwrap();

        assert_eq!(reads, vec!["AAC", "GTT", "CCA", "TGA"]);
        assert_eq!(offsets, vec![0, 10, -1, 20]);
    }

    #[test]
    fn test_orient_pairs_reverse_right() {
        let pairs = vec![ReadPair::new("AAC", "GTT")];
        let alignments = vec![PairAlignment::new(0, 10)];

        let (reads, _) =
            orient_pairs(&pairs, &alignments, Orientation::ReverseComplement).unwrap();

        assert_eq!(reads, vec!["AAC", "AAC"]);
    }

    #[test]
    fn test_orient_pairs_length_mismatch() {
        let pairs = vec![ReadPair::new("A", "C")];
        let err = orient_pairs(&pairs, &[], Orientation::Forward).unwrap_err();
        assert!(matches!(err, PileupError::InvalidInput(_)));
    }
}
