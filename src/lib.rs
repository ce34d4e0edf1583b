//! pileview: pileup viewer for short reads.
//!
//! Renders reads stacked under a linear reference at their (precomputed)
//! alignment offsets, so mismatches against the reference can be spotted
//! by eye. No alignment or variant calling happens here.
//!
//! # Example
//!
//! ```rust,no_run
//! use pileview::{alignments, orient, reads, reference, PileupRenderer};
//!
//! let pairs = reads::read_pairs("reads.txt").unwrap();
//! let reference = reference::read_reference("reference.txt").unwrap();
//! let alignments = alignments::read_alignments("alignments.txt").unwrap();
//!
//! let (reads, offsets) =
//!     orient::orient_pairs(&pairs, &alignments, orient::Orientation::Forward).unwrap();
//!
//! let pileup = PileupRenderer::new()
//!     .render(&reads, &offsets, reference.as_str())
//!     .unwrap();
//! print!("{}", pileup);
//! ```

pub mod alignments;
pub mod commands;
pub mod config;
pub mod error;
pub mod orient;
pub mod pileup;
pub mod reads;
pub mod reference;

// Re-export commonly used types
pub use error::{PileupError, Result};
pub use pileup::{render, PileupRenderer, PileupStats};
pub use reads::{read_pairs, ReadPair};
pub use reference::{read_reference, Reference};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::alignments::{read_alignments, PairAlignment};
    pub use crate::commands::{SimulateCommand, ViewCommand};
    pub use crate::config::PileupConfig;
    pub use crate::orient::{orient_pairs, Orientation};
    pub use crate::pileup::{render, PileupRenderer, PileupStats};
    pub use crate::reads::{read_pairs, ReadPair};
    pub use crate::reference::{read_reference, Reference};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_load_and_render_workflow() {
        use crate::alignments::parse_alignments;
        use crate::orient::{orient_pairs, Orientation};
        use crate::pileup::PileupRenderer;
        use crate::reads::parse_pairs;
        use crate::reference::parse_reference;

        let pairs = parse_pairs(">chr1\nACG,GTA\n").unwrap();
        let reference = parse_reference(">chr1\nACGTACGTAC\n").unwrap();
        let alignments = parse_alignments("0,4\n").unwrap();

        let (reads, offsets) = orient_pairs(&pairs, &alignments, Orientation::Forward).unwrap();
        let out = PileupRenderer::with_line_width(5)
            .render(&reads, &offsets, reference.as_str())
            .unwrap();

        assert!(out.contains("Ref:  ACGTA\nRead: ACG\nRead:     G\n"));
        assert!(out.contains("Ref:  CGTAC\nRead: \nRead: TA\n"));
    }
}
