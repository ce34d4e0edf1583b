//! Simulate command implementation.
//!
//! Writes a random reference, paired-end reads sampled from it (with
//! substitution errors) and the true alignment offsets, in the formats the
//! `view` command reads. Output is deterministic for a given seed.
//!
//! Files written to the output directory:
//! - `reference.txt`: `>chrom` header, then the sequence in 60-base lines
//! - `reads.txt`: `>chrom` header, then one `left,right` pair per line
//! - `alignments.txt`: one `left,right` offset pair per line (`-1,-1` for
//!   pairs marked unaligned)
//!
//! Right mates are written reverse complemented, as a sequencer reports
//! them; `view --reverse-right` brings them back to the forward strand.

use crate::error::{PileupError, Result};
use crate::orient::reverse_complement;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const BASES: [u8; 4] = [b'A', b'C', b'G', b'T'];

/// Bases per line in the written reference file.
const REFERENCE_LINE_WIDTH: usize = 60;

pub const REFERENCE_FILE: &str = "reference.txt";
pub const READS_FILE: &str = "reads.txt";
pub const ALIGNMENTS_FILE: &str = "alignments.txt";

/// Configuration for the simulate command.
#[derive(Debug, Clone)]
pub struct SimulateConfig {
    pub output_dir: PathBuf,
    /// Reference length in bases.
    pub length: usize,
    /// Number of read pairs.
    pub pairs: usize,
    /// Length of each mate.
    pub read_length: usize,
    /// Fragment length, from the first base of the left mate to the last
    /// base of the right mate.
    pub insert_size: usize,
    /// Per-base substitution probability.
    pub mismatch_rate: f64,
    /// Fraction of pairs written with `-1,-1` offsets.
    pub unaligned_fraction: f64,
    pub chrom: String,
    pub seed: u64,
    pub force: bool,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./pileview_sim"),
            length: 1_000,
            pairs: 50,
            read_length: 50,
            insert_size: 200,
            mismatch_rate: 0.01,
            unaligned_fraction: 0.05,
            chrom: "chr1".to_string(),
            seed: 42,
            force: false,
        }
    }
}

impl SimulateConfig {
    /// Check that reads can be sampled from the reference.
    pub fn validate(&self) -> Result<()> {
        if self.read_length == 0 {
            return Err(PileupError::invalid("read length must be positive"));
        }
        if self.insert_size < self.read_length {
            return Err(PileupError::invalid(format!(
                "insert size ({}) is shorter than read length ({})",
                self.insert_size, self.read_length
            )));
        }
        if self.length < self.insert_size {
            return Err(PileupError::invalid(format!(
                "reference length ({}) is shorter than insert size ({})",
                self.length, self.insert_size
            )));
        }
        for (name, rate) in [
            ("mismatch rate", self.mismatch_rate),
            ("unaligned fraction", self.unaligned_fraction),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(PileupError::invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, rate
                )));
            }
        }
        Ok(())
    }
}

/// Statistics from a simulate run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimulateStats {
    pub reference_length: usize,
    pub pairs: usize,
    pub unaligned_pairs: usize,
    pub mismatches: usize,
}

impl std::fmt::Display for SimulateStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reference: {} bp, Pairs: {}, Unaligned pairs: {}, Mismatches: {}",
            self.reference_length, self.pairs, self.unaligned_pairs, self.mismatches
        )
    }
}

/// One simulated pair with the offsets it was sampled from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedPair {
    pub left: String,
    /// Right mate, reverse complemented.
    pub right: String,
    pub left_offset: i64,
    pub right_offset: i64,
}

/// In-memory result of a simulation.
#[derive(Debug, Clone, Default)]
pub struct SimulatedData {
    pub reference: String,
    pub pairs: Vec<SimulatedPair>,
    pub stats: SimulateStats,
}

/// Simulate command.
pub struct SimulateCommand {
    config: SimulateConfig,
}

impl SimulateCommand {
    pub fn new(config: SimulateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulateConfig {
        &self.config
    }

    /// Generate the data set and write it to the output directory.
    pub fn run(&self) -> Result<SimulateStats> {
        self.config.validate()?;

        let dir = &self.config.output_dir;
        let paths = [
            dir.join(REFERENCE_FILE),
            dir.join(READS_FILE),
            dir.join(ALIGNMENTS_FILE),
        ];

        if !self.config.force {
            if let Some(existing) = paths.iter().find(|p| p.exists()) {
                return Err(PileupError::invalid(format!(
                    "{} already exists, use --force to overwrite",
                    existing.display()
                )));
            }
        }

        fs::create_dir_all(dir)?;

        let data = self.generate()?;
        self.write_reference(&paths[0], &data.reference)?;
        self.write_reads(&paths[1], &data.pairs)?;
        self.write_alignments(&paths[2], &data.pairs)?;

        log::info!("Wrote simulated data to {}", dir.display());
        Ok(data.stats)
    }

    /// Generate the reference and pairs without touching the filesystem.
    pub fn generate(&self) -> Result<SimulatedData> {
        self.config.validate()?;

        let config = &self.config;
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut stats = SimulateStats {
            reference_length: config.length,
            ..Default::default()
        };

        let reference: Vec<u8> = (0..config.length)
            .map(|_| BASES[rng.gen_range(0..BASES.len())])
            .collect();

        let last_start = config.length - config.insert_size;
        let right_gap = config.insert_size - config.read_length;
        let mut pairs = Vec::with_capacity(config.pairs);

        for _ in 0..config.pairs {
            let start = rng.gen_range(0..=last_start);
            let right_start = start + right_gap;

            let left = mutate(
                &reference[start..start + config.read_length],
                config.mismatch_rate,
                &mut rng,
                &mut stats.mismatches,
            );
            let right = mutate(
                &reference[right_start..right_start + config.read_length],
                config.mismatch_rate,
                &mut rng,
                &mut stats.mismatches,
            );

            let (left_offset, right_offset) = if rng.gen_bool(config.unaligned_fraction) {
                stats.unaligned_pairs += 1;
                (-1, -1)
            } else {
                (start as i64, right_start as i64)
            };

            pairs.push(SimulatedPair {
                left,
                right: reverse_complement(&right),
                left_offset,
                right_offset,
            });
        }

        stats.pairs = pairs.len();

        // Only ACGT bytes were produced.
        let reference = String::from_utf8(reference)
            .map_err(|e| PileupError::invalid(format!("generated reference: {}", e)))?;

        Ok(SimulatedData {
            reference,
            pairs,
            stats,
        })
    }

    fn write_reference(&self, path: &Path, reference: &str) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, ">{}", self.config.chrom)?;
        for line in reference.as_bytes().chunks(REFERENCE_LINE_WIDTH) {
            writer.write_all(line)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_reads(&self, path: &Path, pairs: &[SimulatedPair]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, ">{}", self.config.chrom)?;
        for pair in pairs {
            writeln!(writer, "{},{}", pair.left, pair.right)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_alignments(&self, path: &Path, pairs: &[SimulatedPair]) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        let mut itoa_buf = itoa::Buffer::new();
        for pair in pairs {
            writer.write_all(itoa_buf.format(pair.left_offset).as_bytes())?;
            writer.write_all(b",")?;
            writer.write_all(itoa_buf.format(pair.right_offset).as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Copy `bases`, substituting each base with probability `rate`.
fn mutate(bases: &[u8], rate: f64, rng: &mut SmallRng, mismatches: &mut usize) -> String {
    bases
        .iter()
        .map(|&base| {
            if rate > 0.0 && rng.gen_bool(rate) {
                *mismatches += 1;
                substitute(base, rng)
            } else {
                base
            }
        })
        .map(char::from)
        .collect()
}

/// Pick a base different from `base`.
fn substitute(base: u8, rng: &mut SmallRng) -> u8 {
    let last = BASES.len() - 1;
    let choice = BASES[rng.gen_range(0..last)];
    // The last base stands in for whichever one matched.
    if choice == base {
        BASES[last]
    } else {
        choice
    }
}
