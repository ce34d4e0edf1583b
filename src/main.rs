//! pileview: render short reads stacked against a reference.
//!
//! Usage: pileview <COMMAND> [OPTIONS]

use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;

use pileview::commands::{SimulateCommand, SimulateConfig, ViewCommand};
use pileview::config::DEFAULT_LINE_WIDTH;
use pileview::error::PileupError;
use pileview::orient::Orientation;

#[derive(Parser)]
#[command(name = "pileview")]
#[command(version)]
#[command(about = "Pileup viewer: stack aligned reads under a reference to spot mismatches by eye", long_about = None)]
struct Cli {
    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a pileup of read pairs against a reference
    View {
        /// Read file (header line, then one `left,right` pair per line)
        #[arg(short, long)]
        reads: PathBuf,

        /// Reference file (header line, then sequence lines)
        #[arg(short = 'f', long)]
        reference: PathBuf,

        /// Alignment file (one `left,right` offset pair per read pair, -1 = unaligned)
        #[arg(short, long)]
        alignments: PathBuf,

        /// Reference bases per printed line
        #[arg(short = 'w', long, default_value_t = DEFAULT_LINE_WIDTH)]
        line_width: usize,

        /// Reverse complement right mates before rendering
        #[arg(long)]
        reverse_right: bool,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print render statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Generate a synthetic reference, read pairs and alignments
    Simulate {
        /// Output directory
        #[arg(short, long, default_value = "./pileview_sim")]
        output: PathBuf,

        /// Reference length in bases
        #[arg(long, default_value = "1000")]
        length: usize,

        /// Number of read pairs
        #[arg(long, default_value = "50")]
        pairs: usize,

        /// Length of each mate
        #[arg(long, default_value = "50")]
        read_length: usize,

        /// Fragment length spanned by a pair
        #[arg(long, default_value = "200")]
        insert_size: usize,

        /// Per-base substitution probability
        #[arg(long, default_value = "0.01")]
        mismatch_rate: f64,

        /// Fraction of pairs written as unaligned
        #[arg(long, default_value = "0.05")]
        unaligned_fraction: f64,

        /// Chromosome label written in file headers
        #[arg(long, default_value = "chr1")]
        chrom: String,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let result = match cli.command {
        Commands::View {
            reads,
            reference,
            alignments,
            line_width,
            reverse_right,
            output,
            stats,
        } => run_view(
            reads,
            reference,
            alignments,
            line_width,
            reverse_right,
            output,
            stats,
        ),

        Commands::Simulate {
            output,
            length,
            pairs,
            read_length,
            insert_size,
            mismatch_rate,
            unaligned_fraction,
            chrom,
            seed,
            force,
        } => run_simulate(SimulateConfig {
            output_dir: output,
            length,
            pairs,
            read_length,
            insert_size,
            mismatch_rate,
            unaligned_fraction,
            chrom,
            seed,
            force,
        }),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_view(
    reads: PathBuf,
    reference: PathBuf,
    alignments: PathBuf,
    line_width: usize,
    reverse_right: bool,
    output: Option<PathBuf>,
    stats: bool,
) -> Result<(), PileupError> {
    let cmd = ViewCommand {
        line_width,
        right_orientation: if reverse_right {
            Orientation::ReverseComplement
        } else {
            Orientation::Forward
        },
    };

    // Bad settings must not leave an empty output file behind.
    cmd.validate()?;

    let result = match output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            let rendered = cmd.run(&reads, &reference, &alignments, &mut writer)?;
            writer.flush()?;
            rendered
        }
        None => cmd.run_stdout(&reads, &reference, &alignments)?,
    };

    if stats {
        eprintln!("Pileup stats: {}", result);
    }

    Ok(())
}

fn run_simulate(config: SimulateConfig) -> Result<(), PileupError> {
    let output_dir = config.output_dir.clone();
    let stats = SimulateCommand::new(config).run()?;
    eprintln!("Simulated {} in {}", stats, output_dir.display());
    Ok(())
}
