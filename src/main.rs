use anyhow::Result;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use std::path::PathBuf;

use samconfusion::config::{RunConfig, WeightMode};
use samconfusion::pipeline;

/// samconfusion - Confusion matrix from pivot-vs-dataset SAM alignments
///
/// Reads `pivot_{i}_align_dataset_{j}.sam` for every pair of datasets, splits
/// each read's weight evenly over the datasets it aligned to, and writes
/// confusion_matrix.csv and accuracy_values.csv to the output directory.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of datasets in this experiment
    #[clap(short = 'n', long = "num")]
    num_datasets: usize,

    /// Directory with the SAM files to be analyzed
    #[clap(short = 's', long = "sam-dir", alias = "sam_file")]
    sam_dir: PathBuf,

    /// Directory for the output matrix and accuracies
    #[clap(short = 'o', long = "output-path", alias = "output_path")]
    output_dir: PathBuf,

    /// SAM records are half-MEMs (every read weighs 1)
    #[clap(long = "half-mems", alias = "half_mems")]
    half_mems: bool,

    /// SAM records are MEMs (reads weigh their length minus noise)
    #[clap(long = "mems")]
    mems: bool,

    /// Minimum ground-truth read length to keep a record
    #[clap(short = 't', long = "threshold", default_value = "0", allow_hyphen_values = true)]
    threshold: i64,

    /// File whose first line is the total reference length (required)
    #[clap(short = 'l', long = "length-text")]
    length_text: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[clap(short = 'q', long = "quiet", conflicts_with = "verbose")]
    quiet: bool,
}

fn init_logger(args: &Args) {
    let level = if args.quiet {
        LevelFilter::Error
    } else {
        match args.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(&args);

    let mode = WeightMode::from_flags(args.mems, args.half_mems)?;
    let mut config = RunConfig::new(args.num_datasets, &args.sam_dir, &args.output_dir, mode)
        .with_threshold(args.threshold);
    if let Some(path) = &args.length_text {
        config = config.with_reference_length_file(path);
    }
    config.validate()?;

    pipeline::run(&config)?;
    Ok(())
}
