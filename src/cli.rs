use crate::config::{ChecksumType, Mode, RleConfig};
use crate::error::RleError;
use crate::pipeline::{self, Report};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = "Byte-oriented run-length encoding (RLE) file codec")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses a file
    Compress {
        /// Input file to compress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Decode the output afterwards and check it matches the input
        #[arg(long)]
        verify: bool,

        /// Digest used by --verify [crc32, sha256]
        #[arg(long, default_value = "crc32")]
        checksum: ChecksumType,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },
    /// Decompresses a file
    Decompress {
        /// Input file to decompress
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Fail on zero-count records or read failures
        #[arg(long)]
        strict: bool,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },
    /// Runs either direction, chosen by name [compress|1, decompress|2]
    Run {
        mode: String,
        input: PathBuf,
        output: PathBuf,
    },
    /// Describes a compressed file without expanding it
    Info {
        /// Compressed file to inspect
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
    },
}

pub fn run() -> Result<(), RleError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compress { input, output, verify, checksum, progress } => {
            println!("Compressing {} to {}...", input.display(), output.display());
            let config = RleConfig::default()
                .with_verify(*verify)
                .with_checksum(*checksum)
                .with_progress(*progress);
            let report = pipeline::run(Mode::Compress, input, output, &config)?;
            print_report(&report);
        }
        Commands::Decompress { input, output, strict, progress } => {
            println!("Decompressing {} to {}...", input.display(), output.display());
            let config = RleConfig::default()
                .with_strict(*strict)
                .with_progress(*progress);
            let report = pipeline::run(Mode::Decompress, input, output, &config)?;
            print_report(&report);
        }
        Commands::Run { mode, input, output } => {
            let report = pipeline::run_named(mode, input, output, &RleConfig::default())?;
            println!("Ran {} on {} -> {}", report.mode(), input.display(), output.display());
            print_report(&report);
        }
        Commands::Info { input } => print_info(input)?,
    }

    Ok(())
}

fn print_report(report: &Report) {
    match report {
        Report::Compressed(stats) => {
            println!("{}", report.message());
            if stats.original_size > 0 {
                println!("  Original Size:    {} bytes", stats.original_size);
                println!("  Compressed Size:  {} bytes", stats.compressed_size);
                println!("  Runs:             {} ({} at the 255 cap)", stats.runs, stats.capped_runs);
                println!("  Ratio:            {:.2}x", stats.ratio);
            }
            if let Some(checksum) = &stats.checksum {
                println!("  Verified:         {}", checksum);
            }
            println!("  Elapsed Time:     {:.2?}", stats.processing_time);
        }
        Report::Decompressed(stats) => {
            for warning in &stats.decode.warnings {
                eprintln!("Warning: {}", warning);
            }
            if report.is_success() {
                println!("{}", report.message());
            } else {
                eprintln!("Warning: {}", report.message());
            }
            println!("  Compressed Size:  {} bytes", stats.compressed_size);
            println!("  Restored Size:    {} bytes", stats.decompressed_size);
            let anomalies = stats.decode.anomalies();
            if !anomalies.is_empty() {
                println!("  Anomalies:        {:?}", anomalies);
            }
            println!("  Elapsed Time:     {:.2?}", stats.processing_time);
        }
    }
}

fn print_info(input: &Path) -> Result<(), RleError> {
    let file = File::open(input).map_err(|source| RleError::OpenInput { path: input.to_path_buf(), source })?;
    let info = pipeline::info(&mut BufReader::new(file))?;

    println!("{}", input.display());
    println!("  Compressed Size:  {} bytes", info.compressed_size);
    println!("  Original Size:    {} bytes", info.original_size);
    println!("  Records:          {}", info.pairs);
    println!("  Ratio:            {:.2}x", info.ratio);
    println!("  Zero-count:       {}", info.zero_count_pairs);
    println!("  Mergeable:        {}", info.mergeable_pairs);
    println!("  Underfilled:      {}", info.underfilled_pairs);
    match info.trailing_byte {
        Some(byte) => println!("  Trailing Byte:    0x{:02X}", byte),
        None => println!("  Trailing Byte:    none"),
    }
    println!("  Canonical:        {}", if info.is_canonical() { "yes" } else { "no" });
    Ok(())
}
