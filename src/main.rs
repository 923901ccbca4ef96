//! covruns: report regions covered at a minimum depth.
//!
//! Usage: covruns -c <COVERAGE> [-d <MIN_DEPTH>] [-l <MIN_LENGTH>] [-o <OUTPUT>]

use clap::Parser;
use env_logger::Env;
use log::debug;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use covruns::commands::{CoveredRegionsCommand, ScanStats};
use covruns::config::{DEFAULT_MIN_DEPTH, DEFAULT_MIN_LENGTH};
use covruns::coverage::CoverageError;

#[derive(Parser)]
#[command(name = "covruns")]
#[command(author = "Manish Kumar Bobbili")]
#[command(version)]
#[command(about = "Report genomic regions covered at a minimum depth over a minimum length", long_about = None)]
struct Cli {
    /// Per-base depth table: chrom, position, depth (use - for stdin)
    #[arg(short = 'c', long)]
    coverage: PathBuf,

    /// Minimum depth for a position to count as covered
    #[arg(short = 'd', long, default_value_t = DEFAULT_MIN_DEPTH)]
    min_depth: u64,

    /// Minimum number of consecutive covered positions to report
    #[arg(short = 'l', long, default_value_t = DEFAULT_MIN_LENGTH)]
    min_length: u64,

    /// Output BED file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Number of threads (accepted for compatibility; the scan is sequential)
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Print scan statistics to stderr
    #[arg(long)]
    stats: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(n) = cli.threads {
        debug!("Ignoring --threads {}: scanning is single-threaded", n);
    }

    match run_covered(&cli) {
        Ok(stats) => {
            if cli.stats {
                eprintln!("Scan stats: {}", stats);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_covered(cli: &Cli) -> Result<ScanStats, CoverageError> {
    let cmd = CoveredRegionsCommand::new()
        .with_min_depth(cli.min_depth)
        .with_min_length(cli.min_length);

    match cli.output {
        Some(ref path) => {
            let mut file = File::create(path)?;
            run_input(&cmd, &cli.coverage, &mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            run_input(&cmd, &cli.coverage, &mut handle)
        }
    }
}

fn run_input<W: Write>(
    cmd: &CoveredRegionsCommand,
    input: &Path,
    output: &mut W,
) -> Result<ScanStats, CoverageError> {
    if input.to_string_lossy() == "-" {
        cmd.run_stdin(output)
    } else {
        cmd.run(input, output)
    }
}
