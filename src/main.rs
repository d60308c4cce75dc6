//! vhsum - print VectorHash checksums
//!
//! Works like the coreutils `*sum` tools: one line per file, `-` or no file
//! at all reads standard input. The digest width comes from `--length`, or
//! from the program name (`vh64sum`, `vh256sum`, ...).

use clap::Parser;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use vectorhash::algorithm::{Capabilities, TierRequest, Width};
use vectorhash::checksum::{ChecksumLine, LineStyle};
use vectorhash::options::{ReadMode, parse_seed, parse_tier, width_from_program_name};
use vectorhash::batch::run_in_order;
use vectorhash::{DEFAULT_SEED, VectorHash, digest_path};

#[derive(Parser)]
#[command(name = "vhsum")]
#[command(author, version)]
#[command(about = "Print VectorHash checksums")]
struct Cli {
    /// Digest width in bits: 32, 64, 128, 256, 512 or 1024
    #[arg(short, long, value_name = "BITS")]
    length: Option<usize>,

    /// Hash seed, decimal or 0x-prefixed hex
    #[arg(long, value_parser = parse_seed, default_value_t = DEFAULT_SEED)]
    seed: u32,

    /// Widest execution tier to use: auto, scalar, sse2, avx2 or avx512
    #[arg(long, value_parser = parse_tier, default_value = "auto")]
    tier: TierRequest,

    /// Create BSD-style output
    #[arg(long)]
    tag: bool,

    /// Read files in binary mode
    #[arg(short, long, conflicts_with = "text")]
    binary: bool,

    /// Read files in text mode
    #[arg(short, long)]
    text: bool,

    /// End each output line with NUL, not newline, and disable file name escaping
    #[arg(short, long)]
    zero: bool,

    /// Number of files hashed in parallel (default: number of CPU cores)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Log configuration and tier decisions to stderr
    #[arg(long)]
    verbose: bool,

    /// Files to hash; `-` is standard input
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Hash every file and print its line. Returns `false` if any file failed.
fn run(cli: Cli) -> anyhow::Result<bool> {
    let width = match cli.length {
        Some(bits) => Width::from_bits(bits)?,
        None => std::env::args_os()
            .next()
            .map(|arg0| width_from_program_name(Path::new(&arg0)))
            .unwrap_or_default(),
    };
    let mode = ReadMode::resolve(cli.binary, cli.text, cli.tag)?;
    let style = LineStyle {
        tagged: cli.tag,
        mode,
        zero_terminated: cli.zero,
    };

    let caps = Capabilities::detect();
    let hasher = VectorHash::new(width)
        .with_seed(cli.seed)
        .with_tier(cli.tier)
        .with_capabilities(caps);
    debug!(
        width = width.bits(),
        block_bytes = width.block_bytes(),
        seed = %format_args!("0x{:08x}", cli.seed),
        detected = caps.max_tier().name(),
        request = ?cli.tier,
        "vhsum configured"
    );

    let files = if cli.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.files
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.jobs.unwrap_or(0))
        .build()
        .context("failed to start worker threads")?;

    // Lines are written in argument order as soon as all earlier files are done
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut ok = true;
    run_in_order(
        &pool,
        &files,
        |path| digest_path(&hasher, path),
        |path, result| {
            let name = path.to_string_lossy();
            match result {
                Ok(digest) => {
                    write!(out, "{}", ChecksumLine::new(&digest, &name, style))?;
                    out.flush()
                }
                Err(e) => {
                    out.flush()?;
                    eprintln!("vhsum: {}: {}", name, e);
                    ok = false;
                    Ok(())
                }
            }
        },
    )?;

    Ok(ok)
}
