use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use vbz_core::{compress_to_vec, decompress_to_vec, decompressed_size, Options, SIZE_HEADER_LEN};
use vbz_filters::{pipeline_by_name, recode, FilterRegistry};

// ── CLI definition ─────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "vbz",
    about = "Delta-zigzag + zstd compression for fixed-width integer signals",
    version
)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Codec options. Decoding must repeat the options used to encode.
#[derive(Args, Clone, Copy, Debug)]
struct CodecArgs {
    /// Bytes per sample: 1, 2 or 4
    #[arg(short = 's', long, default_value_t = 2)]
    integer_size: u32,
    /// Transform version (0 or 1)
    #[arg(long = "vbz-version", default_value_t = vbz_core::DEFAULT_VERSION)]
    vbz_version: u32,
    /// Skip the delta-zigzag transform
    #[arg(long)]
    no_zigzag: bool,
    /// Zstd level, 0 disables zstd
    #[arg(short, long, default_value_t = vbz_core::DEFAULT_ZSTD_LEVEL)]
    level: u32,
}

impl CodecArgs {
    fn options(&self) -> Options {
        Options::new(self.integer_size)
            .with_version(self.vbz_version)
            .with_delta_zig_zag(!self.no_zigzag)
            .with_zstd_level(self.level)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a raw little-endian sample file
    Compress {
        /// Source file ("-" reads stdin)
        input: PathBuf,
        /// Destination file ("-" writes stdout)
        output: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
    },
    /// Decompress a file written by `compress`
    Decompress {
        input: PathBuf,
        output: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
    },
    /// Print the stored size, ratio and options of a compressed file
    Inspect {
        file: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
        /// Print a JSON object instead of text
        #[arg(long)]
        json: bool,
    },
    /// Convert stored chunk files between representations, in parallel
    ///
    /// Each input file is one chunk. A file that fails is reported and
    /// skipped; the others are still converted.
    Recode {
        /// Chunk files to convert
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Current representation: none | deflate | vbz
        #[arg(long)]
        from: String,
        /// Target representation: none | deflate | vbz
        #[arg(long)]
        to: String,
        /// Directory receiving the converted files (same names)
        #[arg(short, long)]
        out_dir: PathBuf,
        #[command(flatten)]
        codec: CodecArgs,
    },
}

// ── Helpers ────────────────────────────────────────────────────────────────

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(io::stderr)
        .init();
}

fn is_stdio(path: &Path) -> bool {
    path.to_str() == Some("-")
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    if is_stdio(path) {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("reading {:?}", path))
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if is_stdio(path) {
        io::stdout().lock().write_all(bytes).context("writing stdout")?;
        return Ok(());
    }
    fs::write(path, bytes).with_context(|| format!("writing {:?}", path))
}

fn human_bytes(n: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut v = n as f64;
    let mut unit = 0;
    while v >= 1024.0 && unit < UNITS.len() - 1 {
        v /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", n)
    } else {
        format!("{:.2} {}", v, UNITS[unit])
    }
}

fn ratio(raw: u64, stored: u64) -> f64 {
    if stored == 0 {
        return 0.0;
    }
    raw as f64 / stored as f64
}

// ── Subcommand implementations ─────────────────────────────────────────────

fn run_compress(input: &Path, output: &Path, codec: CodecArgs) -> anyhow::Result<()> {
    let options = codec.options();
    let raw = read_input(input)?;

    let t0 = Instant::now();
    let compressed = compress_to_vec(&raw, &options)
        .with_context(|| format!("compressing {:?} with {:?}", input, options))?;
    let elapsed = t0.elapsed();
    write_output(output, &compressed)?;

    eprintln!("  samples     : {}", raw.len() / codec.integer_size.max(1) as usize);
    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!("  compressed  : {}", human_bytes(compressed.len() as u64));
    eprintln!("  ratio       : {:.2}x", ratio(raw.len() as u64, compressed.len() as u64));
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

fn run_decompress(input: &Path, output: &Path, codec: CodecArgs) -> anyhow::Result<()> {
    let options = codec.options();
    let compressed = read_input(input)?;

    let t0 = Instant::now();
    let raw = decompress_to_vec(&compressed, &options)
        .with_context(|| format!("decompressing {:?} with {:?}", input, options))?;
    let elapsed = t0.elapsed();
    write_output(output, &raw)?;

    eprintln!("  raw size    : {}", human_bytes(raw.len() as u64));
    eprintln!(
        "  throughput  : {}/s",
        human_bytes((raw.len() as f64 / elapsed.as_secs_f64().max(1e-9)) as u64)
    );
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());
    Ok(())
}

#[derive(Serialize)]
struct Inspection {
    file: String,
    compressed_bytes: u64,
    body_bytes: u64,
    decompressed_bytes: u64,
    samples: u64,
    ratio: f64,
    options: Options,
    decodes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn run_inspect(file: &Path, codec: CodecArgs, json: bool) -> anyhow::Result<()> {
    let options = codec.options();
    let compressed = read_input(file)?;
    let original = decompressed_size(&compressed, &options)
        .with_context(|| format!("reading size header of {:?}", file))?;

    let check = decompress_to_vec(&compressed, &options);
    let report = Inspection {
        file: file.display().to_string(),
        compressed_bytes: compressed.len() as u64,
        body_bytes: compressed.len().saturating_sub(SIZE_HEADER_LEN) as u64,
        decompressed_bytes: original as u64,
        samples: (original / codec.integer_size.max(1) as usize) as u64,
        ratio: ratio(original as u64, compressed.len() as u64),
        options,
        decodes: check.is_ok(),
        error: check.err().map(|e| e.to_string()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("=== VBZ file: {} ===", report.file);
    println!();
    println!("  version        : {}", options.version);
    println!("  integer size   : {}", options.integer_size);
    println!("  delta-zigzag   : {}", options.perform_delta_zig_zag);
    println!("  zstd level     : {}", options.zstd_compression_level);
    println!("  raw size       : {}", human_bytes(report.decompressed_bytes));
    println!("  samples        : {}", report.samples);
    println!("  compressed     : {}", human_bytes(report.compressed_bytes));
    println!("  ratio          : {:.2}x", report.ratio);
    match &report.error {
        None => println!("  decodes        : yes"),
        Some(e) => println!("  decodes        : no ({})", e),
    }
    Ok(())
}

fn recode_file(
    registry: &FilterRegistry,
    from: &vbz_filters::FilterPipeline,
    to: &vbz_filters::FilterPipeline,
    input: &Path,
    out_dir: &Path,
) -> anyhow::Result<(u64, u64)> {
    let name = input
        .file_name()
        .with_context(|| format!("{:?} has no file name", input))?;
    let stored = fs::read(input).with_context(|| format!("reading {:?}", input))?;
    let converted = recode(registry, from, to, &stored)
        .with_context(|| format!("recoding {:?}", input))?;
    let dest = out_dir.join(name);
    fs::write(&dest, &converted).with_context(|| format!("writing {:?}", dest))?;
    debug!(input = ?input, before = stored.len(), after = converted.len(), "recoded");
    Ok((stored.len() as u64, converted.len() as u64))
}

fn run_recode(
    files: &[PathBuf],
    from: &str,
    to: &str,
    out_dir: &Path,
    codec: CodecArgs,
) -> anyhow::Result<()> {
    let options = codec.options();
    let from = pipeline_by_name(from, options)?;
    let to = pipeline_by_name(to, options)?;
    fs::create_dir_all(out_dir).with_context(|| format!("creating {:?}", out_dir))?;

    let registry = FilterRegistry::with_defaults();
    let t0 = Instant::now();
    let results: Vec<(&PathBuf, anyhow::Result<(u64, u64)>)> = files
        .par_iter()
        .map(|file| (file, recode_file(&registry, &from, &to, file, out_dir)))
        .collect();
    let elapsed = t0.elapsed();

    let (mut before, mut after, mut failed) = (0u64, 0u64, 0usize);
    for (file, result) in &results {
        match result {
            Ok((b, a)) => {
                before += b;
                after += a;
            }
            Err(e) => {
                failed += 1;
                warn!(file = ?file, "recode failed: {:#}", e);
                eprintln!("  FAILED {:?}: {:#}", file, e);
            }
        }
    }

    info!(files = files.len(), failed, "recode finished");
    eprintln!("  files       : {} ({} failed)", files.len(), failed);
    eprintln!("  before      : {}", human_bytes(before));
    eprintln!("  after       : {}", human_bytes(after));
    eprintln!("  elapsed     : {:.3}s", elapsed.as_secs_f64());

    if failed > 0 {
        anyhow::bail!("{} of {} files could not be recoded", failed, files.len());
    }
    Ok(())
}

// ── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.command {
        Commands::Compress {
            input,
            output,
            codec,
        } => run_compress(&input, &output, codec),
        Commands::Decompress {
            input,
            output,
            codec,
        } => run_decompress(&input, &output, codec),
        Commands::Inspect { file, codec, json } => run_inspect(&file, codec, json),
        Commands::Recode {
            files,
            from,
            to,
            out_dir,
            codec,
        } => run_recode(&files, &from, &to, &out_dir, codec),
    }
}
