use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "svg2shapeshifter", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an SVG export (single frame or frame sequence) into a ShapeShifter document.
    Convert(ConvertArgs),
    /// Merge several ShapeShifter documents into one.
    Merge(MergeArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input SVG file.
    #[arg(long = "in", short = 'f')]
    in_path: PathBuf,

    /// Output path (defaults to the input path with a `.shapeshifter` extension).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Time between sampled keyframes. Non-positive values keep the default (50).
    #[arg(long = "time-interval", visible_alias = "time", allow_negative_numbers = true)]
    time_interval: Option<i64>,

    /// Frames to skip between sampled keyframes. Non-positive values keep the default (5).
    #[arg(long = "frame-interval", visible_alias = "frame", allow_negative_numbers = true)]
    frame_interval: Option<i64>,
}

#[derive(Parser, Debug)]
struct MergeArgs {
    /// Documents to merge, in order. The first one decides the canvas size.
    #[arg(required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Merge(args) => cmd_merge(args),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let mut opts = svg2shapeshifter::ConvertOpts::default();
    if let Some(v) = args.time_interval {
        opts = opts.with_time_interval(v);
    }
    if let Some(v) = args.frame_interval {
        opts = opts.with_frame_interval(v);
    }

    let conv = svg2shapeshifter::convert_file(&args.in_path, &opts)
        .with_context(|| format!("convert '{}'", args.in_path.display()))?;
    if !conv.skipped.is_empty() {
        eprintln!(
            "warning: {} shape comparisons were skipped; review the output",
            conv.skipped.len()
        );
    }

    let out = args
        .out
        .unwrap_or_else(|| svg2shapeshifter::default_output_path(&args.in_path));
    conv.document
        .write_to_path(&out)
        .with_context(|| format!("write document '{}'", out.display()))?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let mut ids = svg2shapeshifter::IdCounter::new();
    let merged = svg2shapeshifter::merge_files(&args.inputs, &mut ids).context("merge documents")?;
    merged
        .write_to_path(&args.out)
        .with_context(|| format!("write document '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
