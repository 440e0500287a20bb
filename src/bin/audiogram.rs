use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "audiogram", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a props JSON file.
    Check(CheckArgs),
    /// Resolve subtitle spans and print them as JSON lines.
    Spans(SpansArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input props JSON.
    #[arg(long)]
    props: PathBuf,
}

#[derive(Parser, Debug)]
struct SpansArgs {
    /// Input props JSON. Subtitle paths are resolved relative to its directory.
    #[arg(long)]
    props: PathBuf,

    /// Font file (TTF/OTF) used to measure subtitle lines.
    #[arg(long)]
    font: PathBuf,

    /// Resolve a single composition frame.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    frame: Option<u64>,

    /// First frame of the range (default 0).
    #[arg(long)]
    start: Option<u64>,

    /// End of the range, exclusive (default: composition duration).
    #[arg(long)]
    end: Option<u64>,

    /// Resolve frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Spans(args) => cmd_spans(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let props = audiogram::AudiogramProps::from_path(&args.props)?;
    let config = props.validate()?;
    eprintln!(
        "ok: {} frames ({:.3}s) at {} fps, audio offset {} frames ({:.3}s)",
        config.duration_frames,
        config.fps.frames_to_secs(config.duration_frames),
        config.fps.as_f64(),
        config.audio_offset_frames,
        config.fps.frames_to_secs(config.audio_offset_frames)
    );
    Ok(())
}

fn cmd_spans(args: SpansArgs) -> anyhow::Result<()> {
    let props = audiogram::AudiogramProps::from_path(&args.props)?;
    let config = props.validate()?;
    let assets_root = args.props.parent().unwrap_or_else(|| Path::new("."));

    let font_bytes =
        std::fs::read(&args.font).with_context(|| format!("read font '{}'", args.font.display()))?;
    let mut measurer = audiogram::ParleyMeasurer::from_font_bytes(&font_bytes)?;
    let source = audiogram::FsSubtitleSource::new(assets_root);
    let session = audiogram::AudiogramSession::prepare(config, &source, &mut measurer)?;

    let range = match args.frame {
        Some(f) => audiogram::FrameRange::new(
            audiogram::FrameIndex(f),
            audiogram::FrameIndex(f.saturating_add(1)),
        )?,
        None => audiogram::FrameRange::new(
            audiogram::FrameIndex(args.start.unwrap_or(0)),
            audiogram::FrameIndex(args.end.unwrap_or(session.duration_frames())),
        )?,
    };
    let threading = audiogram::ResolveThreading {
        parallel: args.parallel,
        threads: args.threads,
    };
    let spans = session.resolve_range(range, &threading)?;

    let out: Box<dyn Write> = match &args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
            Box::new(f)
        }
        None => Box::new(std::io::stdout().lock()),
    };
    let mut out = BufWriter::new(out);
    for span in &spans {
        serde_json::to_writer(&mut out, span).context("serialize span")?;
        out.write_all(b"\n")?;
    }
    out.flush()?;

    if let Some(path) = &args.out {
        eprintln!("wrote {} spans to {}", spans.len(), path.display());
    }
    Ok(())
}
