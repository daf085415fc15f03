use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "gridmark", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest an analysis JSON and report what was kept and what was dropped.
    Validate(ValidateArgs),
    /// Print the overlay for a single playback time as JSON.
    Frame(FrameArgs),
    /// Play the whole video and print every change of visible terms and callouts.
    Timeline(TimelineArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input analysis JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine config JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ViewArgs {
    /// Input analysis JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Engine config JSON (defaults when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Natural video width; letterboxes the picture inside the viewport when set with
    /// `--video-height`.
    #[arg(long)]
    video_width: Option<f64>,

    #[arg(long)]
    video_height: Option<f64>,

    /// Learn mode: surface terminology in broadcast style.
    #[arg(long, default_value_t = false)]
    learn: bool,

    /// Force broadcast-style density caps.
    #[arg(long, default_value_t = false)]
    broadcast: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Playback time in seconds.
    #[arg(long)]
    time: f64,
}

#[derive(Parser, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    view: ViewArgs,

    /// Ticks per second of video.
    #[arg(long, default_value_t = 10.0)]
    fps: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gridmark=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Timeline(args) => cmd_timeline(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<gridmark::EngineConfig> {
    match path {
        Some(p) => gridmark::EngineConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(gridmark::EngineConfig::default()),
    }
}

fn load_report(
    path: &Path,
    cfg: &gridmark::EngineConfig,
) -> anyhow::Result<gridmark::IngestReport> {
    gridmark::PlayAnalysis::from_path(path, &cfg.ingest)
        .with_context(|| format!("ingest analysis '{}'", path.display()))
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let report = load_report(&args.in_path, &cfg)?;
    let play = &report.analysis;

    println!("video: {} ({:.2}s)", play.video_url, play.video_duration);
    println!(
        "frames: {}, callouts: {}, rejections: {}",
        play.frames.len(),
        play.callouts.len(),
        report.rejections.len()
    );
    for c in &play.callouts {
        println!(
            "callout {}: {:.2}s..{:.2}s \"{}\"",
            c.id, c.start_time, c.end_time, c.text
        );
    }
    for r in &report.rejections {
        println!("rejected: {r}");
    }
    Ok(())
}

fn open_session(
    view: &ViewArgs,
) -> anyhow::Result<(gridmark::PlaybackSession, gridmark::CanvasDimensions)> {
    let mut cfg = load_config(view.config.as_deref())?;
    if view.broadcast {
        cfg.session.broadcast_style = true;
    }
    let report = load_report(&view.in_path, &cfg)?;
    for r in &report.rejections {
        tracing::warn!(%r, "ingest rejection");
    }

    let container = gridmark::Size::new(view.width, view.height);
    let dims = match (view.video_width, view.video_height) {
        (Some(w), Some(h)) => {
            gridmark::CanvasDimensions::fit(container, gridmark::Size::new(w, h))
        }
        _ => gridmark::CanvasDimensions::new(view.width, view.height),
    };
    let session = gridmark::PlaybackSession::new(report.analysis, cfg)
        .context("start playback session")?;
    Ok((session, dims))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.time.is_finite(), "--time must be finite");
    let (mut session, dims) = open_session(&args.view)?;
    let out = session.tick(args.time, &dims, args.view.learn);
    let json = serde_json::to_string_pretty(&out).context("serialize overlay frame")?;
    println!("{json}");
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be finite and > 0"
    );
    let (mut session, dims) = open_session(&args.view)?;
    let duration = session.analysis().video_duration;
    let ticks = (duration * args.fps).floor() as u64;

    let mut previous: Option<(Vec<String>, Vec<String>)> = None;
    for i in 0..=ticks {
        let t = i as f64 / args.fps;
        let out = session.tick(t, &dims, args.view.learn);
        let terms: Vec<String> = out.terms.iter().map(|x| x.term.clone()).collect();
        let callouts: Vec<String> = out.callouts.iter().map(|c| c.id.clone()).collect();
        let current = (terms, callouts);
        if previous.as_ref() != Some(&current) {
            println!(
                "{t:>7.2}s terms=[{}] callouts=[{}]",
                current.0.join(", "),
                current.1.join(", ")
            );
            previous = Some(current);
        }
    }
    Ok(())
}
