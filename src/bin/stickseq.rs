use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use stickseq::{JsonLinesSink, PlayOptions, Player, Rgba8, Size, StickKind, StickScene, StickStyle};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Parser, Debug)]
#[command(name = "stickseq", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the derived sequencer configuration as JSON.
    Config(ConfigArgs),
    /// Play a scene on a manual clock and write frames as JSON lines.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Animation kind.
    #[arg(long, value_enum)]
    kind: KindChoice,

    /// Bounding width.
    #[arg(long)]
    width: f64,

    /// Bounding height.
    #[arg(long)]
    height: f64,

    /// Requested stick width.
    #[arg(long)]
    stick_width: Option<f64>,

    /// Requested gap between linear sticks.
    #[arg(long)]
    spacing: Option<f64>,

    /// Total sweep duration in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Filled colour (#rrggbb or #rrggbbaa).
    #[arg(long, value_parser = parse_color)]
    filled: Option<Rgba8>,

    /// Unfilled colour.
    #[arg(long, value_parser = parse_color)]
    unfilled: Option<Rgba8>,

    /// Progress colour.
    #[arg(long, value_parser = parse_color)]
    progress: Option<Rgba8>,

    /// Keep every stick at full height.
    #[arg(long)]
    no_height_animation: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON lines path.
    #[arg(long)]
    out: PathBuf,

    /// Sleep between events so playback runs at wall-clock speed.
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    LinearLoading,
    LinearProgress,
    CircularLoading,
    CircularProgress,
    CircularReversibleProgress,
}

impl From<KindChoice> for StickKind {
    fn from(k: KindChoice) -> Self {
        match k {
            KindChoice::LinearLoading => StickKind::LinearLoading,
            KindChoice::LinearProgress => StickKind::LinearProgress,
            KindChoice::CircularLoading => StickKind::CircularLoading,
            KindChoice::CircularProgress => StickKind::CircularProgress,
            KindChoice::CircularReversibleProgress => StickKind::CircularReversibleProgress,
        }
    }
}

fn parse_color(s: &str) -> Result<Rgba8, String> {
    Rgba8::from_hex(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Config(args) => cmd_config(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let defaults = StickStyle::default();
    let style = StickStyle {
        stick_width: args.stick_width.unwrap_or(defaults.stick_width),
        spacing: args.spacing.unwrap_or(defaults.spacing),
        duration_secs: args.duration.unwrap_or(defaults.duration_secs),
        filled_color: args.filled.unwrap_or(defaults.filled_color),
        unfilled_color: args.unfilled.unwrap_or(defaults.unfilled_color),
        progress_color: args.progress.unwrap_or(defaults.progress_color),
        allow_height_animation: !args.no_height_animation,
        screen: None,
    };
    let cfg = stickseq::compute_config(
        args.kind.into(),
        Size::new(args.width, args.height),
        &style,
    );

    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, &cfg).context("encode config JSON")?;
    writeln!(out).context("write config")?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let scene = StickScene::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    scene.validate()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create frames file '{}'", args.out.display()))?;
    let mut sink = JsonLinesSink::new(BufWriter::new(f));

    let mut player = Player::new(&scene);
    let summary = player.run(
        &mut sink,
        PlayOptions {
            realtime: args.realtime,
        },
    )?;

    eprintln!(
        "wrote {} frames ({} steps) to {}",
        summary.frames,
        summary.steps,
        args.out.display()
    );
    Ok(())
}
