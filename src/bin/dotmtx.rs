use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use dotmtx::{Engine, EngineConfig, Mp4Opts, RenderRequest};

#[derive(Parser, Debug)]
#[command(name = "dotmtx", version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a looping GIF.
    Gif(OutArgs),
    /// Render one loop as an MP4 video (requires `ffmpeg` on PATH).
    Mp4(OutArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Print the animation plan as JSON without rendering.
    Plan(AnimArgs),
    /// Render a one-line `[Speed] [Width] [Blank] [Text]` request to a GIF.
    Query(QueryArgs),
}

#[derive(Args, Debug)]
struct AnimArgs {
    /// Characters per second; negative scrolls the other way, 0 is static.
    #[arg(long, default_value_t = 4.0, allow_negative_numbers = true)]
    speed: f64,

    /// Window width as a multiple of the text width.
    #[arg(long, default_value_t = 1.0)]
    width: f64,

    /// Trailing blank as a multiple of the text width.
    #[arg(long, default_value_t = 1.0)]
    blank: f64,

    /// Text to render.
    text: String,
}

impl AnimArgs {
    fn request(&self) -> RenderRequest {
        RenderRequest::new(self.text.clone(), self.speed, self.width, self.blank)
    }
}

#[derive(Args, Debug)]
struct OutArgs {
    #[command(flatten)]
    anim: AnimArgs,

    /// Output path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    anim: AnimArgs,

    /// Frame index (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// The request line, e.g. "4 1 1 HELLO".
    query: String,

    /// Output GIF path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let engine = Engine::new(config).context("build render engine")?;

    match cli.cmd {
        Command::Gif(args) => cmd_gif(&engine, &args.anim.request(), &args.out),
        Command::Mp4(args) => cmd_mp4(&engine, &args),
        Command::Frame(args) => cmd_frame(&engine, &args),
        Command::Plan(args) => cmd_plan(&engine, &args),
        Command::Query(args) => cmd_query(&engine, &args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn create_out(path: &Path) -> anyhow::Result<BufWriter<File>> {
    dotmtx::encode::ffmpeg::ensure_parent_dir(path)?;
    let f = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(BufWriter::new(f))
}

fn cmd_gif(engine: &Engine, req: &RenderRequest, out: &Path) -> anyhow::Result<()> {
    let anim = engine.render(req)?;
    if engine.is_fallback(&anim) {
        eprintln!("request exceeds limits, wrote fallback animation");
    }
    dotmtx::write_gif(&anim, create_out(out)?)
        .with_context(|| format!("write gif '{}'", out.display()))?;
    eprintln!("wrote {} ({} frames)", out.display(), anim.frame_count());
    Ok(())
}

fn cmd_mp4(engine: &Engine, args: &OutArgs) -> anyhow::Result<()> {
    let anim = engine.render(&args.anim.request())?;
    dotmtx::write_mp4(&anim, &Mp4Opts::new(&args.out))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frame(engine: &Engine, args: &FrameArgs) -> anyhow::Result<()> {
    let anim = engine.render(&args.anim.request())?;
    let Some(frame) = anim.frames.get(args.index) else {
        anyhow::bail!(
            "frame index {} out of range (animation has {} frames)",
            args.index,
            anim.frame_count()
        );
    };

    dotmtx::encode::ffmpeg::ensure_parent_dir(&args.out)?;
    frame
        .to_rgba_image(&anim.palette)
        .save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_plan(engine: &Engine, args: &AnimArgs) -> anyhow::Result<()> {
    let json = match engine.plan(&args.request())? {
        Some(plan) => serde_json::to_string_pretty(&plan)?,
        None => serde_json::to_string(&"fallback")?,
    };
    println!("{json}");
    Ok(())
}

fn cmd_query(engine: &Engine, args: &QueryArgs) -> anyhow::Result<()> {
    let req = RenderRequest::parse(&args.query, &engine.config().limits)?;
    cmd_gif(engine, &req, &args.out)
}
