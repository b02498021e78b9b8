use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use pixfx::pipeline::{self, BlurParams, BrickParams, EdgeParams, ResizeParams};

#[derive(Parser, Debug)]
#[command(name = "pixfx", version)]
struct Cli {
    /// JPEG encoder quality (1-100).
    #[arg(long, global = true, default_value_t = pipeline::DEFAULT_QUALITY)]
    quality: u8,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resample an image to a fixed size.
    Resize(ResizeArgs),
    /// Box-blur an image.
    Blur(BlurArgs),
    /// Overlay a tiled brick texture on an image.
    Brick(BrickArgs),
    /// Write the Sobel gradient magnitude of an image.
    Edges(EdgesArgs),
}

#[derive(Parser, Debug)]
struct ResizeArgs {
    /// Source image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Destination image path.
    #[arg(long, default_value = "out.jpg")]
    out: PathBuf,

    /// New image width.
    #[arg(long, visible_alias = "w")]
    width: u32,

    /// New image height.
    #[arg(long, visible_alias = "h")]
    height: u32,
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Source image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Destination image path.
    #[arg(long, default_value = "out.jpg")]
    out: PathBuf,

    /// Kernel radius.
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    radius: i64,

    /// How taps past the image border are sampled.
    #[arg(long, value_enum, default_value_t = EdgeChoice::Fold)]
    edge: EdgeChoice,

    /// Keep an undivided running sum instead of dividing each sample.
    #[arg(long)]
    exact: bool,
}

#[derive(Parser, Debug)]
struct BrickArgs {
    /// Source image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Brick image path.
    #[arg(long, default_value = "images/lego-25.jpg")]
    lin: PathBuf,

    /// Destination image path.
    #[arg(long, default_value = "out.jpg")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct EdgesArgs {
    /// Source image path.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Destination image path.
    #[arg(long, default_value = "edges.png")]
    out: PathBuf,

    /// How magnitudes above 255 are narrowed.
    #[arg(long, value_enum, default_value_t = NarrowingChoice::Saturate)]
    narrowing: NarrowingChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EdgeChoice {
    Fold,
    Wrap,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum NarrowingChoice {
    Saturate,
    Wrap,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let quality = cli.quality;
    match cli.cmd {
        Command::Resize(args) => cmd_resize(args, quality),
        Command::Blur(args) => cmd_blur(args, quality),
        Command::Brick(args) => cmd_brick(args, quality),
        Command::Edges(args) => cmd_edges(args, quality),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_resize(args: ResizeArgs, quality: u8) -> anyhow::Result<()> {
    pipeline::resize(&ResizeParams {
        input: args.in_path,
        output: args.out.clone(),
        width: args.width,
        height: args.height,
        quality,
    })
    .context("resize")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_blur(args: BlurArgs, quality: u8) -> anyhow::Result<()> {
    let edge = match args.edge {
        EdgeChoice::Fold => pixfx::EdgeMode::Fold,
        EdgeChoice::Wrap => pixfx::EdgeMode::Wrap,
    };
    let accumulation = if args.exact {
        pixfx::Accumulation::Exact
    } else {
        pixfx::Accumulation::Truncating
    };

    pipeline::blur(&BlurParams {
        input: args.in_path,
        output: args.out.clone(),
        radius: args.radius,
        edge,
        accumulation,
        quality,
    })
    .context("blur")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_brick(args: BrickArgs, quality: u8) -> anyhow::Result<()> {
    pipeline::brick(&BrickParams {
        input: args.in_path,
        brick: args.lin,
        output: args.out.clone(),
        quality,
    })
    .context("brick")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_edges(args: EdgesArgs, quality: u8) -> anyhow::Result<()> {
    let narrowing = match args.narrowing {
        NarrowingChoice::Saturate => pixfx::Narrowing::Saturate,
        NarrowingChoice::Wrap => pixfx::Narrowing::Wrap,
    };

    pipeline::edges(&EdgeParams {
        input: args.in_path,
        output: args.out.clone(),
        narrowing,
        quality,
    })
    .context("edges")?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
