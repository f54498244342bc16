use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use stickermask::{
    BackendKind, BorderColor, ExpandStrategy, KernelSettings, StickerOptions, create_backend, io,
};

#[derive(Parser, Debug)]
#[command(name = "stickermask", version)]
struct Cli {
    /// Log kernel and pipeline activity to stderr.
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cut an image out along a mask, optionally with an outline.
    Apply(ApplyArgs),
    /// Box-smooth a grayscale mask.
    Smooth(SmoothArgs),
    /// Dilate the thresholded mask by a radius.
    Expand(ExpandArgs),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Scalar,
    Parallel,
    Auto,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Scalar => Self::Scalar,
            BackendArg::Parallel => Self::Parallel,
            BackendArg::Auto => Self::Auto,
        }
    }
}

#[derive(Parser, Debug)]
struct ApplyArgs {
    /// Input image (any format `image` can decode).
    #[arg(long)]
    image: PathBuf,

    /// Grayscale mask with the same dimensions as the image.
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Sticker options JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Paint an outline around the cutout.
    #[arg(long, default_value_t = false)]
    border: bool,

    /// Outline radius in pixels.
    #[arg(long)]
    border_width: Option<u32>,

    /// Outline color as `#rrggbb`.
    #[arg(long)]
    border_color: Option<BorderColor>,

    /// Box-blur window applied to the mask first (odd).
    #[arg(long)]
    smooth: Option<u32>,

    /// Kernel backend.
    #[arg(long, value_enum, default_value_t = BackendArg::Auto)]
    backend: BackendArg,
}

#[derive(Parser, Debug)]
struct SmoothArgs {
    /// Input grayscale mask.
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Box-blur window.
    #[arg(long, default_value_t = 3)]
    kernel: u32,
}

#[derive(Parser, Debug)]
struct ExpandArgs {
    /// Input grayscale mask.
    #[arg(long)]
    mask: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Dilation radius in pixels.
    #[arg(long)]
    border_width: u32,

    /// Use 8-connected growth above the exact-disk cutoff.
    #[arg(long, default_value_t = false)]
    hybrid: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Apply(args) => cmd_apply(args),
        Command::Smooth(args) => cmd_smooth(args),
        Command::Expand(args) => cmd_expand(args),
    }
}

fn read_mask(path: &Path) -> anyhow::Result<(stickermask::GridDims, Vec<f64>)> {
    let bytes = std::fs::read(path).with_context(|| format!("read mask '{}'", path.display()))?;
    io::decode_mask(&bytes).with_context(|| format!("decode mask '{}'", path.display()))
}

fn ensure_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_apply(args: ApplyArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => StickerOptions::from_path(path)?,
        None => StickerOptions::default(),
    };
    if args.border {
        opts.add_border = true;
    }
    if let Some(width) = args.border_width {
        opts.border_width = width;
    }
    if let Some(color) = args.border_color {
        opts.border_color = color;
    }
    if let Some(kernel) = args.smooth {
        opts.smooth_kernel = kernel;
    }
    opts.validate()?;

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("read image '{}'", args.image.display()))?;
    let (dims, mut pixels) = io::decode_rgba8(&bytes)
        .with_context(|| format!("decode image '{}'", args.image.display()))?;
    let (mask_dims, mask) = read_mask(&args.mask)?;
    if mask_dims != dims {
        anyhow::bail!(
            "mask is {}x{} but image is {}x{}",
            mask_dims.width,
            mask_dims.height,
            dims.width,
            dims.height
        );
    }

    let backend = create_backend(args.backend.into(), &KernelSettings::default())?;
    tracing::debug!(backend = backend.name(), ?opts, "applying sticker");
    stickermask::apply_sticker(backend.as_ref(), &mut pixels, &mask, dims, &opts)?;

    ensure_parent(&args.out)?;
    io::write_rgba8_png(&args.out, dims, &pixels)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_smooth(args: SmoothArgs) -> anyhow::Result<()> {
    let (dims, mask) = read_mask(&args.mask)?;
    let mut out = vec![0.0; mask.len()];
    stickermask::smooth_mask(&mask, &mut out, dims, args.kernel)?;

    ensure_parent(&args.out)?;
    io::write_mask_png(&args.out, dims, &out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_expand(args: ExpandArgs) -> anyhow::Result<()> {
    let (dims, mask) = read_mask(&args.mask)?;
    let strategy = if args.hybrid {
        ExpandStrategy::hybrid()
    } else {
        ExpandStrategy::Disk
    };
    let backend = create_backend(BackendKind::Auto, &KernelSettings::default())?;
    let mut out = vec![0.0; mask.len()];
    backend.expand(&mask, &mut out, dims, args.border_width, strategy)?;

    ensure_parent(&args.out)?;
    io::write_mask_png(&args.out, dims, &out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
