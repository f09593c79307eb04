use std::path::{Path, PathBuf};

use alphablend::{BlendThreading, ClipRequest, PixelRect, Rgba8, SurfaceSize};
use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "alphablend", version)]
struct Cli {
    /// Log blend decisions to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Blend one color over another and print the result as JSON.
    Pixel(PixelArgs),
    /// Blend a whole PNG over another of the same size.
    Surface(SurfaceArgs),
    /// Blend a region of one PNG onto another at an offset.
    Rect(RectArgs),
}

#[derive(Parser, Debug)]
struct PixelArgs {
    /// Source color as `R,G,B,A`.
    #[arg(long, value_parser = parse_rgba)]
    src: Rgba8,

    /// Destination color as `R,G,B,A`.
    #[arg(long, value_parser = parse_rgba)]
    dst: Rgba8,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Blend on the calling thread only.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,
}

impl ThreadingArgs {
    fn to_threading(&self) -> BlendThreading {
        BlendThreading {
            parallel: !self.sequential,
            threads: self.threads,
            ..BlendThreading::default()
        }
    }
}

#[derive(Parser, Debug)]
struct SurfaceArgs {
    /// Source PNG (drawn on top).
    #[arg(long)]
    src: PathBuf,

    /// Destination PNG.
    #[arg(long)]
    dst: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Parser, Debug)]
struct RectArgs {
    /// Source PNG (drawn on top).
    #[arg(long)]
    src: PathBuf,

    /// Source region as `X,Y,W,H`.
    #[arg(long, allow_hyphen_values = true)]
    src_rect: String,

    /// Destination PNG.
    #[arg(long)]
    dst: PathBuf,

    /// Destination origin as `X,Y`.
    #[arg(long, allow_hyphen_values = true, default_value = "0,0")]
    at: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Clip the region to both images instead of failing; allows negative origins.
    #[arg(long, default_value_t = false)]
    clip: bool,

    #[command(flatten)]
    threading: ThreadingArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Pixel(args) => cmd_pixel(args),
        Command::Surface(args) => cmd_surface(args),
        Command::Rect(args) => cmd_rect(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn cmd_pixel(args: PixelArgs) -> anyhow::Result<()> {
    let out = alphablend::blend_pixel(args.src, args.dst);
    println!("{}", serde_json::to_string(&out)?);
    Ok(())
}

fn cmd_surface(args: SurfaceArgs) -> anyhow::Result<()> {
    let src = load_rgba(&args.src)?;
    let dst = load_rgba(&args.dst)?;
    if src.size != dst.size {
        anyhow::bail!(
            "surface blend needs equal sizes: '{}' is {}, '{}' is {}",
            args.src.display(),
            src.size,
            args.dst.display(),
            dst.size
        );
    }

    let out = alphablend::blend_surface_with(
        &src.data,
        &dst.data,
        dst.size,
        &args.threading.to_threading(),
    )
    .context("blend surface")?;
    save_rgba(&args.out, &out, dst.size)
}

fn cmd_rect(args: RectArgs) -> anyhow::Result<()> {
    let [sx, sy, w, h] = parse_ints::<4>(&args.src_rect).context("parse --src-rect")?;
    let [dx, dy] = parse_ints::<2>(&args.at).context("parse --at")?;
    let src = load_rgba(&args.src)?;
    let dst = load_rgba(&args.dst)?;
    let threading = args.threading.to_threading();

    let out = if args.clip {
        let req = ClipRequest {
            src_x: i32::try_from(sx).context("--src-rect x out of range")?,
            src_y: i32::try_from(sy).context("--src-rect y out of range")?,
            width: u32::try_from(w).context("--src-rect width must be >= 0")?,
            height: u32::try_from(h).context("--src-rect height must be >= 0")?,
            dst_x: i32::try_from(dx).context("--at x out of range")?,
            dst_y: i32::try_from(dy).context("--at y out of range")?,
        };
        alphablend::blend_rect_clipped_with(
            &src.data, src.size, &dst.data, dst.size, req, &threading,
        )
        .context("blend clipped rect")?
    } else {
        let rect = PixelRect::new(
            non_negative(sx, "--src-rect x")?,
            non_negative(sy, "--src-rect y")?,
            non_negative(w, "--src-rect width")?,
            non_negative(h, "--src-rect height")?,
        );
        let origin = (non_negative(dx, "--at x")?, non_negative(dy, "--at y")?);
        alphablend::blend_rect_with(
            &src.data, src.size, rect, &dst.data, dst.size, origin, &threading,
        )
        .context("blend rect")?
    };
    save_rgba(&args.out, &out, dst.size)
}

struct LoadedImage {
    data: Vec<u8>,
    size: SurfaceSize,
}

fn load_rgba(path: &Path) -> anyhow::Result<LoadedImage> {
    let img = image::open(path)
        .with_context(|| format!("read image '{}'", path.display()))?
        .to_rgba8();
    let size = SurfaceSize::new(img.width(), img.height());
    Ok(LoadedImage {
        data: img.into_raw(),
        size,
    })
}

fn save_rgba(path: &Path, data: &[u8], size: SurfaceSize) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        path,
        data,
        size.width,
        size.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn parse_ints<const N: usize>(s: &str) -> anyhow::Result<[i64; N]> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<i64>())
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("'{s}' is not a comma-separated integer list"))?;
    <[i64; N]>::try_from(parts)
        .map_err(|p| anyhow::anyhow!("expected {} values in '{s}', got {}", N, p.len()))
}

fn non_negative(v: i64, what: &str) -> anyhow::Result<u32> {
    u32::try_from(v).with_context(|| {
        format!("{what} must be a non-negative u32 (use --clip for negative origins)")
    })
}

fn parse_rgba(s: &str) -> Result<Rgba8, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("'{s}': {e}"))?;
    let px = <[u8; 4]>::try_from(parts)
        .map_err(|p| format!("expected 4 channels in '{s}', got {}", p.len()))?;
    Ok(Rgba8::from(px))
}
