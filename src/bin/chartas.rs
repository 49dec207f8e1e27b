use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use chartas::{CanvasService, ChartasError, ErrorClass, SizeLimits, StoreConfig};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chartas", version, about = "Create, paint, crop and delete stored canvases")]
struct Cli {
    /// Storage directory (overrides the config file).
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// JSON store configuration.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of lock stripes (overrides the config file).
    #[arg(long, global = true)]
    stripes: Option<usize>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a black canvas and print its id.
    Create(CreateArgs),
    /// Draw an image file onto a canvas.
    Insert(InsertArgs),
    /// Write a region of a canvas to a BMP file.
    Extract(ExtractArgs),
    /// Delete a canvas.
    Delete(DeleteArgs),
}

#[derive(Parser, Debug)]
struct CreateArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: u32,
}

#[derive(Parser, Debug)]
struct InsertArgs {
    /// Target canvas id.
    id: String,

    /// Column of the image's top-left corner on the canvas.
    #[arg(long)]
    x: u32,

    /// Row of the image's top-left corner on the canvas.
    #[arg(long)]
    y: u32,

    /// Declared image width; must match the file.
    #[arg(long)]
    width: u32,

    /// Declared image height; must match the file.
    #[arg(long)]
    height: u32,

    /// Image file (any format the `image` crate decodes).
    #[arg(long)]
    image: PathBuf,
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Source canvas id.
    id: String,

    /// Column of the region's top-left corner.
    #[arg(long)]
    x: u32,

    /// Row of the region's top-left corner.
    #[arg(long)]
    y: u32,

    /// Region width.
    #[arg(long)]
    width: u32,

    /// Region height.
    #[arg(long)]
    height: u32,

    /// Output BMP path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DeleteArgs {
    /// Canvas id.
    id: String,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = store_config(&cli)?;
    let limits = SizeLimits::default();
    let svc = CanvasService::open(config).context("open canvas store")?;

    match cli.cmd {
        Command::Create(args) => {
            limits.check_canvas(args.width, args.height)?;
            let id = svc.create_blank(args.width, args.height)?;
            println!("{id}");
        }
        Command::Insert(args) => {
            limits.check_canvas(args.width, args.height)?;
            let bytes = std::fs::read(&args.image)
                .with_context(|| format!("read image '{}'", args.image.display()))?;
            let source = chartas::decode_source(&bytes, &limits)?;
            svc.insert(&args.id, args.width, args.height, args.x, args.y, &source)?;
        }
        Command::Extract(args) => {
            limits.check_segment(args.width, args.height)?;
            let region = svc.extract(&args.id, args.width, args.height, args.x, args.y)?;
            let bytes = svc.store().codec().encode(&region)?;

            if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&args.out, bytes)
                .with_context(|| format!("write bmp '{}'", args.out.display()))?;
            eprintln!("wrote {}", args.out.display());
        }
        Command::Delete(args) => {
            svc.delete(&args.id)?;
        }
    }
    Ok(())
}

fn store_config(cli: &Cli) -> anyhow::Result<StoreConfig> {
    let mut config = match &cli.config {
        Some(path) => StoreConfig::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => StoreConfig::default(),
    };
    if let Some(root) = &cli.root {
        config.root = root.clone();
    }
    if let Some(stripes) = cli.stripes {
        config.stripes = stripes;
    }
    config.validate()?;
    Ok(config)
}

fn report(err: &anyhow::Error) {
    match err.downcast_ref::<ChartasError>().map(ChartasError::class) {
        Some(ErrorClass::NotFound) => eprintln!("{err:#}"),
        Some(ErrorClass::BadRequest) => eprintln!("bad request: {err:#}"),
        Some(ErrorClass::Internal) | None => {
            tracing::error!(error = %format!("{err:#}"), "request failed");
            eprintln!("internal error: {err:#}");
        }
    }
}
