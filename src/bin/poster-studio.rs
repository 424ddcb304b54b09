use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "poster-studio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a poster document to `magic-poster-<timestamp>.png`.
    Render(RenderArgs),
    /// Print the document the studio opens with for a background.
    Defaults(DefaultsArgs),
    /// Print family name and SHA-256 of the configured font files.
    Fonts(FontArgs),
}

#[derive(Args, Debug)]
struct FontArgs {
    /// Studio config JSON (fonts, output directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font file for bold text (overrides config).
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// Font file for medium text (overrides config; defaults to the bold face).
    #[arg(long)]
    font_medium: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Poster document JSON.
    #[arg(long)]
    doc: PathBuf,

    /// Background reference overriding the document's (path or data URL).
    #[arg(long)]
    background: Option<String>,

    /// Output directory (overrides config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    #[command(flatten)]
    fonts: FontArgs,
}

#[derive(Parser, Debug)]
struct DefaultsArgs {
    /// Background reference stored in the document.
    #[arg(long)]
    background: String,

    /// Headline suggested by the image provider.
    #[arg(long)]
    headline: Option<String>,

    /// Subtext suggested by the image provider.
    #[arg(long)]
    subtext: Option<String>,

    /// Write the JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Defaults(args) => cmd_defaults(args),
        Command::Fonts(args) => cmd_fonts(args),
    }
}

fn load_config(
    args: &FontArgs,
    out_dir: Option<PathBuf>,
) -> anyhow::Result<poster_studio::StudioConfig> {
    let base = match &args.config {
        Some(p) => poster_studio::StudioConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?,
        None => poster_studio::StudioConfig::default(),
    };
    Ok(base.with_overrides(args.font_bold.clone(), args.font_medium.clone(), out_dir))
}

fn read_doc_json(path: &Path) -> anyhow::Result<poster_studio::PosterDocument> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: poster_studio::PosterDocument =
        serde_json::from_reader(r).with_context(|| "parse poster document JSON")?;
    Ok(doc)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut doc = read_doc_json(&args.doc)?;
    if let Some(bg) = args.background {
        doc.background = bg;
    }
    doc.validate()?;

    let config = load_config(&args.fonts, args.out_dir)?;
    let fonts = config.load_fonts()?;

    let doc_dir = args.doc.parent().unwrap_or_else(|| Path::new("."));
    let source = poster_studio::BackgroundSource::parse(&doc.background).resolve_against(doc_dir);
    let background = poster_studio::Background::load(&source)
        .with_context(|| format!("load background '{}'", source.describe()))?;

    let session = poster_studio::StudioSession::with_document(
        poster_studio::FontTextRenderer::new(fonts),
        background,
        doc,
    )?;
    let exported = session.export()?;
    let path = exported.write_to_dir(&config.out_dir())?;

    eprintln!(
        "wrote {} ({}x{})",
        path.display(),
        exported.width,
        exported.height
    );
    Ok(())
}

fn cmd_defaults(args: DefaultsArgs) -> anyhow::Result<()> {
    let doc = poster_studio::PosterDocument::new(
        args.background,
        args.headline.as_deref(),
        args.subtext.as_deref(),
    );
    doc.validate()?;
    let json = doc.to_json_pretty()?;

    match args.out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&path, json + "\n")
                .with_context(|| format!("write '{}'", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_fonts(args: FontArgs) -> anyhow::Result<()> {
    let config = load_config(&args, None)?;
    let fonts = config.load_fonts()?;

    eprintln!("font diagnostics:");
    for weight in [poster_studio::FontWeight::Bold, poster_studio::FontWeight::Medium] {
        let face = fonts.face(weight);
        eprintln!("  {weight:?} ({}):", weight.css_weight());
        eprintln!("    family:  {}", face.family());
        eprintln!("    sha256:  {}", face.sha256_hex());
    }
    Ok(())
}
