mod config_cmd;
mod doctor_cmd;
mod document_cmd;
mod ocr_cmd;
mod terminal_output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use orgocr_config::{config_dir, config_file_path, load_and_prepare, OrgOcrConfig};
use orgocr_core::OcrSettings;
use orgocr_logging::init_logger;

#[derive(Parser)]
#[command(name = "orgocr")]
#[command(about = "orgocr: OCR drawers for images in org documents")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.orgocr/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured backend (tesseract | easyocr)
    #[arg(short, long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the text recognized in an image
    Ocr {
        image: PathBuf,
    },
    /// Insert an image link below a line and annotate it with an OCR drawer
    Insert {
        document: PathBuf,
        /// 1-based line the link is inserted below
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        line: u64,
        #[arg(short, long)]
        image: String,
        /// Insert the link only, without OCR
        #[arg(long)]
        no_ocr: bool,
    },
    /// Add an OCR drawer below an existing image link line
    Annotate {
        document: PathBuf,
        /// 1-based line holding the image link
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        line: u64,
        /// Image to recognize (default: the link found on that line)
        #[arg(short, long)]
        image: Option<PathBuf>,
    },
    /// Annotate every image link not yet followed by an OCR drawer
    Scan {
        document: PathBuf,
        /// List the links that would be annotated without touching the file
        #[arg(long)]
        dry_run: bool,
    },
    /// Provision the easyocr helper script and print its path
    InstallScript,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: config_cmd::ConfigAction,
    },
    /// Check that the configured OCR engines can be found
    Doctor,
}

/// Loaded config plus the settings engines are built from.
pub struct Context {
    pub config_path: PathBuf,
    pub config: OrgOcrConfig,
    pub settings: OcrSettings,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));
    let config = load_and_prepare(&config_path).await?;

    init_logger(config.log_dir(), config.log_level());

    let mut settings = config.ocr_settings();
    if let Some(backend) = cli.backend {
        settings.backend = backend;
    }
    let ctx = Context { config_path, config, settings };

    match cli.command {
        Commands::Ocr { image } => ocr_cmd::run_ocr(&ctx, &image).await,
        Commands::Insert { document, line, image, no_ocr } => {
            document_cmd::insert(&ctx, &document, line as usize, &image, !no_ocr).await
        }
        Commands::Annotate { document, line, image } => {
            document_cmd::annotate(&ctx, &document, line as usize, image.as_deref()).await
        }
        Commands::Scan { document, dry_run } => document_cmd::scan(&ctx, &document, dry_run).await,
        Commands::InstallScript => ocr_cmd::install_script(&ctx).await,
        Commands::Config { action } => config_cmd::run(&ctx, action).await,
        Commands::Doctor => doctor_cmd::run(&ctx).await,
    }
}
