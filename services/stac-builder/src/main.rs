//! STAC collection builder.
//!
//! Reads a granule manifest produced by a raster-introspection step,
//! aggregates the collection extent, and writes STAC Collection and Item
//! documents (optionally uploading them to object storage).

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use stac_builder::config::BuilderConfig;
use stac_builder::{manifest, pipeline};

#[derive(Parser, Debug)]
#[command(name = "stac-builder")]
#[command(about = "Build STAC collections from raster granule metadata")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/stac-builder/config.yaml")]
    config: String,

    /// Granule manifest (NDJSON, one ItemMetadata record per line)
    #[arg(short, long)]
    manifest: String,

    /// Override the configured output folder
    #[arg(short, long)]
    output_folder: Option<String>,

    /// Skip the object storage upload even if configured
    #[arg(long)]
    skip_upload: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting STAC collection builder");

    let mut config = BuilderConfig::from_yaml(&args.config)?;
    if let Some(folder) = args.output_folder {
        config.output.folder = Some(folder.into());
    }
    if args.skip_upload {
        config.upload.s3_upload = false;
    }

    let items = manifest::read_manifest(&args.manifest)?;

    let summary = pipeline::run(&config, items).await?;

    info!(
        collection = %summary.collection_id,
        items = summary.item_count,
        files = summary.files_written,
        folder = %summary.output_folder.display(),
        uploaded_bytes = summary.uploaded_bytes,
        "Collection build completed"
    );

    Ok(())
}
