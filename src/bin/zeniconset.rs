//! Command-line front end: one source image in, the asset set out.
//!
//! ```bash
//! # Write favicon.ico, icon*.png and thumb_*.jpg into ./assets
//! zeniconset logo.png -o assets
//!
//! # Write generated_icons.zip into ./assets instead
//! zeniconset logo.tga -o assets --zip
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use zeniconset::{AssetPipeline, Limits, Unstoppable, archive};

#[derive(Parser, Debug)]
#[command(name = "zeniconset")]
#[command(about = "Generate favicon, icons and thumbnails from one image")]
#[command(version)]
struct Args {
    /// Source image (png, jpg, jpeg or tga)
    input: PathBuf,

    /// Output directory (created if missing)
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Write a single zip archive instead of individual files
    #[arg(long)]
    zip: bool,

    /// Reject sources with more pixels than this
    #[arg(long)]
    max_pixels: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let filename = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .context("input path has no usable file name")?;
    let data = std::fs::read(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let limits = Limits {
        max_pixels: args.max_pixels,
        ..Default::default()
    };
    let set = AssetPipeline::new()
        .with_limits(limits)
        .run(&data, filename, Unstoppable)
        .with_context(|| format!("processing {}", args.input.display()))?;

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    if args.zip {
        let path = args.out.join(archive::ARCHIVE_NAME);
        std::fs::write(&path, set.to_zip()?)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(path = %path.display(), assets = set.len(), "wrote archive");
    } else {
        set.write_to_dir(&args.out)?;
    }

    for asset in &set {
        println!(
            "{:<12} {:>4}x{:<4} {:<13} {} bytes",
            asset.name(),
            asset.width(),
            asset.height(),
            asset.mime().as_str(),
            asset.bytes().len()
        );
    }
    for skipped in &set.skipped {
        eprintln!("skipped {}: {}", skipped.name, skipped.error);
    }
    Ok(())
}
