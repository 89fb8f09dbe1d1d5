use std::path::PathBuf;

use anyhow::Context;
use brandkit_scraper::{extract_palette, BrandScraper, SwatchKind};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brandkit")]
#[command(about = "Extract brand colors, logo, font and products from a storefront page")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a page and print the result as JSON
    Scrape {
        /// Page URL; `https://` is assumed when no scheme is given
        url: String,
        /// Print single-line JSON
        #[arg(long)]
        compact: bool,
    },
    /// Print the palette of a local image file
    Palette {
        /// Path to a PNG, JPEG, GIF or WebP file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = brandkit_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape { url, compact } => {
            let scraper = BrandScraper::new(config.pipeline_settings())?;
            let result = scraper
                .scrape(&url)
                .await
                .with_context(|| format!("failed to scrape {url}"))?;
            let json = if compact {
                serde_json::to_string(&result)?
            } else {
                serde_json::to_string_pretty(&result)?
            };
            println!("{json}");
        }
        Commands::Palette { path } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let palette = extract_palette(&bytes)
                .with_context(|| format!("failed to decode {}", path.display()))?;
            if palette.is_empty() {
                println!("no usable colors in {}", path.display());
            }
            for kind in SwatchKind::DISPLAY_ORDER {
                if let Some(swatch) = palette.get(kind) {
                    println!(
                        "{:<14} {}  (population {})",
                        kind.as_str(),
                        swatch.rgb.to_hex(),
                        swatch.population
                    );
                }
            }
        }
    }

    Ok(())
}
