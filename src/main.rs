use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tarot_reel::{
    composition::{RenderEngine, RenderRequest, RenderResult},
    config::Config,
    styles::StyleRegistry,
};

#[derive(Parser)]
#[command(
    name = "tarot-reel",
    version,
    about = "Render tarot card-reading short videos",
    long_about = "Tarot-Reel draws cards, animates a shuffle and reveal, lays out the reading and \
                  encodes a vertical video cut to the most energetic part of a music track."
)]
struct Cli {
    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output video path [default: output/tarot_<timestamp>.mp4]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Deck folder (a random deck_* folder when omitted)
    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Reading theme (총운, 애정운, 금전운, 건강운, ...)
    #[arg(short, long, default_value = "총운")]
    theme: String,

    /// Draw from the minor arcana suit of the theme
    #[arg(long)]
    minor: bool,

    /// Empathy hook; makes a three-card short video
    #[arg(long)]
    hook: Option<String>,

    /// Hook phrase recorded in the metadata of a six-card video
    #[arg(long)]
    hook_title: Option<String>,

    /// Music file (a random track from the music folder when omitted)
    #[arg(short, long)]
    music: Option<PathBuf>,

    /// Background image (a random image from the backgrounds folder when omitted)
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Font tried before the configured fallbacks
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Shuffle style (chaos_orbit, scatter_swirl, bounce_mix, spiral_chaos)
    #[arg(short, long)]
    shuffle_style: Option<String>,

    /// Seed for every random choice of the render
    #[arg(long)]
    seed: Option<u64>,

    /// Write render metadata as JSON next to the video
    #[arg(long)]
    metadata: bool,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    dump_config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn default_output() -> PathBuf {
    PathBuf::from("output").join(format!("tarot_{}.mp4", chrono::Local::now().format("%Y%m%d_%H%M%S")))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Tarot-Reel v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path).map_err(|e| anyhow::anyhow!(e.user_message()))?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if let Some(path) = &cli.dump_config {
        config.save_to_file(path).with_context(|| format!("writing {}", path.display()))?;
        info!("Configuration written to {:?}", path);
        return Ok(());
    }

    if let Some(style) = &cli.shuffle_style {
        let registry = StyleRegistry::new();
        if !registry.has_style(style) {
            anyhow::bail!("Unknown shuffle style: {} (available: {})", style, registry.available_styles().join(", "));
        }
    }

    let request = RenderRequest {
        output: cli.output.unwrap_or_else(default_output),
        deck: cli.deck,
        theme: cli.theme,
        minor: cli.minor,
        hook: cli.hook,
        hook_title: cli.hook_title,
        music: cli.music,
        background: cli.background,
        font: cli.font,
        shuffle_style: cli.shuffle_style,
        seed: cli.seed,
    };

    let engine = RenderEngine::new(config);
    let result = match engine.render(&request).await {
        Ok(result) => result,
        Err(e) => {
            error!("{}", e.user_message());
            if e.is_recoverable() {
                warn!("No partial video was kept; running the same command again may succeed");
            }
            return Err(e.into());
        }
    };

    if cli.metadata {
        let path = RenderResult::metadata_path(&result.output_path);
        result.write_json(&path)?;
        info!("Metadata saved to: {:?}", path);
    }

    info!("Cards: {}", result.card_names.join(", "));
    info!("Video saved to: {:?}", result.output_path);
    Ok(())
}
