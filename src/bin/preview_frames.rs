// Renders sample frames of every section as PNG files, without ffmpeg

use std::path::PathBuf;

use clap::Parser;
use tarot_reel::{
    composition::{RenderEngine, RenderRequest},
    config::Config,
    scene::Scene,
};

#[derive(Parser)]
#[command(name = "preview_frames", about = "Save the first, middle and last frame of every section")]
struct Args {
    /// Directory receiving the PNG files
    #[arg(short, long, default_value = "output/preview")]
    out: PathBuf,

    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long)]
    deck: Option<PathBuf>,

    /// Empathy hook; previews the three-card video
    #[arg(long)]
    hook: Option<String>,

    #[arg(long, default_value = "총운")]
    theme: String,

    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    println!("🔮 Tarot-Reel frame preview");

    // Step 1: plan
    println!("\n1. Resolving plan...");
    let config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let engine = RenderEngine::new(config);
    let request = RenderRequest {
        deck: args.deck,
        theme: args.theme,
        hook: args.hook,
        seed: Some(args.seed),
        ..Default::default()
    };
    let plan = match engine.plan(&request) {
        Ok(plan) => plan,
        Err(e) => {
            println!("   ❌ {}", e.user_message());
            return Err(e.into());
        }
    };
    println!("   ✅ {} mode, deck {}, style {}", plan.mode, plan.deck.name(), plan.style.name);
    println!("   Cards after shuffle: {:?}", plan.selection.cards_after_shuffle());

    // Step 2: scene
    println!("\n2. Loading scene assets...");
    let mut scene = Scene::prepare(&plan)?;
    let (width, height) = scene.size();
    println!("   ✅ {}x{}, font {}", width, height, plan.font.path().map(|p| p.display().to_string()).unwrap_or_else(|| "built-in".to_string()));

    // Step 3: frames
    println!("\n3. Rendering sample frames...");
    std::fs::create_dir_all(&args.out)?;
    let mut saved = 0;
    for (n, batch) in plan.frame_batches().iter().enumerate() {
        let mut samples = vec![0, batch.frames / 2, batch.frames - 1];
        samples.dedup();
        for index in samples {
            let frame = scene.render_frame(batch.section, index, batch.frames);
            let path = args.out.join(format!("{:02}_{}_{:03}.png", n, batch.section, index));
            frame.save_png(&path)?;
            saved += 1;
        }
        println!("   {:<20} {:>4} frames", batch.section, batch.frames);
    }

    println!("\n🎉 Saved {} frames to {:?}", saved, args.out);
    Ok(())
}
