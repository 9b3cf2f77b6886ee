use std::path::{Path, PathBuf};
use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{debug, info};

use crate::assets::AssetLibrary;
use crate::cards::{CardCatalog, CardPool, CardSelection, CopyWriter, Deck, DeckLibrary};
use crate::composition::timeline::{FrameBatch, Mode, TimingPlan};
use crate::config::{Config, CopyConfig, LayoutConfig};
use crate::error::Result;
use crate::styles::{ShuffleStyle, StyleRegistry};
use crate::text::FontFace;
use crate::video::VideoParams;

/// Caller choices for one video; everything left `None` is picked at random
/// or taken from the configuration
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub output: PathBuf,
    /// Deck folder; a random `deck_*` folder when absent
    pub deck: Option<PathBuf>,
    pub theme: String,
    /// Draw from the minor arcana suit of the theme
    pub minor: bool,
    /// Empathy hook; its presence selects the short three-card video
    pub hook: Option<String>,
    /// Hook phrase recorded for a full video
    pub hook_title: Option<String>,
    pub music: Option<PathBuf>,
    pub background: Option<PathBuf>,
    pub font: Option<PathBuf>,
    pub shuffle_style: Option<String>,
    pub seed: Option<u64>,
}

/// Everything one render needs, resolved up front and never mutated
#[derive(Debug, Clone)]
pub struct RenderPlan {
    pub mode: Mode,
    pub selection: CardSelection,
    /// Timing restricted to the sections of `mode`
    pub timing: TimingPlan,
    pub style: ShuffleStyle,
    pub deck: Deck,
    pub background: Option<PathBuf>,
    pub font: Arc<FontFace>,
    pub music: Option<PathBuf>,
    pub video: VideoParams,
    pub layout: LayoutConfig,
    pub copy: CopyConfig,
    pub background_color: [u8; 3],
    pub theme: String,
    /// Hook text actually used, if any
    pub hook_text: Option<String>,
    /// Opening screen text of the short video
    pub empathy_message: Option<String>,
    /// One interpretation per drawn card, in draw order
    pub interpretations: Vec<String>,
    pub seed: u64,
}

impl RenderPlan {
    /// Resolve `request` against `config`.
    ///
    /// Fails before any frame work when the deck is missing or incomplete,
    /// the timing plan lacks a section of the mode, or the shuffle style is
    /// unknown.
    pub fn resolve(config: &Config, request: &RenderRequest, copy_writer: &dyn CopyWriter) -> Result<Self> {
        let seed = request.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = SmallRng::seed_from_u64(seed);

        let mode = Mode::resolve(request.hook.as_deref());
        let timing = match mode {
            Mode::Full => config.timing.for_mode(mode)?,
            Mode::Short => config.short_timing.for_mode(mode)?,
        };

        let required = config.assets.required_faces;
        let deck = match &request.deck {
            Some(path) => Deck::open(path, required)?,
            None => DeckLibrary::new(&config.assets.tarot_dir, required).pick(&mut rng)?,
        };

        let pool = CardPool::for_theme(&request.theme, request.minor);
        let selection = CardSelection::draw(pool, mode.card_count(), &mut rng)?;

        let registry = StyleRegistry::new();
        let style = match &request.shuffle_style {
            Some(name) => registry.require(name)?,
            None => registry.pick_random(&mut rng)?,
        };

        let library = AssetLibrary::new(&config.assets);
        let background = request.background.clone().or_else(|| library.random_background(&mut rng));
        let music = request.music.clone().or_else(|| library.random_music(&mut rng));

        let mut font_candidates: Vec<PathBuf> = request.font.iter().cloned().collect();
        font_candidates.extend(config.assets.font_fallbacks.iter().cloned());
        font_candidates.extend(library.random_font(&mut rng));
        let font = FontFace::resolve(&font_candidates);

        let hook = request.hook.as_deref().map(str::trim).filter(|h| !h.is_empty());
        let interpretations = copy_writer.card_interpretations(&selection.cards, &request.theme, hook);
        let empathy_message = match (mode, hook) {
            (Mode::Short, Some(hook)) => Some(copy_writer.empathy_message(hook)),
            _ => None,
        };
        let hook_text = match mode {
            Mode::Short => hook.map(str::to_string),
            Mode::Full => request.hook_title.clone(),
        };

        let plan = Self {
            mode,
            selection,
            timing,
            style,
            deck,
            background,
            font,
            music,
            video: config.video.params(),
            layout: config.layout.clone(),
            copy: config.copy.clone(),
            background_color: config.assets.background_rgb()?,
            theme: request.theme.clone(),
            hook_text,
            empathy_message,
            interpretations,
            seed,
        };

        info!(
            "Plan: {} mode, {} cards from {}, style {}, seed {}",
            plan.mode,
            plan.selection.len(),
            plan.deck.name(),
            plan.style.name,
            plan.seed
        );
        debug!("Cards {:?}, after shuffle {:?}", plan.selection.cards, plan.selection.cards_after_shuffle());
        Ok(plan)
    }

    pub fn frame_batches(&self) -> Vec<FrameBatch> {
        self.timing.frame_batches(self.video.fps)
    }

    pub fn total_frames(&self) -> usize {
        self.timing.total_frames(self.video.fps)
    }

    /// Video length after per-section frame rounding
    pub fn duration(&self) -> f64 {
        self.total_frames() as f64 / self.video.fps.max(1) as f64
    }
}

/// Metadata handed back to the caller once the video exists
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    pub output_path: PathBuf,
    pub mode: Mode,
    pub is_empathy: bool,
    pub num_cards: usize,
    /// Drawn deck indices, in draw order
    pub card_indices: Vec<usize>,
    pub shuffled_order: Vec<usize>,
    /// Deck indices in grid order after the shuffle
    pub cards_after_shuffle: Vec<usize>,
    /// Card names in grid order after the shuffle
    pub card_names: Vec<String>,
    /// Interpretations in draw order, as returned by the copy writer
    pub card_meanings: Vec<String>,
    pub hook_text: Option<String>,
    pub theme: String,
    pub deck: String,
    pub shuffle_style: String,
    pub seed: u64,
    pub duration: f64,
    pub frame_count: usize,
    pub file_size: u64,
    pub created_at: String,
}

impl RenderResult {
    pub fn new(plan: &RenderPlan, output_path: PathBuf, frame_count: usize, file_size: u64) -> Self {
        let cards_after_shuffle = plan.selection.cards_after_shuffle();
        Self {
            output_path,
            mode: plan.mode,
            is_empathy: plan.mode == Mode::Short,
            num_cards: plan.selection.len(),
            card_indices: plan.selection.cards.clone(),
            shuffled_order: plan.selection.shuffled_order.clone(),
            card_names: cards_after_shuffle.iter().map(|&i| CardCatalog::info(i).name.to_string()).collect(),
            cards_after_shuffle,
            card_meanings: plan.interpretations.clone(),
            hook_text: plan.hook_text.clone(),
            theme: plan.theme.clone(),
            deck: plan.deck.name(),
            shuffle_style: plan.style.id.clone(),
            seed: plan.seed,
            duration: frame_count as f64 / plan.video.fps.max(1) as f64,
            frame_count,
            file_size,
            created_at: chrono::Local::now().to_rfc3339(),
        }
    }

    /// `video.mp4` -> `video.json`
    pub fn metadata_path(output: &Path) -> PathBuf {
        output.with_extension("json")
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| crate::error::RenderError::generic(format!("failed to serialize metadata: {}", e)))?;
        std::fs::write(path.as_ref(), json)?;
        debug!("Wrote metadata to {}", path.as_ref().display());
        Ok(())
    }
}
