use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    audio::{build_audio, find_highlight_start, AudioData, AudioLoader},
    cards::{CatalogCopyWriter, CopyWriter},
    composition::plan::{RenderPlan, RenderRequest, RenderResult},
    config::{Config, MusicConfig},
    error::{RenderError, Result, TimelineError, VideoError},
    scene::Scene,
    video::{FrameSink, VideoCompositor},
};

/// Orchestrates one card-reading video from request to encoded file
///
/// The engine follows a fixed pipeline:
/// 1. Plan - draw cards, pick deck, style, font and assets
/// 2. Audio - load the music and cut a clip of the video's length
/// 3. Frames - render every section in order and stream them to ffmpeg
/// 4. Output - move the video into place and report the render metadata
pub struct RenderEngine {
    config: Config,
    copy_writer: Arc<dyn CopyWriter>,
}

impl RenderEngine {
    /// Engine using the offline catalog copy
    pub fn new(config: Config) -> Self {
        Self { config, copy_writer: Arc::new(CatalogCopyWriter) }
    }

    /// Replace the source of card interpretations and empathy text
    pub fn with_copy_writer(mut self, copy_writer: Arc<dyn CopyWriter>) -> Self {
        self.copy_writer = copy_writer;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve a request without rendering anything
    pub fn plan(&self, request: &RenderRequest) -> Result<RenderPlan> {
        self.config.validate()?;
        RenderPlan::resolve(&self.config, request, self.copy_writer.as_ref())
    }

    /// Render `request` to `request.output`.
    ///
    /// Nothing is left at the output path unless the whole video encoded.
    pub async fn render(&self, request: &RenderRequest) -> Result<RenderResult> {
        info!("🔮 Starting tarot reel render");
        info!("   Output: {:?}", request.output);

        // Pipeline Step 1: Plan
        info!("🃏 Step 1: Resolving render plan...");
        let plan = self.plan(request)?;
        if !VideoCompositor::check_ffmpeg_available() {
            return Err(VideoError::EncodingFailed {
                reason: "ffmpeg was not found on PATH. Install ffmpeg and verify `ffmpeg -version` works.".to_string(),
            }
            .into());
        }

        // Pipeline Step 2: Audio
        info!("🎵 Step 2: Preparing audio...");
        let audio = prepare_audio(&plan, &self.config.music).await;

        // Pipeline Step 3: Frames and encoding
        info!("🎬 Step 3: Rendering {} frames ({:.2}s)...", plan.total_frames(), plan.duration());
        let output = request.output.clone();
        let plan = Arc::new(plan);
        let worker_plan = Arc::clone(&plan);
        let encoded = tokio::task::spawn_blocking(move || {
            let compositor = VideoCompositor::new(worker_plan.video.clone());
            let mut sink = compositor.start(&output, audio.as_ref())?;
            render_frames(&worker_plan, &mut sink)?;
            sink.finish()
        })
        .await
        .map_err(|e| RenderError::generic(format!("render worker failed: {}", e)))??;

        // Pipeline Step 4: Output
        let result = RenderResult::new(&plan, encoded.path.clone(), encoded.frame_count, encoded.file_size);
        info!("🎉 Render complete! {} cards, {:.2}s, saved to: {:?}", result.num_cards, result.duration, result.output_path);
        Ok(result)
    }
}

/// Render every section of `plan` in presentation order into `sink`.
///
/// Returns the number of frames written. The first failing section aborts
/// the run.
pub fn render_frames(plan: &RenderPlan, sink: &mut dyn FrameSink) -> Result<usize> {
    let mut scene = Scene::prepare(plan)?;
    let start = sink.frames_written();

    for batch in plan.frame_batches() {
        debug!(
            "Section {} frames {}..{} ({:.2}s)",
            batch.section,
            batch.start_frame,
            batch.start_frame + batch.frames,
            batch.seconds
        );
        scene.render_section(batch.section, batch.frames, sink).map_err(|e| TimelineError::SectionFailed {
            section: batch.section.name().to_string(),
            reason: e.to_string(),
        })?;
    }

    Ok(sink.frames_written() - start)
}

/// Music clip exactly as long as the video, or `None` for a silent video.
///
/// Every failure degrades: an unreadable track gives silence, a failed cut
/// at the highlight retries from the start of the track.
pub async fn prepare_audio(plan: &RenderPlan, music: &MusicConfig) -> Option<AudioData> {
    let Some(path) = plan.music.as_ref() else {
        info!("   No music track, the video will be silent");
        return None;
    };

    let track = match AudioLoader::load(path).await {
        Ok(track) => track,
        Err(e) => {
            warn!("Music {} unavailable, the video will be silent: {}", path.display(), e);
            return None;
        }
    };
    info!("   Loaded: {:.1}s, {} Hz, {} channels", track.duration, track.sample_rate, track.channels);

    let needed = plan.duration();
    let offset = if music.auto_highlight {
        find_highlight_start(&track, needed, music.window_sec)
    } else {
        music.start_offset_sec
    };
    debug!("Audio clip {:.2}s from {:.2}s", needed, offset);

    match build_audio(&track, needed, offset) {
        Ok(clip) => Some(clip),
        Err(e) => {
            warn!("Audio cut at {:.2}s failed, retrying from 0s: {}", offset, e);
            match build_audio(&track, needed, 0.0) {
                Ok(clip) => Some(clip),
                Err(e) => {
                    warn!("Audio unavailable, the video will be silent: {}", e);
                    None
                }
            }
        }
    }
}
