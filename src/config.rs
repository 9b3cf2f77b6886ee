use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    composition::{Section, TimingPlan},
    error::{ConfigError, Result},
    video::VideoParams,
};

/// Main configuration for a tarot-reel render
///
/// A render receives an immutable snapshot of this value; nothing in the
/// library reads configuration from global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output resolution, frame rate and encoder settings
    pub video: VideoConfig,

    /// Section durations for the six-card (full) video
    pub timing: TimingPlan,

    /// Section durations for the three-card (short) video
    pub short_timing: TimingPlan,

    /// Geometry shared by the scene generators
    pub layout: LayoutConfig,

    /// Asset directories and fallbacks
    pub assets: AssetsConfig,

    /// Music start offset behaviour
    pub music: MusicConfig,

    /// On-screen strings and colors
    pub copy: CopyConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            video: VideoConfig::default(),
            timing: TimingPlan::full_default(),
            short_timing: TimingPlan::short_default(),
            layout: LayoutConfig::default(),
            assets: AssetsConfig::default(),
            music: MusicConfig::default(),
            copy: CopyConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.video.validate()?;
        self.timing.validate_for(Section::full_sequence())?;
        self.short_timing.validate_for(Section::short_sequence())?;
        self.layout.validate()?;
        self.assets.validate()?;
        self.music.validate()?;
        self.copy.validate()?;
        Ok(())
    }
}

/// Output video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    pub width: u32,
    pub height: u32,
    pub fps: u32,

    /// Encoder passed to ffmpeg (`-c:v`)
    pub codec: String,

    /// Encoder speed preset: ultrafast .. slow
    pub preset: String,

    /// Encoder worker threads, 0 = one per CPU
    pub threads: usize,

    /// Constant rate factor
    pub crf: u8,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            codec: "libx264".to_string(),
            preset: "fast".to_string(),
            threads: 0,
            crf: 23,
        }
    }
}

const PRESETS: &[&str] = &[
    "ultrafast", "superfast", "veryfast", "faster", "fast", "medium", "slow", "slower", "veryslow",
];

impl VideoConfig {
    /// Thread count actually handed to the encoder
    pub fn encode_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }

    pub fn params(&self) -> VideoParams {
        VideoParams {
            width: self.width,
            height: self.height,
            fps: self.fps,
            codec: self.codec.clone(),
            preset: self.preset.clone(),
            threads: self.encode_threads(),
            crf: self.crf,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.width < 64 || self.height < 64 {
            return Err(ConfigError::InvalidValue {
                key: "video.resolution".to_string(),
                value: format!("{}x{}", self.width, self.height)
            }.into());
        }

        // yuv420p needs even dimensions
        if self.width % 2 != 0 || self.height % 2 != 0 {
            return Err(ConfigError::InvalidValue {
                key: "video.resolution".to_string(),
                value: format!("{}x{}", self.width, self.height)
            }.into());
        }

        if self.fps == 0 || self.fps > 120 {
            return Err(ConfigError::InvalidValue {
                key: "video.fps".to_string(),
                value: self.fps.to_string()
            }.into());
        }

        if !PRESETS.contains(&self.preset.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "video.preset".to_string(),
                value: self.preset.clone()
            }.into());
        }

        if self.crf > 51 {
            return Err(ConfigError::InvalidValue {
                key: "video.crf".to_string(),
                value: self.crf.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Scene geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between grid cells (px)
    pub gap: u32,

    /// Fraction of the frame width and height the grid may occupy
    pub grid_fraction: f32,

    /// Cell height scale for the single-row three card grid
    pub short_height_scale: f32,

    /// Badge diameter on the face-down pick screen
    pub pick_badge_diameter: u32,

    /// Badge diameter on the hold and transition screens
    pub hold_badge_diameter: u32,

    pub reading_card_width: u32,
    pub reading_card_x: u32,
    pub reading_margin: u32,

    /// Horizontal slide distance of reading text during a transition
    pub slide_distance: f32,

    /// Per-card departure delay of the gather animation (s)
    pub gather_stagger: f32,

    /// Per-card departure delay of the fly-to-grid animation (s)
    pub arrange_stagger: f32,

    /// Per-card delay of the staggered reveal, in eased progress units
    pub flip_stagger: f32,

    /// Per-card duration of the staggered reveal, in eased progress units
    pub flip_span: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: 28,
            grid_fraction: 0.82,
            short_height_scale: 0.7,
            pick_badge_diameter: 76,
            hold_badge_diameter: 80,
            reading_card_width: 225,
            reading_card_x: 90,
            reading_margin: 100,
            slide_distance: 450.0,
            gather_stagger: 0.12,
            arrange_stagger: 0.14,
            flip_stagger: 0.08,
            flip_span: 0.55,
        }
    }
}

impl LayoutConfig {
    fn validate(&self) -> Result<()> {
        if !(0.1..=1.0).contains(&self.grid_fraction) {
            return Err(ConfigError::InvalidValue {
                key: "layout.grid_fraction".to_string(),
                value: self.grid_fraction.to_string()
            }.into());
        }

        if !(0.1..=1.0).contains(&self.short_height_scale) {
            return Err(ConfigError::InvalidValue {
                key: "layout.short_height_scale".to_string(),
                value: self.short_height_scale.to_string()
            }.into());
        }

        if self.flip_span <= 0.0 || self.flip_stagger < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.flip_schedule".to_string(),
                value: format!("stagger={} span={}", self.flip_stagger, self.flip_span)
            }.into());
        }

        if self.gather_stagger < 0.0 || self.arrange_stagger < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.stagger".to_string(),
                value: format!("{}/{}", self.gather_stagger, self.arrange_stagger)
            }.into());
        }

        if self.reading_card_width == 0 {
            return Err(ConfigError::InvalidValue {
                key: "layout.reading_card_width".to_string(),
                value: self.reading_card_width.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Folder holding `deck_*` sub-folders
    pub tarot_dir: PathBuf,

    pub fonts_dir: PathBuf,

    /// Fonts tried in order; the first existing, parseable file wins
    pub font_fallbacks: Vec<PathBuf>,

    pub backgrounds_dir: PathBuf,
    pub music_dir: PathBuf,

    /// Solid background used when no background image is available
    pub background_color: String,

    /// Minimum number of face images a deck must hold
    pub required_faces: usize,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let fonts = PathBuf::from("assets/fonts");
        Self {
            tarot_dir: PathBuf::from("assets/tarot"),
            font_fallbacks: [
                "GmarketSansBold.otf",
                "GmarketSansTTFBold.ttf",
                "Pretendard-ExtraBold.otf",
                "NanumSquareRoundBold.ttf",
                "NanumSquareRoundR.ttf",
                "NanumGothicBold.ttf",
                "NanumGothic.ttf",
            ]
            .iter()
            .map(|name| fonts.join(name))
            .collect(),
            fonts_dir: fonts,
            backgrounds_dir: PathBuf::from("assets/images"),
            music_dir: PathBuf::from("assets/music"),
            background_color: "#1a0a2e".to_string(),
            required_faces: 78,
        }
    }
}

impl AssetsConfig {
    /// Background fallback color as RGB
    pub fn background_rgb(&self) -> Result<[u8; 3]> {
        parse_hex_color(&self.background_color).ok_or_else(|| {
            ConfigError::InvalidValue {
                key: "assets.background_color".to_string(),
                value: self.background_color.clone(),
            }
            .into()
        })
    }

    fn validate(&self) -> Result<()> {
        self.background_rgb()?;

        if self.required_faces == 0 {
            return Err(ConfigError::InvalidValue {
                key: "assets.required_faces".to_string(),
                value: self.required_faces.to_string()
            }.into());
        }

        Ok(())
    }
}

/// Music placement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicConfig {
    /// Start playback at the loudest window of the track
    pub auto_highlight: bool,

    /// Fixed start offset used when `auto_highlight` is off
    pub start_offset_sec: f64,

    /// RMS window length for highlight detection
    pub window_sec: f64,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            auto_highlight: true,
            start_offset_sec: 0.0,
            window_sec: 2.0,
        }
    }
}

impl MusicConfig {
    fn validate(&self) -> Result<()> {
        if self.start_offset_sec < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "music.start_offset_sec".to_string(),
                value: self.start_offset_sec.to_string()
            }.into());
        }

        if self.window_sec <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "music.window_sec".to_string(),
                value: self.window_sec.to_string()
            }.into());
        }

        Ok(())
    }
}

/// On-screen copy and palette
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    /// Blinking caption over the initial face-up cards
    pub face_caption: String,

    pub pick_message_short: String,
    pub pick_message_full: String,

    pub closing_lines: Vec<String>,
    pub closing_subline: String,

    /// Word inside the closing lines that blinks
    pub blink_word: String,

    /// Reading row: label before the card name
    pub name_label: String,

    /// Reading row: label before the meaning
    pub meaning_label: String,

    /// Suffix appended to name and meaning values
    pub value_suffix: String,

    pub detail_lines: Vec<String>,

    /// Words highlighted on the hook screen
    pub keywords: Vec<String>,

    pub text_color: [u8; 3],
    pub highlight_color: [u8; 3],
    pub blink_color: [u8; 3],
    pub stroke_color: [u8; 3],
}

impl Default for CopyConfig {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        Self {
            face_caption: "이 카드를 사용해볼게요".to_string(),
            pick_message_short: "1, 2, 3번 카드 중\n하나를 선택하세요".to_string(),
            pick_message_full: "여기에서 카드를\n한장 선택하세요!".to_string(),
            closing_lines: strings(&[
                "당신이 고른 카드는",
                "몇번인가요?",
                "댓글로 남겨주세요",
                "오늘도 좋은 하루 되세요.",
                "다음 영상에서 만나요",
            ]),
            closing_subline: "구독과 좋아요 부탁드려요".to_string(),
            blink_word: "댓글".to_string(),
            name_label: "이 카드는".to_string(),
            meaning_label: "의미는".to_string(),
            value_suffix: "입니다.".to_string(),
            detail_lines: strings(&["이 카드에 자세한 설명은", "더보기에 적어 두었습니다"]),
            keywords: strings(&[
                "궁금하시면", "궁금하신가요", "골라보세요", "선택하세요",
                "궁금", "골라", "선택", "진짜", "진심", "응원", "시기", "편이", "구별",
                "썸", "어장", "재회", "미련", "마음", "행동", "상대방", "솔직", "카드",
            ]),
            text_color: [255, 255, 255],
            highlight_color: [255, 215, 0],
            blink_color: [255, 255, 0],
            stroke_color: [0, 0, 0],
        }
    }
}

impl CopyConfig {
    fn validate(&self) -> Result<()> {
        if self.closing_lines.is_empty() {
            return Err(ConfigError::MissingKey {
                key: "copy.closing_lines".to_string()
            }.into());
        }

        Ok(())
    }
}

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        config.save_to_file(&config_path).unwrap();
        let loaded = Config::from_file(&config_path).unwrap();

        assert_eq!(config.video.fps, loaded.video.fps);
        assert_eq!(config.timing, loaded.timing);
        assert_eq!(config.short_timing, loaded.short_timing);
        assert_eq!(config.copy.keywords, loaded.copy.keywords);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("[video]\nfps = 24\n").unwrap();
        assert_eq!(config.video.fps, 24);
        assert_eq!(config.video.width, 1080);
        assert_eq!(config.assets.required_faces, 78);
    }

    #[test]
    fn test_timing_table_in_toml() {
        let toml_src = r#"
[timing]
hook = 2.0
cards_face = 3.5
gather_to_center = 1
shuffle = 1.5
arrange_move = 1.2
arrange_facedown = 3
arrange_faceup = 1.8
flip_hold = 2
cards_1_3 = 3.5
segment_transition = 1.2
cards_4_6 = 3.5
closing = 4
"#;
        let config: Config = toml::from_str(toml_src).unwrap();
        assert_eq!(config.timing.seconds(Section::Hook), Some(2.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.video.preset = "warp".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.video.width = 1081;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.assets.background_color = "purple".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_encode_threads_auto() {
        let mut video = VideoConfig::default();
        assert!(video.encode_threads() >= 1);
        video.threads = 6;
        assert_eq!(video.encode_threads(), 6);
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1a0a2e"), Some([26, 10, 46]));
        assert_eq!(parse_hex_color("FFD700"), Some([255, 215, 0]));
        assert_eq!(parse_hex_color("#12345"), None);
    }
}
