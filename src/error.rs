use thiserror::Error;

/// Main error type for the tarot-reel library
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Audio processing error: {0}")]
    Audio(#[from] AudioError),

    #[error("Video processing error: {0}")]
    Video(#[from] VideoError),

    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Deck errors are always fatal: the render cannot start without a full deck
#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Deck folder not found: {path}")]
    NotFound { path: String },

    #[error("Insufficient deck at {path}: found {found} face images, {required} required")]
    InsufficientFaces {
        path: String,
        found: usize,
        required: usize,
    },

    #[error("Deck at {path} has no back image (back.png)")]
    MissingBack { path: String },

    #[error("No usable deck found under {path}")]
    NoneAvailable { path: String },

    #[error("Card index {index} is outside the deck (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Image and font asset errors
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to decode image {path}: {reason}")]
    ImageDecode { path: String, reason: String },

    #[error("Failed to parse font {path}: {reason}")]
    FontParse { path: String, reason: String },
}

/// Audio-specific errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Audio analysis failed: {reason}")]
    AnalysisFailed { reason: String },

    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },

    #[error("Failed to write audio clip {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Video encoding and muxing errors
#[derive(Error, Debug)]
pub enum VideoError {
    #[error("Video encoding failed: {reason}")]
    EncodingFailed { reason: String },

    #[error("Frame size {actual:?} does not match the encoder ({expected:?})")]
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Invalid video parameters: {details}")]
    InvalidParameters { details: String },
}

/// Timeline and section planning errors
#[derive(Error, Debug)]
pub enum TimelineError {
    #[error("Unknown section name: {name}")]
    UnknownSection { name: String },

    #[error("Section {section} is required but missing from the timing plan")]
    MissingSection { section: String },

    #[error("Section {section} has a non-positive duration ({seconds}s)")]
    InvalidDuration { section: String, seconds: f64 },

    #[error("Unsupported card count {count}: only 3 (short) and 6 (full) are supported")]
    UnsupportedCardCount { count: usize },

    #[error("Card pool has {available} cards, {requested} requested")]
    PoolTooSmall { available: usize, requested: usize },

    #[error("Unknown shuffle style: {name}")]
    UnknownShuffleStyle { name: String },

    #[error("Section {section} failed: {reason}")]
    SectionFailed { section: String, reason: String },
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using RenderError
pub type Result<T> = std::result::Result<T, RenderError>;

impl RenderError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Check if this error is recoverable (can be retried)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Video(VideoError::EncodingFailed { .. }) => true,
            _ => false,
        }
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Deck(DeckError::InsufficientFaces { path, found, required }) => {
                format!(
                    "Insufficient deck: '{}' holds {} card faces but {} are required.",
                    path, found, required
                )
            }
            Self::Deck(DeckError::MissingBack { path }) => {
                format!("The deck '{}' is missing its back image (back.png).", path)
            }
            Self::Deck(DeckError::NoneAvailable { path }) => {
                format!("No tarot deck found in '{}'. Download a deck first.", path)
            }
            Self::Video(VideoError::EncodingFailed { .. }) => {
                "Video encoding failed. Please check that ffmpeg is installed and on PATH.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_deck_message() {
        let err: RenderError = DeckError::InsufficientFaces {
            path: "decks/deck_a".to_string(),
            found: 70,
            required: 78,
        }
        .into();

        assert!(err.to_string().contains("Insufficient deck"));
        assert!(err.user_message().contains("70"));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_bad_video_parameters_are_not_recoverable() {
        let err: RenderError = VideoError::InvalidParameters { details: "63x96".to_string() }.into();
        assert!(!err.is_recoverable());

        let err: RenderError = VideoError::EncodingFailed { reason: "broken pipe".to_string() }.into();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_errors_are_recoverable() {
        let err: RenderError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(err.is_recoverable());
    }
}
