use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// Named section of the video, declared in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Hook,
    CardsFace,
    GatherToCenter,
    Shuffle,
    ArrangeMove,
    ArrangeFacedown,
    ArrangeFaceup,
    FlipHold,
    Cards1To3,
    SegmentTransition,
    Cards4To6,
    Closing,
}

/// How a section produces its frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// One image repeated for every frame
    Static,
    /// One computed image per frame index
    Animated,
}

const FULL_SEQUENCE: &[Section] = &[
    Section::Hook,
    Section::CardsFace,
    Section::GatherToCenter,
    Section::Shuffle,
    Section::ArrangeMove,
    Section::ArrangeFacedown,
    Section::ArrangeFaceup,
    Section::FlipHold,
    Section::Cards1To3,
    Section::SegmentTransition,
    Section::Cards4To6,
    Section::Closing,
];

const SHORT_SEQUENCE: &[Section] = &[
    Section::Hook,
    Section::GatherToCenter,
    Section::Shuffle,
    Section::ArrangeMove,
    Section::ArrangeFacedown,
    Section::ArrangeFaceup,
    Section::FlipHold,
    Section::Cards1To3,
    Section::Closing,
];

impl Section {
    pub const ALL: &'static [Section] = FULL_SEQUENCE;

    pub fn name(self) -> &'static str {
        match self {
            Self::Hook => "hook",
            Self::CardsFace => "cards_face",
            Self::GatherToCenter => "gather_to_center",
            Self::Shuffle => "shuffle",
            Self::ArrangeMove => "arrange_move",
            Self::ArrangeFacedown => "arrange_facedown",
            Self::ArrangeFaceup => "arrange_faceup",
            Self::FlipHold => "flip_hold",
            Self::Cards1To3 => "cards_1_3",
            Self::SegmentTransition => "segment_transition",
            Self::Cards4To6 => "cards_4_6",
            Self::Closing => "closing",
        }
    }

    pub fn kind(self) -> SectionKind {
        match self {
            Self::Hook
            | Self::ArrangeFacedown
            | Self::FlipHold
            | Self::Cards1To3
            | Self::Cards4To6 => SectionKind::Static,
            _ => SectionKind::Animated,
        }
    }

    /// Sections of a six-card video
    pub fn full_sequence() -> &'static [Section] {
        FULL_SEQUENCE
    }

    /// Sections of a three-card video: no face reveal, one reading segment
    pub fn short_sequence() -> &'static [Section] {
        SHORT_SEQUENCE
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = TimelineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Section::ALL
            .iter()
            .copied()
            .find(|section| section.name() == s)
            .ok_or_else(|| TimelineError::UnknownSection { name: s.to_string() })
    }
}

/// Video mode, resolved once before any frame is generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Three cards, empathy hook, single reading segment
    Short,
    /// Six cards, face reveal, two reading segments joined by a transition
    Full,
}

impl Mode {
    /// A caller-supplied hook selects the short empathy video
    pub fn resolve(hook_override: Option<&str>) -> Self {
        match hook_override {
            Some(hook) if !hook.trim().is_empty() => Self::Short,
            _ => Self::Full,
        }
    }

    pub fn from_card_count(count: usize) -> Result<Self> {
        match count {
            3 => Ok(Self::Short),
            6 => Ok(Self::Full),
            _ => Err(TimelineError::UnsupportedCardCount { count }.into()),
        }
    }

    pub fn card_count(self) -> usize {
        match self {
            Self::Short => 3,
            Self::Full => 6,
        }
    }

    pub fn sections(self) -> &'static [Section] {
        match self {
            Self::Short => Section::short_sequence(),
            Self::Full => Section::full_sequence(),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Short => f.write_str("short"),
            Self::Full => f.write_str("full"),
        }
    }
}

/// Frame count of a section lasting `seconds` at `fps`
pub fn frame_count(fps: u32, seconds: f64) -> usize {
    ((fps as f64 * seconds).round() as usize).max(1)
}

/// Contiguous run of frames belonging to one section
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBatch {
    pub section: Section,
    /// Index of the batch's first frame in the whole video
    pub start_frame: usize,
    pub frames: usize,
    pub seconds: f64,
}

/// Section name to duration in seconds, ordered by presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct TimingPlan {
    entries: BTreeMap<Section, f64>,
}

impl Default for TimingPlan {
    fn default() -> Self {
        Self::full_default()
    }
}

impl TimingPlan {
    /// Build a plan from `(section, seconds)` pairs. Durations must be positive.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Section, f64)>,
    {
        let mut map = BTreeMap::new();
        for (section, seconds) in entries {
            if !(seconds > 0.0) || !seconds.is_finite() {
                return Err(TimelineError::InvalidDuration {
                    section: section.name().to_string(),
                    seconds,
                }
                .into());
            }
            map.insert(section, seconds);
        }
        Ok(Self { entries: map })
    }

    /// Roughly 27 second six-card video
    pub fn full_default() -> Self {
        use Section::*;
        Self::from_trusted(&[
            (Hook, 1.0),
            (CardsFace, 3.5),
            (GatherToCenter, 1.0),
            (Shuffle, 1.5),
            (ArrangeMove, 1.2),
            (ArrangeFacedown, 3.0),
            (ArrangeFaceup, 1.8),
            (FlipHold, 2.0),
            (Cards1To3, 3.5),
            (SegmentTransition, 1.2),
            (Cards4To6, 3.5),
            (Closing, 4.0),
        ])
    }

    pub fn short_default() -> Self {
        use Section::*;
        Self::from_trusted(&[
            (Hook, 3.5),
            (GatherToCenter, 1.0),
            (Shuffle, 1.5),
            (ArrangeMove, 1.2),
            (ArrangeFacedown, 3.0),
            (ArrangeFaceup, 1.8),
            (FlipHold, 2.0),
            (Cards1To3, 4.0),
            (Closing, 4.0),
        ])
    }

    fn from_trusted(pairs: &[(Section, f64)]) -> Self {
        Self { entries: pairs.iter().copied().collect() }
    }

    pub fn seconds(&self, section: Section) -> Option<f64> {
        self.entries.get(&section).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in presentation order
    pub fn iter(&self) -> impl Iterator<Item = (Section, f64)> + '_ {
        self.entries.iter().map(|(section, seconds)| (*section, *seconds))
    }

    pub fn total_seconds(&self) -> f64 {
        self.entries.values().sum()
    }

    /// Check that every section in `required` is present
    pub fn validate_for(&self, required: &[Section]) -> Result<()> {
        for section in required {
            if !self.entries.contains_key(section) {
                return Err(TimelineError::MissingSection {
                    section: section.name().to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Restrict the plan to the sections of `mode`, failing when one is absent
    pub fn for_mode(&self, mode: Mode) -> Result<Self> {
        self.validate_for(mode.sections())?;
        let entries = mode
            .sections()
            .iter()
            .map(|section| (*section, self.entries[section]))
            .collect();
        Ok(Self { entries })
    }

    /// One batch per section of the plan, in presentation order
    pub fn frame_batches(&self, fps: u32) -> Vec<FrameBatch> {
        let mut start_frame = 0;
        self.iter()
            .map(|(section, seconds)| {
                let frames = frame_count(fps, seconds);
                let batch = FrameBatch { section, start_frame, frames, seconds };
                start_frame += frames;
                batch
            })
            .collect()
    }

    pub fn total_frames(&self, fps: u32) -> usize {
        self.iter().map(|(_, seconds)| frame_count(fps, seconds)).sum()
    }
}

impl TryFrom<BTreeMap<String, f64>> for TimingPlan {
    type Error = TimelineError;

    fn try_from(raw: BTreeMap<String, f64>) -> std::result::Result<Self, Self::Error> {
        let mut entries = BTreeMap::new();
        for (name, seconds) in raw {
            let section: Section = name.parse()?;
            if !(seconds > 0.0) || !seconds.is_finite() {
                return Err(TimelineError::InvalidDuration { section: name, seconds });
            }
            entries.insert(section, seconds);
        }
        Ok(Self { entries })
    }
}

impl From<TimingPlan> for BTreeMap<String, f64> {
    fn from(plan: TimingPlan) -> Self {
        plan.entries
            .into_iter()
            .map(|(section, seconds)| (section.name().to_string(), seconds))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_count_rounds_and_floors_at_one() {
        assert_eq!(frame_count(30, 1.0), 30);
        assert_eq!(frame_count(30, 1.5), 45);
        assert_eq!(frame_count(30, 0.01), 1);
        assert_eq!(frame_count(24, 1.2), 29);
    }

    #[test]
    fn test_three_section_scenario() {
        let plan = TimingPlan::new([
            (Section::Closing, 4.0),
            (Section::Hook, 1.0),
            (Section::Shuffle, 1.5),
        ])
        .unwrap();

        let batches = plan.frame_batches(30);
        let sizes: Vec<usize> = batches.iter().map(|b| b.frames).collect();
        assert_eq!(sizes, vec![30, 45, 120]);
        assert_eq!(batches[1].start_frame, 30);
        assert_eq!(batches[2].start_frame, 75);
        assert!((plan.total_seconds() - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_total_duration_within_one_frame() {
        let plan = TimingPlan::full_default();
        for fps in [24, 25, 30, 60] {
            let encoded = plan.total_frames(fps) as f64 / fps as f64;
            let tolerance = plan.len() as f64 * 0.5 / fps as f64;
            assert!((encoded - plan.total_seconds()).abs() <= tolerance);
        }
    }

    #[test]
    fn test_non_positive_duration_rejected() {
        assert!(TimingPlan::new([(Section::Hook, 0.0)]).is_err());
        assert!(TimingPlan::new([(Section::Hook, -1.0)]).is_err());
        assert!(TimingPlan::new([(Section::Hook, f64::NAN)]).is_err());
    }

    #[test]
    fn test_section_names_round_trip_through_str() {
        for section in Section::ALL {
            assert_eq!(section.name().parse::<Section>().unwrap(), *section);
        }
        assert!("encore".parse::<Section>().is_err());
    }

    #[test]
    fn test_mode_resolution() {
        assert_eq!(Mode::resolve(None), Mode::Full);
        assert_eq!(Mode::resolve(Some("   ")), Mode::Full);
        assert_eq!(Mode::resolve(Some("재회할 수 있을까요?")), Mode::Short);
        assert_eq!(Mode::from_card_count(3).unwrap(), Mode::Short);
        assert!(Mode::from_card_count(9).is_err());
    }

    #[test]
    fn test_short_mode_skips_reveal_and_second_segment() {
        let short = Mode::Short.sections();
        assert!(!short.contains(&Section::CardsFace));
        assert!(!short.contains(&Section::SegmentTransition));
        assert!(!short.contains(&Section::Cards4To6));
        assert_eq!(Mode::Full.sections().len(), 12);
    }

    #[test]
    fn test_for_mode_requires_every_section() {
        let plan = TimingPlan::short_default();
        assert!(plan.for_mode(Mode::Short).is_ok());
        assert!(plan.for_mode(Mode::Full).is_err());

        let trimmed = TimingPlan::full_default().for_mode(Mode::Short).unwrap();
        assert_eq!(trimmed.len(), Mode::Short.sections().len());
    }
}
