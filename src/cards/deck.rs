use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{DeckError, Result};

const FACE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
const BACK_FILE: &str = "back.png";

/// A deck folder: face images addressable by index plus one back image
#[derive(Debug, Clone)]
pub struct Deck {
    root: PathBuf,
    faces: Vec<PathBuf>,
    back: PathBuf,
}

impl Deck {
    /// Open a deck folder, requiring `required` faces and `back.png`.
    ///
    /// Faces are ordered by the first run of digits in their file stem
    /// (`00_fool.png`, `01.jpg`, ...); files without digits sort last.
    pub fn open<P: AsRef<Path>>(path: P, required: usize) -> Result<Self> {
        let root = path.as_ref().to_path_buf();
        let display = root.display().to_string();

        if !root.is_dir() {
            return Err(DeckError::NotFound { path: display }.into());
        }

        let mut faces: Vec<PathBuf> = std::fs::read_dir(&root)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_extension(p, FACE_EXTENSIONS))
            .filter(|p| !stem(p).eq_ignore_ascii_case("back"))
            .collect();

        faces.sort_by(|a, b| {
            face_number(&stem(a))
                .cmp(&face_number(&stem(b)))
                .then_with(|| a.file_name().cmp(&b.file_name()))
        });

        if faces.len() < required {
            return Err(DeckError::InsufficientFaces {
                path: display,
                found: faces.len(),
                required,
            }
            .into());
        }

        let back = root.join(BACK_FILE);
        if !back.is_file() {
            return Err(DeckError::MissingBack { path: display }.into());
        }

        debug!("Opened deck {} with {} faces", root.display(), faces.len());
        Ok(Self { root, faces, back })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string())
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn face_path(&self, index: usize) -> Result<&Path> {
        self.faces
            .get(index)
            .map(PathBuf::as_path)
            .ok_or_else(|| DeckError::IndexOutOfRange { index, len: self.faces.len() }.into())
    }

    pub fn back_path(&self) -> &Path {
        &self.back
    }
}

/// Scans a tarot directory for usable `deck_*` folders
#[derive(Debug, Clone)]
pub struct DeckLibrary {
    root: PathBuf,
    required: usize,
}

impl DeckLibrary {
    pub fn new<P: Into<PathBuf>>(root: P, required: usize) -> Self {
        Self { root: root.into(), required }
    }

    /// Usable decks, sorted by folder name
    pub fn available(&self) -> Vec<Deck> {
        let Ok(entries) = std::fs::read_dir(&self.root) else {
            return Vec::new();
        };

        let mut folders: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_dir() && stem_of_dir(p).starts_with("deck_"))
            .collect();
        folders.sort();

        folders
            .into_iter()
            .filter_map(|folder| match Deck::open(&folder, self.required) {
                Ok(deck) => Some(deck),
                Err(e) => {
                    debug!("Skipping {}: {}", folder.display(), e);
                    None
                }
            })
            .collect()
    }

    /// Pick one usable deck at random
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deck> {
        let deck = self
            .available()
            .choose(rng)
            .cloned()
            .ok_or_else(|| DeckError::NoneAvailable { path: self.root.display().to_string() })?;
        info!("Using deck {}", deck.name());
        Ok(deck)
    }
}

fn stem(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

fn stem_of_dir(path: &Path) -> String {
    path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
}

pub(crate) fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| allowed.iter().any(|a| a.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// First run of ASCII digits in `stem`; `u32::MAX` when there is none
fn face_number(stem: &str) -> u32 {
    let digits: String = stem
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(u32::MAX)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::RenderError;
    use image::{Rgb, RgbImage};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use tempfile::tempdir;

    /// Write a deck of `faces` tiny solid-colour PNGs plus a back image
    pub(crate) fn write_deck(dir: &Path, faces: usize, with_back: bool) {
        std::fs::create_dir_all(dir).unwrap();
        for i in 0..faces {
            let shade = (i * 3 % 256) as u8;
            RgbImage::from_pixel(8, 12, Rgb([shade, 40, 200 - shade / 2]))
                .save(dir.join(format!("{:02}_card.png", i)))
                .unwrap();
        }
        if with_back {
            RgbImage::from_pixel(8, 12, Rgb([120, 20, 20])).save(dir.join("back.png")).unwrap();
        }
    }

    #[test]
    fn test_faces_sorted_by_leading_number() {
        let dir = tempdir().unwrap();
        write_deck(dir.path(), 12, true);

        let deck = Deck::open(dir.path(), 12).unwrap();
        assert_eq!(deck.len(), 12);
        assert!(deck.face_path(2).unwrap().ends_with("02_card.png"));
        assert!(deck.face_path(10).unwrap().ends_with("10_card.png"));
        assert!(deck.face_path(12).is_err());
    }

    #[test]
    fn test_insufficient_deck_fails_fast() {
        let dir = tempdir().unwrap();
        write_deck(dir.path(), 70, true);

        match Deck::open(dir.path(), 78) {
            Err(RenderError::Deck(DeckError::InsufficientFaces { found, required, .. })) => {
                assert_eq!(found, 70);
                assert_eq!(required, 78);
            }
            other => panic!("expected insufficient deck, got {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_missing_back_is_fatal() {
        let dir = tempdir().unwrap();
        write_deck(dir.path(), 5, false);
        assert!(matches!(
            Deck::open(dir.path(), 5),
            Err(RenderError::Deck(DeckError::MissingBack { .. }))
        ));
    }

    #[test]
    fn test_library_only_offers_complete_decks() {
        let dir = tempdir().unwrap();
        write_deck(&dir.path().join("deck_full"), 6, true);
        write_deck(&dir.path().join("deck_short"), 3, true);
        write_deck(&dir.path().join("not_a_deck"), 6, true);

        let library = DeckLibrary::new(dir.path(), 6);
        let decks = library.available();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].name(), "deck_full");

        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(library.pick(&mut rng).unwrap().name(), "deck_full");
    }

    #[test]
    fn test_empty_library() {
        let dir = tempdir().unwrap();
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(DeckLibrary::new(dir.path(), 78).pick(&mut rng).is_err());
    }

    #[test]
    fn test_face_number() {
        assert_eq!(face_number("00_fool"), 0);
        assert_eq!(face_number("card21"), 21);
        assert_eq!(face_number("fool"), u32::MAX);
    }
}
