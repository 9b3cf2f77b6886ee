use std::collections::HashMap;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::cards::Deck;
use crate::error::{AssetError, Result};
use crate::video::Frame;

const FACE_PLACEHOLDER: [u8; 3] = [80, 60, 100];
const BACK_PLACEHOLDER: [u8; 3] = [60, 40, 80];

/// Decode an image file to RGB
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let image = image::open(path).map_err(|e| AssetError::ImageDecode {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    Ok(image.to_rgb8())
}

fn fit(image: &RgbImage, (width, height): (u32, u32)) -> RgbImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, FilterType::Lanczos3)
    }
}

/// Frame-sized background: the image when it decodes, the solid color otherwise
pub fn load_background(path: Option<&Path>, size: (u32, u32), fallback: [u8; 3]) -> Frame {
    if let Some(path) = path {
        match load_rgb(path) {
            Ok(image) => {
                debug!("Background {}", path.display());
                return Frame::new(fit(&image, size));
            }
            Err(e) => warn!("Background unavailable, using solid color: {}", e),
        }
    } else {
        debug!("No background image, using solid color");
    }
    Frame::new_filled(size.0, size.1, fallback)
}

/// Card images of one render, decoded once and resized once per target size
pub struct SceneAssets {
    pub background: Frame,
    grid_back: RgbImage,
    reading_back: RgbImage,
    grid_faces: HashMap<usize, RgbImage>,
    reading_faces: HashMap<usize, RgbImage>,
    grid_placeholder: RgbImage,
    reading_placeholder: RgbImage,
}

impl SceneAssets {
    /// Load the back and the faces of `cards` from `deck`.
    ///
    /// Faces decode in parallel. A face or back that fails to decode is
    /// replaced by a flat placeholder and logged.
    pub fn load(
        deck: &Deck,
        cards: &[usize],
        background: Frame,
        grid_size: (u32, u32),
        reading_size: (u32, u32),
    ) -> Result<Self> {
        let back = match load_rgb(deck.back_path()) {
            Ok(image) => image,
            Err(e) => {
                warn!("Card back unavailable, using a flat back: {}", e);
                RgbImage::from_pixel(grid_size.0, grid_size.1, Rgb(BACK_PLACEHOLDER))
            }
        };

        let face_paths = cards
            .iter()
            .map(|&card| deck.face_path(card).map(|path| (card, path.to_path_buf())))
            .collect::<Result<Vec<_>>>()?;

        let decoded: Vec<(usize, Option<RgbImage>)> = face_paths
            .par_iter()
            .map(|(card, path)| match load_rgb(path) {
                Ok(image) => (*card, Some(image)),
                Err(e) => {
                    warn!("Card {} face unavailable, using a placeholder: {}", card, e);
                    (*card, None)
                }
            })
            .collect();

        let mut grid_faces = HashMap::new();
        let mut reading_faces = HashMap::new();
        for (card, image) in decoded.into_iter() {
            if let Some(image) = image {
                grid_faces.insert(card, fit(&image, grid_size));
                reading_faces.insert(card, fit(&image, reading_size));
            }
        }
        debug!("Decoded {} of {} card faces from {}", grid_faces.len(), cards.len(), deck.name());

        Ok(Self {
            background,
            grid_back: fit(&back, grid_size),
            reading_back: fit(&back, reading_size),
            grid_faces,
            reading_faces,
            grid_placeholder: RgbImage::from_pixel(grid_size.0, grid_size.1, Rgb(FACE_PLACEHOLDER)),
            reading_placeholder: RgbImage::from_pixel(reading_size.0, reading_size.1, Rgb(FACE_PLACEHOLDER)),
        })
    }

    pub fn grid_back(&self) -> &RgbImage {
        &self.grid_back
    }

    pub fn reading_back(&self) -> &RgbImage {
        &self.reading_back
    }

    pub fn grid_face(&self, card: usize) -> &RgbImage {
        self.grid_faces.get(&card).unwrap_or(&self.grid_placeholder)
    }

    pub fn reading_face(&self, card: usize) -> &RgbImage {
        self.reading_faces.get(&card).unwrap_or(&self.reading_placeholder)
    }

    /// Fresh frame showing only the background
    pub fn blank(&self) -> Frame {
        self.background.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::deck::tests::write_deck;
    use tempfile::tempdir;

    #[test]
    fn test_background_fallback() {
        let frame = load_background(None, (8, 4), [26, 10, 46]);
        assert_eq!(frame.size(), (8, 4));
        assert_eq!(frame.get_pixel(7, 3), [26, 10, 46]);

        let dir = tempdir().unwrap();
        let bogus = dir.path().join("bg.png");
        std::fs::write(&bogus, b"nope").unwrap();
        let frame = load_background(Some(&bogus), (8, 4), [1, 2, 3]);
        assert_eq!(frame.get_pixel(0, 0), [1, 2, 3]);
    }

    #[test]
    fn test_background_is_resized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bg.png");
        RgbImage::from_pixel(3, 3, Rgb([9, 9, 9])).save(&path).unwrap();
        let frame = load_background(Some(&path), (12, 20), [0, 0, 0]);
        assert_eq!(frame.size(), (12, 20));
    }

    #[test]
    fn test_faces_loaded_at_both_sizes() {
        let dir = tempdir().unwrap();
        write_deck(dir.path(), 10, true);
        let deck = Deck::open(dir.path(), 10).unwrap();

        let assets = SceneAssets::load(&deck, &[1, 4, 7], Frame::new_filled(16, 16, [0, 0, 0]), (6, 9), (4, 5)).unwrap();
        assert_eq!(assets.grid_face(4).dimensions(), (6, 9));
        assert_eq!(assets.reading_face(7).dimensions(), (4, 5));
        assert_eq!(assets.grid_back().dimensions(), (6, 9));
        assert_eq!(assets.reading_back().dimensions(), (4, 5));
        // not selected: placeholder
        assert_eq!(assets.grid_face(2).get_pixel(0, 0).0, FACE_PLACEHOLDER);
    }

    #[test]
    fn test_card_outside_deck_is_an_error() {
        let dir = tempdir().unwrap();
        write_deck(dir.path(), 10, true);
        let deck = Deck::open(dir.path(), 10).unwrap();
        let result = SceneAssets::load(&deck, &[12], Frame::new_filled(4, 4, [0, 0, 0]), (2, 2), (2, 2));
        assert!(result.is_err());
    }
}
