//! Random pick of optional assets (background, music, font) from the
//! configured directories.

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::deck::has_extension;
use crate::config::AssetsConfig;

pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
pub const MUSIC_EXTENSIONS: &[&str] = &["mp3", "wav", "m4a", "flac", "ogg"];
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf"];

#[derive(Debug, Clone)]
pub struct AssetLibrary {
    backgrounds_dir: PathBuf,
    music_dir: PathBuf,
    fonts_dir: PathBuf,
}

impl AssetLibrary {
    pub fn new(config: &AssetsConfig) -> Self {
        Self {
            backgrounds_dir: config.backgrounds_dir.clone(),
            music_dir: config.music_dir.clone(),
            fonts_dir: config.fonts_dir.clone(),
        }
    }

    pub fn random_background<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        pick_file(&self.backgrounds_dir, IMAGE_EXTENSIONS, rng)
    }

    pub fn random_music<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        pick_file(&self.music_dir, MUSIC_EXTENSIONS, rng)
    }

    pub fn random_font<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<PathBuf> {
        pick_file(&self.fonts_dir, FONT_EXTENSIONS, rng)
    }
}

/// Files directly inside `dir` with one of `extensions`, sorted
pub fn list_files(dir: &Path, extensions: &[&str]) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && has_extension(p, extensions))
        .collect();
    files.sort();
    files
}

/// Uniformly pick one file; `None` when the directory is empty or absent
pub fn pick_file<R: Rng + ?Sized>(dir: &Path, extensions: &[&str], rng: &mut R) -> Option<PathBuf> {
    list_files(dir, extensions).choose(rng).cloned()
}
