use std::path::{Path, PathBuf};
use std::sync::Arc;

use fontdue::{Font, FontSettings};
use tracing::{debug, info, warn};

use crate::error::{AssetError, Result};
use crate::text::wrap::TextMeasure;

/// Coverage bitmap of one rasterized glyph
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Offset of the bitmap's left edge from the pen position
    pub xmin: i32,
    /// Offset of the bitmap's top edge below the baseline (negative = above)
    pub top: i32,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// Font used for every piece of on-screen text in one render
pub enum FontFace {
    Loaded { font: Font, path: PathBuf },
    /// Fixed-advance face drawing hollow boxes; used when no font file loads
    Builtin,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FontFace::Loaded { path, .. } => f.debug_struct("Loaded").field("path", path).finish(),
            FontFace::Builtin => f.write_str("Builtin"),
        }
    }
}

impl FontFace {
    /// Parse a TTF/OTF file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| AssetError::FontParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|e| AssetError::FontParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Ok(FontFace::Loaded { font, path: path.to_path_buf() })
    }

    /// First candidate that exists and parses, otherwise the built-in face
    pub fn resolve<P: AsRef<Path>>(candidates: &[P]) -> Arc<FontFace> {
        for candidate in candidates {
            let candidate = candidate.as_ref();
            if !candidate.is_file() {
                debug!("Font candidate {} not found", candidate.display());
                continue;
            }

            match FontFace::load(candidate) {
                Ok(face) => {
                    info!("Using font {}", candidate.display());
                    return Arc::new(face);
                }
                Err(e) => warn!("Skipping font {}: {}", candidate.display(), e),
            }
        }

        warn!("No usable font among {} candidates, using built-in box glyphs", candidates.len());
        Arc::new(FontFace::Builtin)
    }

    pub fn builtin() -> Arc<FontFace> {
        Arc::new(FontFace::Builtin)
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, FontFace::Builtin)
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            FontFace::Loaded { path, .. } => Some(path),
            FontFace::Builtin => None,
        }
    }

    /// Distance from the top of a line box to the baseline
    pub fn ascent(&self, size: f32) -> f32 {
        match self {
            FontFace::Loaded { font, .. } => font
                .horizontal_line_metrics(size)
                .map_or(size * 0.8, |m| m.ascent),
            FontFace::Builtin => size * 0.8,
        }
    }

    /// Height of one line box, without extra spacing
    pub fn line_height(&self, size: f32) -> f32 {
        match self {
            FontFace::Loaded { font, .. } => font
                .horizontal_line_metrics(size)
                .map_or(size, |m| m.ascent - m.descent),
            FontFace::Builtin => size,
        }
    }

    pub fn advance(&self, c: char, size: f32) -> f32 {
        match self {
            FontFace::Loaded { font, .. } => font.metrics(c, size).advance_width,
            FontFace::Builtin => builtin_advance(c, size),
        }
    }

    /// Rendered width of `text` in whole pixels
    pub fn text_width(&self, text: &str, size: f32) -> u32 {
        let width: f32 = text.chars().map(|c| self.advance(c, size)).sum();
        width.ceil().max(0.0) as u32
    }

    pub fn rasterize(&self, c: char, size: f32) -> GlyphBitmap {
        match self {
            FontFace::Loaded { font, .. } => {
                let (metrics, coverage) = font.rasterize(c, size);
                GlyphBitmap {
                    width: metrics.width,
                    height: metrics.height,
                    xmin: metrics.xmin,
                    top: -(metrics.height as i32 + metrics.ymin),
                    advance: metrics.advance_width,
                    coverage,
                }
            }
            FontFace::Builtin => builtin_glyph(c, size),
        }
    }

    /// Measure text at a fixed size
    pub fn sized(&self, size: f32) -> SizedFont<'_> {
        SizedFont { face: self, size }
    }
}

/// A face paired with a pixel size, usable for width-constrained wrapping
#[derive(Debug, Clone, Copy)]
pub struct SizedFont<'a> {
    face: &'a FontFace,
    size: f32,
}

impl TextMeasure for SizedFont<'_> {
    fn text_width(&self, text: &str) -> u32 {
        self.face.text_width(text, self.size)
    }
}

fn builtin_advance(c: char, size: f32) -> f32 {
    if c.is_ascii() {
        (size * 0.6).round()
    } else {
        size.round()
    }
}

fn builtin_glyph(c: char, size: f32) -> GlyphBitmap {
    let advance = builtin_advance(c, size);
    if c.is_whitespace() {
        return GlyphBitmap { width: 0, height: 0, xmin: 0, top: 0, advance, coverage: Vec::new() };
    }

    let width = (advance * 0.8).max(1.0) as usize;
    let height = (size * 0.7).max(1.0) as usize;
    let thickness = ((size / 12.0) as usize).max(1);
    let mut coverage = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let edge = x < thickness || y < thickness || x + thickness >= width || y + thickness >= height;
            if edge {
                coverage[y * width + x] = 255;
            }
        }
    }

    GlyphBitmap {
        width,
        height,
        xmin: ((advance - width as f32) / 2.0) as i32,
        top: -(height as i32),
        advance,
        coverage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::wrap::wrap_to_width;
    use tempfile::tempdir;

    #[test]
    fn test_builtin_metrics() {
        let face = FontFace::Builtin;
        assert_eq!(face.text_width("ab", 10.0), 12);
        assert_eq!(face.text_width("가나", 10.0), 20);
        assert_eq!(face.line_height(48.0), 48.0);
    }

    #[test]
    fn test_builtin_glyph_is_a_box() {
        let glyph = FontFace::Builtin.rasterize('가', 24.0);
        assert!(glyph.width > 0 && glyph.height > 0);
        assert_eq!(glyph.coverage[0], 255);
        assert_eq!(glyph.coverage[(glyph.height / 2) * glyph.width + glyph.width / 2], 0);

        let space = FontFace::Builtin.rasterize(' ', 24.0);
        assert!(space.coverage.is_empty());
    }

    #[test]
    fn test_resolve_skips_missing_and_broken_fonts() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.ttf");
        std::fs::write(&broken, b"not a font").unwrap();

        assert!(FontFace::load(&broken).is_err());

        let face = FontFace::resolve(&[dir.path().join("missing.otf"), broken]);
        assert!(face.is_builtin());
        assert!(face.path().is_none());
    }

    #[test]
    fn test_sized_font_drives_width_wrapping() {
        let face = FontFace::Builtin;
        let lines = wrap_to_width("가나다 라마바", 30, &face.sized(10.0));
        assert_eq!(lines, vec!["가나다", "라마바"]);
    }
}
