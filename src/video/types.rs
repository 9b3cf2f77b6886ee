use image::{imageops, ImageBuffer, Rgb, RgbImage};
use serde::{Deserialize, Serialize};

/// A single video frame
///
/// Thin wrapper around an RGB image buffer with the drawing primitives the
/// scene generators need: clipped pasting, alpha blending and badges.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        Self { buffer: ImageBuffer::from_pixel(width, height, Rgb(color)) }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.buffer.dimensions()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Set a pixel, ignoring coordinates outside the frame
    pub fn set_pixel(&mut self, x: i64, y: i64, color: [u8; 3]) {
        if let Some((x, y)) = self.inside(x, y) {
            self.buffer.put_pixel(x, y, Rgb(color));
        }
    }

    /// Blend `color` over the pixel with coverage `alpha` (0-255)
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: [u8; 3], alpha: u8) {
        if alpha == 0 {
            return;
        }
        let Some((x, y)) = self.inside(x, y) else {
            return;
        };
        let a = u16::from(alpha);
        let inv = 255 - a;
        let dst = self.buffer.get_pixel_mut(x, y);
        for c in 0..3 {
            dst.0[c] = ((u16::from(color[c]) * a + u16::from(dst.0[c]) * inv + 127) / 255) as u8;
        }
    }

    fn inside(&self, x: i64, y: i64) -> Option<(u32, u32)> {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            None
        } else {
            Some((x as u32, y as u32))
        }
    }

    /// Copy `image` with its top-left corner at `(x, y)`, clipped to the frame
    pub fn paste(&mut self, image: &RgbImage, x: i64, y: i64) {
        imageops::replace(&mut self.buffer, image, x, y);
    }

    /// Filled circle of diameter `diameter` whose bounding box starts at
    /// `(x, y)`, with a ring of `outline_width` pixels in `outline`
    pub fn draw_badge(&mut self, x: i64, y: i64, diameter: u32, fill: [u8; 3], outline: [u8; 3], outline_width: u32) {
        let r = diameter as f64 / 2.0;
        let (cx, cy) = (x as f64 + r, y as f64 + r);
        let inner = (r - outline_width as f64).max(0.0);

        for py in y..y + diameter as i64 {
            for px in x..x + diameter as i64 {
                let dx = px as f64 + 0.5 - cx;
                let dy = py as f64 + 0.5 - cy;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist <= inner {
                    self.set_pixel(px, py, fill);
                } else if dist <= r {
                    self.set_pixel(px, py, outline);
                }
            }
        }
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Raw interleaved RGB bytes, row major
    pub fn as_rgb_bytes(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    pub fn into_image(self) -> RgbImage {
        self.buffer
    }

    /// Save the frame as a PNG file
    pub fn save_png<P: AsRef<std::path::Path>>(&self, path: P) -> Result<(), image::ImageError> {
        self.buffer.save(path)
    }
}

/// Linear interpolation between two colors, `t` in [0, 1]
pub fn lerp_color(from: [u8; 3], to: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mut out = [0u8; 3];
    for c in 0..3 {
        out[c] = (from[c] as f64 + (to[c] as f64 - from[c] as f64) * t).round() as u8;
    }
    out
}

/// Output encoding parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoParams {
    pub width: u32,
    pub height: u32,
    pub fps: u32,

    /// Video codec to use for output
    pub codec: String,

    /// Encoder speed preset
    pub preset: String,

    /// Encoder worker threads
    pub threads: usize,

    /// Constant rate factor, lower is better quality
    pub crf: u8,
}

impl Default for VideoParams {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            fps: 30,
            codec: "libx264".to_string(),
            preset: "fast".to_string(),
            threads: num_cpus::get(),
            crf: 23,
        }
    }
}
