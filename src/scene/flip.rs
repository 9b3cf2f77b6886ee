//! Card flip as a horizontal collapse followed by an expansion.

use image::imageops::{self, FilterType};
use image::RgbImage;

use crate::video::Frame;

/// What a flipping card looks like at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipState {
    /// Horizontal scale in [0, 1]
    pub scale: f64,
    /// False while the starting face is visible, true once the other face is
    pub other_face: bool,
}

/// Flip state at progress `p` in [0, 1]
pub fn flip_state(p: f64) -> FlipState {
    let p = p.clamp(0.0, 1.0);
    if p < 0.5 {
        FlipState { scale: 1.0 - 2.0 * p, other_face: false }
    } else {
        FlipState { scale: 2.0 * (p - 0.5), other_face: true }
    }
}

/// Per-card progress of a staggered flip: card `index` starts at
/// `index * stagger` and takes `span` of the overall progress
pub fn staggered_progress(p: f64, index: usize, stagger: f64, span: f64) -> f64 {
    ((p - index as f64 * stagger) / span).clamp(0.0, 1.0)
}

/// Paste `image` squeezed to `scale` of its width, centered on the cell at
/// `(x, y)`. Nothing is drawn below `min_scale`.
pub fn paste_squeezed(frame: &mut Frame, image: &RgbImage, x: i64, y: i64, scale: f64, min_scale: f64) {
    if scale < min_scale {
        return;
    }
    let (width, height) = image.dimensions();
    if scale >= 1.0 {
        frame.paste(image, x, y);
        return;
    }

    let squeezed_w = ((width as f64 * scale) as u32).max(2);
    let squeezed = imageops::resize(image, squeezed_w, height, FilterType::Lanczos3);
    frame.paste(&squeezed, x + (width as i64 - squeezed_w as i64) / 2, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_flip_endpoints() {
        assert_eq!(flip_state(0.0), FlipState { scale: 1.0, other_face: false });
        assert_eq!(flip_state(0.5), FlipState { scale: 0.0, other_face: true });
        assert_eq!(flip_state(1.0), FlipState { scale: 1.0, other_face: true });
        assert!((flip_state(0.25).scale - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_staggered_schedule() {
        // card 0 has finished when card 5 is only starting
        assert_eq!(staggered_progress(0.55, 0, 0.08, 0.55), 1.0);
        assert_eq!(staggered_progress(0.40, 5, 0.08, 0.55), 0.0);
        assert!((staggered_progress(0.5, 2, 0.08, 0.55) - (0.34 / 0.55)).abs() < 1e-9);
        // the last of six cards still completes
        assert_eq!(staggered_progress(1.0, 5, 0.08, 0.55), 1.0);
    }

    #[test]
    fn test_squeezed_card_is_centered() {
        let mut frame = Frame::new_filled(20, 10, [0, 0, 0]);
        let card = RgbImage::from_pixel(10, 10, Rgb([200, 0, 0]));
        paste_squeezed(&mut frame, &card, 0, 0, 0.4, 0.05);

        assert_eq!(frame.get_pixel(0, 5), [0, 0, 0]);
        assert_eq!(frame.get_pixel(2, 5), [0, 0, 0]);
        assert_ne!(frame.get_pixel(4, 5), [0, 0, 0]);
        assert_eq!(frame.get_pixel(8, 5), [0, 0, 0]);
    }

    #[test]
    fn test_collapsed_card_is_skipped() {
        let mut frame = Frame::new_filled(20, 10, [0, 0, 0]);
        let card = RgbImage::from_pixel(10, 10, Rgb([200, 0, 0]));
        paste_squeezed(&mut frame, &card, 0, 0, 0.01, 0.05);
        assert!(frame.as_image().pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
