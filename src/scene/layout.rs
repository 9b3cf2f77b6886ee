use crate::config::LayoutConfig;

/// Card count whose single-row grid uses the shortened cell height
const SHORT_GRID_CARDS: usize = 3;

/// Geometry of the card grid used by every grid-based section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub count: usize,
    pub cols: u32,
    pub rows: u32,
    pub cell_w: u32,
    pub cell_h: u32,
    pub gap: u32,
    pub offset_x: i64,
    pub offset_y: i64,
    frame: (u32, u32),
}

impl GridLayout {
    /// Columns and rows for `count` cards
    pub fn shape(count: usize) -> (u32, u32) {
        match count {
            3 => (3, 1),
            6 => (3, 2),
            _ => (3, 3),
        }
    }

    pub fn new(count: usize, (width, height): (u32, u32), layout: &LayoutConfig) -> Self {
        let (cols, rows) = Self::shape(count);
        let gap = layout.gap;
        let grid_w = (width as f32 * layout.grid_fraction) as u32;
        let grid_h = (height as f32 * layout.grid_fraction) as u32;

        let cell_w = (grid_w.saturating_sub((cols - 1) * gap) / cols).max(1);
        let mut cell_h = (grid_h.saturating_sub((rows - 1) * gap) / rows).max(1);
        if count == SHORT_GRID_CARDS {
            cell_h = ((cell_h as f32 * layout.short_height_scale) as u32).max(1);
        }

        let total_w = cols * cell_w + (cols - 1) * gap;
        let total_h = rows * cell_h + (rows - 1) * gap;

        Self {
            count,
            cols,
            rows,
            cell_w,
            cell_h,
            gap,
            offset_x: (width as i64 - total_w as i64) / 2,
            offset_y: (height as i64 - total_h as i64) / 2,
            frame: (width, height),
        }
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_w, self.cell_h)
    }

    /// Top-left corner of card `index`, filled row by row
    pub fn cell_origin(&self, index: usize) -> (i64, i64) {
        let col = (index as u32 % self.cols) as i64;
        let row = (index as u32 / self.cols) as i64;
        (
            self.offset_x + col * (self.cell_w + self.gap) as i64,
            self.offset_y + row * (self.cell_h + self.gap) as i64,
        )
    }

    /// Top-left corner of a card centered on the frame
    pub fn center_origin(&self) -> (i64, i64) {
        let (width, height) = self.frame;
        (
            (width / 2) as i64 - (self.cell_w / 2) as i64,
            (height / 2) as i64 - (self.cell_h / 2) as i64,
        )
    }

    /// Total height of the grid, gaps included
    pub fn total_height(&self) -> u32 {
        self.rows * self.cell_h + (self.rows - 1) * self.gap
    }
}

/// Geometry of the three-row reading screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingLayout {
    pub card_w: u32,
    pub card_h: u32,
    pub card_x: i64,
    pub text_x: i64,
    pub margin: u32,
    pub section_h: u32,
}

/// Rows on one reading screen
pub const READING_ROWS: usize = 3;

impl ReadingLayout {
    pub fn new(height: u32, layout: &LayoutConfig) -> Self {
        let card_w = layout.reading_card_width;
        let section_h = height.saturating_sub(2 * layout.reading_margin) / READING_ROWS as u32;
        // card art is 280 px wide at the row height it was drawn for
        let raw_h = section_h.saturating_sub(6) as f32;
        let card_h = ((raw_h * card_w as f32 / 280.0 * 1.15) as u32).max(1);
        let card_x = layout.reading_card_x as i64;

        Self {
            card_w,
            card_h,
            card_x,
            text_x: card_x + card_w as i64 + 20,
            margin: layout.reading_margin,
            section_h,
        }
    }

    pub fn card_size(&self) -> (u32, u32) {
        (self.card_w, self.card_h)
    }

    /// Top of row `index`; the card is centered in its section
    pub fn row_y(&self, index: usize) -> i64 {
        self.margin as i64 + (index as u32 * self.section_h) as i64 + (self.section_h as i64 - self.card_h as i64) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> LayoutConfig {
        LayoutConfig::default()
    }

    #[test]
    fn test_grid_shapes() {
        assert_eq!(GridLayout::shape(3), (3, 1));
        assert_eq!(GridLayout::shape(6), (3, 2));
        assert_eq!(GridLayout::shape(9), (3, 3));
        assert_eq!(GridLayout::shape(4), (3, 3));
    }

    #[test]
    fn test_full_grid_geometry() {
        let grid = GridLayout::new(6, (1080, 1920), &layout());
        // grid 885 x 1574
        assert_eq!(grid.cell_size(), (276, 773));
        assert_eq!(grid.cell_origin(0), ((1080 - 884) / 2, (1920 - 1574) / 2));
        assert_eq!(grid.cell_origin(4), (98 + 304, 173 + 801));
    }

    #[test]
    fn test_short_grid_is_shorter() {
        let grid = GridLayout::new(3, (1080, 1920), &layout());
        assert_eq!(grid.cell_size(), (276, 1101));
        assert_eq!(grid.total_height(), 1101);
        assert_eq!(grid.cell_origin(2).1, grid.cell_origin(0).1);
        assert_eq!(grid.center_origin(), (540 - 138, 960 - 550));
    }

    #[test]
    fn test_cells_do_not_overlap() {
        let grid = GridLayout::new(6, (720, 1280), &layout());
        for i in 0..6 {
            for j in (i + 1)..6 {
                let (ax, ay) = grid.cell_origin(i);
                let (bx, by) = grid.cell_origin(j);
                let apart_x = ax + grid.cell_w as i64 <= bx || bx + grid.cell_w as i64 <= ax;
                let apart_y = ay + grid.cell_h as i64 <= by || by + grid.cell_h as i64 <= ay;
                assert!(apart_x || apart_y, "cells {} and {} overlap", i, j);
            }
        }
    }

    #[test]
    fn test_reading_rows() {
        let reading = ReadingLayout::new(1920, &layout());
        assert_eq!(reading.section_h, 573);
        assert_eq!(reading.card_h, 523);
        assert_eq!(reading.text_x, 90 + 225 + 20);
        assert_eq!(reading.row_y(0), 100 + 25);
        assert_eq!(reading.row_y(2), 100 + 2 * 573 + 25);
    }

    #[test]
    fn test_tiny_frame_does_not_underflow() {
        let grid = GridLayout::new(6, (64, 64), &layout());
        assert!(grid.cell_w >= 1 && grid.cell_h >= 1);
        let reading = ReadingLayout::new(64, &layout());
        assert_eq!(reading.section_h, 0);
        assert_eq!(reading.card_h, 1);
    }
}
