/// Mapping between canvas pixels and grid cells.
///
/// The grid is larger than what is visible: `margin` extra cells surround the
/// viewport on every side so gliders can be placed off-screen and drift in.
/// A pixel here is one Braille dot (each terminal character is 2x4 dots).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cell_size: usize,
    pub margin: usize,
}

impl Viewport {
    pub fn new(cell_size: usize, margin: usize) -> Self {
        Self {
            cell_size: cell_size.max(1),
            margin,
        }
    }

    /// Number of visible cells along one axis for a pixel length
    pub fn visible_cells(&self, pixels: usize) -> usize {
        pixels.div_ceil(self.cell_size)
    }

    /// Grid dimensions for a canvas of the given pixel size, margin included on both sides
    pub fn grid_size(&self, pixel_width: usize, pixel_height: usize) -> (usize, usize) {
        (
            self.visible_cells(pixel_width) + 2 * self.margin,
            self.visible_cells(pixel_height) + 2 * self.margin,
        )
    }

    /// Grid cell under a viewport-relative pixel
    pub fn pixel_to_cell(&self, px: usize, py: usize) -> (usize, usize) {
        (px / self.cell_size + self.margin, py / self.cell_size + self.margin)
    }

    /// Visible (width, height) in cells for a grid of the given size
    pub fn visible_size(&self, grid_width: usize, grid_height: usize) -> (usize, usize) {
        (
            grid_width.saturating_sub(2 * self.margin),
            grid_height.saturating_sub(2 * self.margin),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_size_rounds_up_and_adds_margin_twice() {
        let viewport = Viewport::new(4, 10);
        assert_eq!(viewport.grid_size(80, 40), (40, 30));
        assert_eq!(viewport.grid_size(81, 41), (41, 31));
        assert_eq!(viewport.grid_size(0, 0), (20, 20));
    }

    #[test]
    fn test_pixel_to_cell_applies_margin() {
        let viewport = Viewport::new(4, 10);
        assert_eq!(viewport.pixel_to_cell(0, 0), (10, 10));
        assert_eq!(viewport.pixel_to_cell(3, 3), (10, 10));
        assert_eq!(viewport.pixel_to_cell(4, 9), (11, 12));
    }

    #[test]
    fn test_visible_size_inverts_grid_size() {
        let viewport = Viewport::new(2, 6);
        let (w, h) = viewport.grid_size(20, 16);
        assert_eq!(viewport.visible_size(w, h), (10, 8));
    }

    #[test]
    fn test_zero_cell_size_is_clamped() {
        let viewport = Viewport::new(0, 0);
        assert_eq!(viewport.cell_size, 1);
        assert_eq!(viewport.grid_size(5, 7), (5, 7));
    }
}
