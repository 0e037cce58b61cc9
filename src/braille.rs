use crate::grid::Grid;
use crate::viewport::Viewport;
use ratatui::style::Color;

/// Braille character rendering for high-resolution terminal graphics.
/// Each Braille character represents a 2x4 grid of dots (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dots per character horizontally
pub const DOTS_X: u16 = 2;
/// Dots per character vertically
pub const DOTS_Y: u16 = 4;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column (x=0): rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column (x=1): rows 0,1,2,3
];

/// A single rendered Braille cell with position and color
#[derive(Clone, Copy)]
pub struct BrailleCell {
    pub x: u16,
    pub y: u16,
    pub char: char,
    pub color: Color,
}

/// Render the visible part of the grid to Braille characters. Margin cells are never drawn.
pub fn render_to_braille(
    grid: &Grid,
    viewport: Viewport,
    canvas_width: u16,
    canvas_height: u16,
    color: Color,
) -> Vec<BrailleCell> {
    let mut cells = Vec::new();

    for cy in 0..canvas_height {
        for cx in 0..canvas_width {
            let mut pattern: u8 = 0;

            let base_px = cx as usize * DOTS_X as usize;
            let base_py = cy as usize * DOTS_Y as usize;

            for dx in 0..DOTS_X as usize {
                for dy in 0..DOTS_Y as usize {
                    let (x, y) = viewport.pixel_to_cell(base_px + dx, base_py + dy);
                    if grid.get(x, y) {
                        pattern |= BRAILLE_DOTS[dx][dy];
                    }
                }
            }

            // Only emit cells that have at least one dot
            if pattern != 0 {
                let braille_char = char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' ');
                cells.push(BrailleCell {
                    x: cx,
                    y: cy,
                    char: braille_char,
                    color,
                });
            }
        }
    }

    cells
}

/// Pixel (dot) size of a canvas measured in terminal characters
pub fn canvas_pixel_size(canvas_width: u16, canvas_height: u16) -> (usize, usize) {
    (
        canvas_width as usize * DOTS_X as usize,
        canvas_height as usize * DOTS_Y as usize,
    )
}

/// Top-left dot of a canvas-relative character position
pub fn char_to_pixel(column: u16, row: u16) -> (usize, usize) {
    (column as usize * DOTS_X as usize, row as usize * DOTS_Y as usize)
}
