//! Half-block rasterizer for the playing field
//!
//! Every board cell is drawn two columns wide and half a row tall using `▀`
//! with separate foreground/background colors, giving a 2x2 sub-pixel grid
//! per cell. That is enough resolution to show the snake mid-way between cells.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    widgets::Widget,
};

use crate::game::{Board, Position, Rgb};

use super::interpolate::Quad;

const LIGHT_GRASS: Color = Color::Rgb(165, 207, 82);
const DARK_GRASS: Color = Color::Rgb(155, 193, 77);

/// Sub-pixels per cell edge
const SUBPIXELS: i32 = 2;

pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Terminal columns and rows needed to draw a board
pub fn board_extent(board: Board) -> (u16, u16) {
    let columns = (board.width * SUBPIXELS).max(0) as u16;
    let rows = board.height.max(0) as u16;
    (columns, rows)
}

/// Checkerboard grass, fruit and snake quads
pub struct BoardWidget<'a> {
    board: Board,
    quads: &'a [Quad],
    fruits: &'a [Position],
    fruit_color: Rgb,
}

impl<'a> BoardWidget<'a> {
    pub fn new(board: Board, quads: &'a [Quad], fruits: &'a [Position], fruit_color: Rgb) -> Self {
        Self {
            board,
            quads,
            fruits,
            fruit_color,
        }
    }

    /// Color of every sub-pixel, row-major
    fn rasterize(&self) -> Vec<Color> {
        let width = self.board.width * SUBPIXELS;
        let height = self.board.height * SUBPIXELS;
        let mut pixels = Vec::with_capacity((width * height).max(0) as usize);

        for sy in 0..height {
            for sx in 0..width {
                let (col, row) = (sx / SUBPIXELS, sy / SUBPIXELS);
                pixels.push(if (col + row) % 2 == 0 { DARK_GRASS } else { LIGHT_GRASS });
            }
        }

        for fruit in self.fruits {
            self.fill(&mut pixels, fruit.x as f32, fruit.y as f32, color(self.fruit_color));
        }
        for quad in self.quads {
            self.fill(&mut pixels, quad.x, quad.y, color(quad.color));
        }

        pixels
    }

    /// Paint the unit square at (x, y); sub-pixels are covered when their centre falls inside it
    fn fill(&self, pixels: &mut [Color], x: f32, y: f32, fill: Color) {
        let width = self.board.width * SUBPIXELS;
        let height = self.board.height * SUBPIXELS;
        let scale = SUBPIXELS as f32;

        let first_x = ((x * scale - 0.5).ceil() as i32).max(0);
        let first_y = ((y * scale - 0.5).ceil() as i32).max(0);
        let last_x = (((x + 1.0) * scale - 0.5).ceil() as i32).min(width);
        let last_y = (((y + 1.0) * scale - 0.5).ceil() as i32).min(height);

        for sy in first_y..last_y {
            for sx in first_x..last_x {
                pixels[(sy * width + sx) as usize] = fill;
            }
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (columns, rows) = board_extent(self.board);
        let pixels = self.rasterize();
        let width = (self.board.width * SUBPIXELS) as usize;

        for row in 0..rows.min(area.height) {
            for column in 0..columns.min(area.width) {
                let top = pixels[(row as usize * 2) * width + column as usize];
                let bottom = pixels[(row as usize * 2 + 1) * width + column as usize];
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    cell.set_char('▀').set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
