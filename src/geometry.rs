//! Screen layout: how the window is divided into grid cells and where the controls sit.

use error_chain::bail;

use crate::cells::Position;
use crate::errors::*;
use crate::units::{CellPixels, Height, PixelHeight, PixelPoint, PixelWidth, Width};

pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub const DEFAULT_CELL_PIXELS: u32 = 40;

const RETRY_BUTTON_WIDTH: u32 = 160;
const RETRY_BUTTON_HEIGHT: u32 = 35;
const RETRY_BUTTON_BOTTOM_OFFSET: i32 = 50;

/// An axis aligned pixel rectangle.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Rect {
        Rect { x, y, width, height }
    }

    /// Left and top edges are inside the rectangle, right and bottom edges are not.
    pub fn contains(&self, point: PixelPoint) -> bool {
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));
        x >= left && x < left + i64::from(self.width) &&
        y >= top && y < top + i64::from(self.height)
    }

    pub fn centre(&self) -> PixelPoint {
        PixelPoint::new(self.x + (self.width / 2) as i32, self.y + (self.height / 2) as i32)
    }
}

/// Fixed window and cell sizes, and the grid dimensions they imply.
///
/// Decided once at startup; the maze size never changes while running.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Geometry {
    window_width: PixelWidth,
    window_height: PixelHeight,
    cell_pixels: CellPixels,
}

impl Geometry {
    pub fn new(window_width: PixelWidth,
               window_height: PixelHeight,
               cell_pixels: CellPixels)
               -> Result<Geometry> {

        let (PixelWidth(w), PixelHeight(h), CellPixels(cell)) =
            (window_width, window_height, cell_pixels);
        if cell == 0 || w / cell < 2 || h / cell < 2 || w > i32::MAX as u32 ||
           h > i32::MAX as u32 {
            bail!(ErrorKind::InvalidGeometry(w, h, cell));
        }

        Ok(Geometry {
            window_width,
            window_height,
            cell_pixels,
        })
    }

    #[inline]
    pub fn window_width(&self) -> PixelWidth {
        self.window_width
    }

    #[inline]
    pub fn window_height(&self) -> PixelHeight {
        self.window_height
    }

    #[inline]
    pub fn cell_pixels(&self) -> CellPixels {
        self.cell_pixels
    }

    /// Whole cells that fit across the window; a partial cell at the edge is dropped.
    #[inline]
    pub fn columns(&self) -> Width {
        Width((self.window_width.0 / self.cell_pixels.0) as usize)
    }

    #[inline]
    pub fn rows(&self) -> Height {
        Height((self.window_height.0 / self.cell_pixels.0) as usize)
    }

    /// Screen area covered by a grid cell.
    pub fn cell_rect(&self, coord: Position) -> Rect {
        let cell = self.cell_pixels.0;
        Rect::new((coord.x * cell) as i32, (coord.y * cell) as i32, cell, cell)
    }

    pub fn cell_centre(&self, coord: Position) -> PixelPoint {
        self.cell_rect(coord).centre()
    }

    /// Radius of the player marker.
    pub fn player_radius(&self) -> u32 {
        self.cell_pixels.0 / 3
    }

    /// The retry control shown once the goal is reached: centred along the bottom of the window.
    pub fn retry_button(&self) -> Rect {
        let x = (self.window_width.0 / 2) as i32 - (RETRY_BUTTON_WIDTH / 2) as i32;
        let y = self.window_height.0 as i32 - RETRY_BUTTON_BOTTOM_OFFSET;
        Rect::new(x, y, RETRY_BUTTON_WIDTH, RETRY_BUTTON_HEIGHT)
    }
}

impl Default for Geometry {
    fn default() -> Geometry {
        Geometry {
            window_width: PixelWidth(DEFAULT_WINDOW_WIDTH),
            window_height: PixelHeight(DEFAULT_WINDOW_HEIGHT),
            cell_pixels: CellPixels(DEFAULT_CELL_PIXELS),
        }
    }
}
