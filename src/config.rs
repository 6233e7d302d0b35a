//! Overlay configuration and the cell/pixel conversion it produces.

use ratatui::layout::Rect;
use thiserror::Error;

use crate::constants::{DEFAULT_CELL_HEIGHT_PX, DEFAULT_CELL_WIDTH_PX};
use crate::layout::Point;
use crate::window::FloatRect;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("cell width must be at least 1 pixel")]
    ZeroCellWidth,
    #[error("cell height must be at least 1 pixel")]
    ZeroCellHeight,
}

/// User-facing overlay settings, usually filled from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayConfig {
    pub cell_width_px: u16,
    pub cell_height_px: u16,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            cell_width_px: DEFAULT_CELL_WIDTH_PX,
            cell_height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl OverlayConfig {
    pub fn metrics(&self) -> Result<CellMetrics, ConfigError> {
        CellMetrics::new(self.cell_width_px, self.cell_height_px)
    }
}

/// Pixel size of one terminal cell.
///
/// Window geometry is stored in pixels; the terminal only knows cells. Every
/// conversion between the two goes through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    width_px: u16,
    height_px: u16,
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self {
            width_px: DEFAULT_CELL_WIDTH_PX,
            height_px: DEFAULT_CELL_HEIGHT_PX,
        }
    }
}

impl CellMetrics {
    pub fn new(width_px: u16, height_px: u16) -> Result<Self, ConfigError> {
        if width_px == 0 {
            return Err(ConfigError::ZeroCellWidth);
        }
        if height_px == 0 {
            return Err(ConfigError::ZeroCellHeight);
        }
        Ok(Self {
            width_px,
            height_px,
        })
    }

    pub fn width_px(&self) -> u16 {
        self.width_px
    }

    pub fn height_px(&self) -> u16 {
        self.height_px
    }

    /// Pixel position of the top-left corner of the cell at (`column`, `row`),
    /// relative to `origin`.
    pub fn pointer_to_px(&self, column: u16, row: u16, origin: Rect) -> Point {
        let dx = column as i32 - origin.x as i32;
        let dy = row as i32 - origin.y as i32;
        Point {
            x: dx * self.width_px as i32,
            y: dy * self.height_px as i32,
        }
    }

    /// Project a pixel rectangle onto the cell grid anchored at `origin`.
    ///
    /// Negative origins are pinned to the grid edge; sizes never collapse
    /// below one cell.
    pub fn rect_to_cells(&self, rect: FloatRect, origin: Rect) -> Rect {
        let cw = self.width_px as i32;
        let ch = self.height_px as i32;
        let to_u16 = |value: i32| value.clamp(0, u16::MAX as i32) as u16;
        Rect {
            x: origin.x.saturating_add(to_u16(rect.x / cw)),
            y: origin.y.saturating_add(to_u16(rect.y / ch)),
            width: to_u16(rect.width / cw).max(1),
            height: to_u16(rect.height / ch).max(1),
        }
    }

}
