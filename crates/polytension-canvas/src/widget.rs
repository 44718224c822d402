//! Ratatui widget that shows a [`RasterCanvas`].

use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};

use crate::raster::RasterCanvas;

/// Upper half block: foreground paints the top pixel, background the bottom.
const HALF_BLOCK: &str = "▀";

/// Raster size needed to fill `area`, two pixel rows per terminal row.
pub fn raster_size(area: Rect) -> (u32, u32) {
    (u32::from(area.width), u32::from(area.height) * 2)
}

impl Widget for &RasterCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = u32::from(col);
                let y = u32::from(row) * 2;
                let (Some(top), Some(bottom)) = (self.pixel(x, y), self.pixel(x, y + 1)) else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(top.into())
                        .set_bg(bottom.into());
                }
            }
        }
    }
}
