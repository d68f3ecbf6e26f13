use anyhow::Result;

use crate::engine::color::RgbColor;

/// Raster surface the engine draws onto.
///
/// The surface is borrowed by the driver, never owned: the host constructs
/// it, lends it to `start`/`tick`, and tears it down after `stop`. Logical
/// units are terminal cells scaled by the glyph pitch, so the engine grid
/// coincides with the character grid.
pub trait Surface {
    /// Current logical drawing size. An unavailable or zero-size backing
    /// area reports (0, 0); the engine then builds an empty grid and skips
    /// drawing rather than failing.
    fn logical_size(&self) -> (u32, u32);

    /// Erase the entire drawing area, beginning a new frame.
    fn clear(&mut self) -> Result<()>;

    /// Paint one glyph at a cell position in the given color.
    fn draw_glyph(&mut self, col: u16, row: u16, glyph: char, color: RgbColor) -> Result<()>;

    /// Flush the assembled frame to the backing output.
    fn present(&mut self) -> Result<()>;
}
