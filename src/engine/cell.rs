use anyhow::Result;
use rand::Rng;

use super::color::RgbColor;
use crate::renderer::Surface;
use crate::shared::constants::CHARACTER_SET;

/// Represents a single animated character cell on the grid
///
/// Holds three color snapshots: the color the current blend started from,
/// the color on screen right now, and the color it is blending toward.
#[derive(Clone, Copy, Debug)]
pub struct Cell {
    pub col: u16,
    pub row: u16,
    pub glyph: char,
    pub initial: RgbColor,
    pub current: RgbColor,
    pub target: RgbColor,
    /// Blend progress in [0, 1]; 1.0 means no active transition.
    pub progress: f64,
}

impl Cell {
    pub fn new(col: u16, row: u16, glyph: char, color: RgbColor, target: RgbColor) -> Self {
        Self {
            col,
            row,
            glyph,
            initial: color,
            current: color,
            target,
            progress: 1.0,
        }
    }

    /// Reassign the glyph to a uniformly random member of the character set.
    /// No effect on color state.
    pub fn mutate_glyph<R: Rng>(&mut self, rng: &mut R) {
        let glyphs = CHARACTER_SET.as_bytes();
        self.glyph = glyphs[rng.gen_range(0..glyphs.len())] as char;
    }

    /// Point the cell at a new target color. Smooth retargets freeze the
    /// current look as the new blend start; instant ones snap directly.
    pub fn retarget(&mut self, new_color: RgbColor, smooth: bool) {
        if !smooth {
            self.current = new_color;
            self.target = new_color;
            self.progress = 1.0;
        } else {
            self.initial = self.current;
            self.target = new_color;
            self.progress = 0.0;
        }
    }

    /// Advance an in-flight blend by `step`, recomputing the current color.
    /// Returns true if anything changed (the surface is dirty).
    pub fn advance(&mut self, step: f64) -> bool {
        if self.progress >= 1.0 {
            return false;
        }
        self.progress = (self.progress + step).min(1.0);
        self.current = RgbColor::lerp(self.initial, self.target, self.progress);
        true
    }

    /// Paint the glyph at this cell's position in its current color.
    pub fn draw(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.draw_glyph(self.col, self.row, self.glyph, self.current)
    }
}
