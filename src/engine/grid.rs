use rand::Rng;

use super::cell::Cell;
use super::color::{random_from_palette, RgbColor};
use crate::shared::constants::{CELL_HEIGHT, CELL_WIDTH, CHARACTER_SET, MUTATION_FRACTION};

/// Row-major collection of cells covering a logical area at fixed cell pitch.
///
/// Rebuilding discards all prior cell state; references into the old
/// population are void after `build`.
pub struct Grid {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn empty() -> Self {
        Self {
            cols: 0,
            rows: 0,
            cells: Vec::new(),
        }
    }

    /// Populate the grid for a logical area. Every cell starts with a random
    /// glyph, a random color, and an independent random target, so the whole
    /// field is immediately eligible for blending. A zero-size area yields an
    /// empty grid.
    pub fn build<R: Rng>(&mut self, width: u32, height: u32, palette: &[RgbColor], rng: &mut R) {
        self.cols = width.div_ceil(CELL_WIDTH) as u16;
        self.rows = height.div_ceil(CELL_HEIGHT) as u16;

        self.cells.clear();
        self.cells.reserve(self.cols as usize * self.rows as usize);

        let glyphs = CHARACTER_SET.as_bytes();
        for row in 0..self.rows {
            for col in 0..self.cols {
                let glyph = glyphs[rng.gen_range(0..glyphs.len())] as char;
                let color = random_from_palette(palette, rng);
                let target = random_from_palette(palette, rng);
                self.cells.push(Cell::new(col, row, glyph, color, target));
            }
        }
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Indices of the cells to mutate this tick: `max(1, floor(len * 0.05))`
    /// draws, each independent and uniform. The same index may appear twice
    /// within one tick; that duplication is part of the visual rate.
    pub fn pick_random_indices<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        if self.cells.is_empty() {
            return Vec::new();
        }
        let count = ((self.cells.len() as f64 * MUTATION_FRACTION) as usize).max(1);
        (0..count)
            .map(|_| rng.gen_range(0..self.cells.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn palette() -> Vec<RgbColor> {
        vec![RgbColor(1, 1, 1), RgbColor(2, 2, 2), RgbColor(3, 3, 3)]
    }

    #[test]
    fn test_build_cell_count_from_pitch() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(1);
        // 200x200 logical at 10x20 pitch -> 20 cols x 10 rows
        grid.build(200, 200, &palette(), &mut rng);
        assert_eq!(grid.cols(), 20);
        assert_eq!(grid.rows(), 10);
        assert_eq!(grid.len(), 200);
    }

    #[test]
    fn test_build_rounds_up_partial_cells() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(1);
        // 11 logical units needs 2 columns, 21 needs 2 rows
        grid.build(11, 21, &palette(), &mut rng);
        assert_eq!(grid.cols(), 2);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_build_positions_unique_and_row_major() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(9);
        grid.build(50, 60, &palette(), &mut rng);

        let positions: HashSet<(u16, u16)> =
            grid.cells().iter().map(|c| (c.col, c.row)).collect();
        assert_eq!(positions.len(), grid.len());

        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!(cell.col as usize, i % grid.cols() as usize);
            assert_eq!(cell.row as usize, i / grid.cols() as usize);
        }
    }

    #[test]
    fn test_build_zero_size_is_empty() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(1);
        grid.build(0, 0, &palette(), &mut rng);
        assert!(grid.is_empty());
        grid.build(200, 0, &palette(), &mut rng);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_rebuild_discards_previous_population() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(4);
        grid.build(200, 200, &palette(), &mut rng);
        assert_eq!(grid.len(), 200);

        grid.build(100, 100, &palette(), &mut rng);
        assert_eq!(grid.cols(), 10);
        assert_eq!(grid.rows(), 5);
        assert_eq!(grid.len(), 50);
    }

    #[test]
    fn test_pick_size_is_five_percent_floor_min_one() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(2);
        // 1000 cells: 100 cols x 10 rows
        grid.build(1000, 200, &palette(), &mut rng);
        assert_eq!(grid.len(), 1000);

        let picked = grid.pick_random_indices(&mut rng);
        assert_eq!(picked.len(), 50);
        assert!(picked.iter().all(|&i| i < grid.len()));
    }

    #[test]
    fn test_pick_minimum_one_on_small_grids() {
        let mut grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(2);
        grid.build(10, 20, &palette(), &mut rng);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.pick_random_indices(&mut rng).len(), 1);
    }

    #[test]
    fn test_pick_on_empty_grid_is_empty() {
        let grid = Grid::empty();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(grid.pick_random_indices(&mut rng).is_empty());
    }
}
