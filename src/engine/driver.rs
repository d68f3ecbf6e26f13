use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::color::random_from_palette;
use super::config::GlitchConfig;
use super::grid::Grid;
use crate::renderer::Surface;
use crate::shared::constants::TRANSITION_STEP;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DriverState {
    Stopped,
    Running,
}

/// The scheduling core: owns the grid and decides, per frame, which cells
/// mutate, how far blends advance, and whether the surface needs a redraw.
///
/// Timing is injected: `tick` takes a millisecond timestamp rather than
/// reading a clock, so tests drive the engine with synthetic time. The host
/// loop is responsible for calling `tick` once per visual frame with
/// monotonically increasing timestamps.
pub struct AnimationDriver {
    config: GlitchConfig,
    grid: Grid,
    rng: StdRng,
    state: DriverState,
    last_tick_ms: Option<u64>,
}

impl AnimationDriver {
    pub fn new(config: GlitchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            grid: Grid::empty(),
            rng,
            state: DriverState::Stopped,
            last_tick_ms: None,
        }
    }

    /// Build the grid against the surface's current logical size and begin
    /// accepting ticks. A zero-size surface yields an empty grid; ticks
    /// then simply draw nothing.
    pub fn start(&mut self, surface: &dyn Surface) {
        let (width, height) = surface.logical_size();
        self.grid
            .build(width, height, &self.config.palette, &mut self.rng);
        // None means "past the interval", so the first tick mutates at once.
        self.last_tick_ms = None;
        self.state = DriverState::Running;
    }

    /// Stop accepting ticks. Idempotent.
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    pub fn is_running(&self) -> bool {
        self.state == DriverState::Running
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Full grid rebuild against the surface's new logical size. In-flight
    /// blends are discarded with the old population. Ignored when stopped.
    pub fn resize(&mut self, surface: &dyn Surface) {
        if self.state == DriverState::Stopped {
            return;
        }
        let (width, height) = surface.logical_size();
        self.grid
            .build(width, height, &self.config.palette, &mut self.rng);
    }

    /// One per-frame tick. Returns the dirty flag: whether anything changed
    /// and a full clear+redraw was dispatched.
    pub fn tick(&mut self, surface: &mut dyn Surface, timestamp_ms: u64) -> Result<bool> {
        if self.state == DriverState::Stopped {
            return Ok(false);
        }

        let mut mutated = false;
        let due = match self.last_tick_ms {
            Some(last) => timestamp_ms.saturating_sub(last) > self.config.tick_interval_ms,
            None => true,
        };
        if due {
            for index in self.grid.pick_random_indices(&mut self.rng) {
                let color = random_from_palette(&self.config.palette, &mut self.rng);
                let cell = &mut self.grid.cells_mut()[index];
                cell.mutate_glyph(&mut self.rng);
                cell.retarget(color, self.config.smooth);
            }
            self.last_tick_ms = Some(timestamp_ms);
            mutated = !self.grid.is_empty();
        }

        let mut color_changed = false;
        if self.config.smooth {
            for cell in self.grid.cells_mut() {
                if cell.advance(TRANSITION_STEP) {
                    color_changed = true;
                }
            }
        }

        let dirty = mutated || color_changed;
        if dirty {
            surface.clear()?;
            for cell in self.grid.cells() {
                cell.draw(surface)?;
            }
            surface.present()?;
        }
        Ok(dirty)
    }
}
