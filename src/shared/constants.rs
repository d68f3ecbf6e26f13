pub const APP_NAME: &str = "letterglitch";

pub const CONFIG_FILE: &str = "letterglitch.config";
pub const ERROR_LOG_FILE: &str = "error.log";
pub const DEBUG_LOG_FILE: &str = "debug.log";

/// Glyphs a cell may display. Mutation picks uniformly from this set.
pub const CHARACTER_SET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%&*()-_{}[]:;<>,.?/";

/// Logical units per cell. Grid geometry is derived from these, so one
/// engine cell maps to one terminal character cell.
pub const CELL_WIDTH: u32 = 10;
pub const CELL_HEIGHT: u32 = 20;

pub const DEFAULT_PALETTE: &[&str] = &["#2b4539", "#61dca3", "#61b3dc"];
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 50;
pub const DEFAULT_FPS: f64 = 60.0;

/// Share of cells reassigned per mutation tick (minimum one cell).
pub const MUTATION_FRACTION: f64 = 0.05;
/// Per-call color blend increment; a full blend is exactly 20 steps.
pub const TRANSITION_STEP: f64 = 0.05;
