use thiserror::Error;

/// Configuration errors, raised before the animation loop starts.
///
/// Once a config has validated, no tick-time error can occur: every
/// per-tick operation works over an already-checked, non-empty palette.
#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid color {0:?}: expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("palette must contain at least one color")]
    EmptyPalette,
    #[error("frame rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),
}
