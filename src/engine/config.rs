use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use super::color::RgbColor;
use crate::error::ConfigError;
use crate::shared::constants;

/// Immutable per-engine configuration, validated at construction so no
/// tick-time operation can fail on bad input.
#[derive(Clone, Debug)]
pub struct GlitchConfig {
    pub palette: Vec<RgbColor>,
    pub tick_interval_ms: u64,
    pub smooth: bool,
    /// Fixed seed for deterministic runs; None seeds from entropy.
    pub seed: Option<u64>,
}

impl GlitchConfig {
    /// Build a config from hex color strings, rejecting malformed colors and
    /// an empty palette up front.
    pub fn from_hex_palette<S: AsRef<str>>(
        colors: &[S],
        tick_interval_ms: u64,
        smooth: bool,
    ) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        let palette = colors
            .iter()
            .map(|c| RgbColor::parse(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            palette,
            tick_interval_ms,
            smooth,
            seed: None,
        })
    }
}

impl Default for GlitchConfig {
    fn default() -> Self {
        Self::from_hex_palette(
            constants::DEFAULT_PALETTE,
            constants::DEFAULT_TICK_INTERVAL_MS,
            true,
        )
        .expect("default palette is valid")
    }
}

/// On-disk preset (`letterglitch.config`), JSON with every field optional.
#[derive(Deserialize, Debug, Default)]
pub struct Preset {
    #[serde(default)]
    pub colors: Option<Vec<String>>,
    #[serde(default)]
    pub speed: Option<u64>,
    #[serde(default)]
    pub smooth: Option<bool>,
}

impl Preset {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}
