pub mod cell;
pub mod color;
pub mod config;
pub mod driver;
pub mod grid;
pub mod runner;

pub use config::GlitchConfig;
