pub mod surface;
pub mod terminal;

pub use surface::Surface;
pub use terminal::TerminalSurface;
