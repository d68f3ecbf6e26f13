use anyhow::Result;
use crossterm::{
    cursor,
    style::Print,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use std::io::{BufWriter, Stdout, Write};

use super::surface::Surface;
use crate::engine::color::RgbColor;
use crate::shared::constants::{CELL_HEIGHT, CELL_WIDTH};

/// Truecolor terminal backend for the animation surface.
///
/// Assembles each frame into a preallocated byte buffer with zero-allocation
/// escape writers, then flushes it in a single write. Frames are wrapped in
/// synchronized-update guards (DECSM 2026) so the terminal presents them
/// whole.
pub struct TerminalSurface {
    stdout: BufWriter<Stdout>,
    render_buffer: Vec<u8>,
    // Terminal extent captured at clear(), used for bounds checks.
    term_cols: u16,
    term_rows: u16,
    last_fg: Option<RgbColor>,
    // Where the terminal cursor will be after the last write, for move dedupe.
    cursor: Option<(u16, u16)>,
}

impl TerminalSurface {
    pub fn new() -> Result<Self> {
        // Large output buffer to minimize system call overhead
        let stdout = BufWriter::with_capacity(1024 * 1024, std::io::stdout());
        let mut surface = Self {
            stdout,
            render_buffer: Vec::with_capacity(1024 * 1024),
            term_cols: 0,
            term_rows: 0,
            last_fg: None,
            cursor: None,
        };
        surface.initialize_terminal()?;
        Ok(surface)
    }

    fn initialize_terminal(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.execute(EnterAlternateScreen)?;
        self.stdout.execute(cursor::Hide)?;

        // Disable line wrapping (DECAWM) to prevent scrolling at edges
        self.stdout.execute(Print("\x1b[?7l"))?;

        // Disable cursor blinking (reduces screen tearing)
        self.stdout.execute(Print("\x1b[?12l"))?;

        Ok(())
    }

    // Helper for zero-allocation integer writing
    #[inline(always)]
    fn write_u8_fast(buffer: &mut Vec<u8>, mut n: u8) {
        if n >= 100 {
            buffer.push(b'0' + (n / 100));
            n %= 100;
            buffer.push(b'0' + (n / 10));
            buffer.push(b'0' + (n % 10));
        } else if n >= 10 {
            buffer.push(b'0' + (n / 10));
            buffer.push(b'0' + (n % 10));
        } else {
            buffer.push(b'0' + n);
        }
    }

    // Helper for zero-allocation u16 writing
    #[inline(always)]
    fn write_u16_fast(buffer: &mut Vec<u8>, n: u16) {
        let mut digits = [0u8; 5];
        let mut len = 0;
        let mut n = n;
        loop {
            digits[len] = b'0' + (n % 10) as u8;
            n /= 10;
            len += 1;
            if n == 0 {
                break;
            }
        }
        while len > 0 {
            len -= 1;
            buffer.push(digits[len]);
        }
    }
}

impl Surface for TerminalSurface {
    /// Terminal size in cells, scaled to logical units by the glyph pitch.
    /// Reports (0, 0) when the size cannot be read.
    fn logical_size(&self) -> (u32, u32) {
        match terminal::size() {
            Ok((cols, rows)) => (cols as u32 * CELL_WIDTH, rows as u32 * CELL_HEIGHT),
            Err(_) => (0, 0),
        }
    }

    fn clear(&mut self) -> Result<()> {
        self.render_buffer.clear();
        // VSync begin + full erase, directly into the frame buffer
        self.render_buffer.extend_from_slice(b"\x1b[?2026h\x1b[2J");
        self.last_fg = None;
        self.cursor = None;

        let (cols, rows) = terminal::size().unwrap_or((0, 0));
        self.term_cols = cols;
        self.term_rows = rows;
        Ok(())
    }

    fn draw_glyph(&mut self, col: u16, row: u16, glyph: char, color: RgbColor) -> Result<()> {
        // Skip cells outside the terminal (a resize may have shrunk it
        // between the size read and this frame).
        if col >= self.term_cols || row >= self.term_rows {
            self.cursor = None;
            return Ok(());
        }

        let buffer = &mut self.render_buffer;

        // Zero-allocation cursor move, skipped for consecutive cells
        if self.cursor != Some((col, row)) {
            buffer.extend_from_slice(b"\x1b[");
            Self::write_u16_fast(buffer, row + 1);
            buffer.push(b';');
            Self::write_u16_fast(buffer, col + 1);
            buffer.push(b'H');
        }

        // Zero-allocation color update (truecolor FG: \x1b[38;2;R;G;Bm)
        if self.last_fg != Some(color) {
            buffer.extend_from_slice(b"\x1b[38;2;");
            Self::write_u8_fast(buffer, color.0);
            buffer.push(b';');
            Self::write_u8_fast(buffer, color.1);
            buffer.push(b';');
            Self::write_u8_fast(buffer, color.2);
            buffer.push(b'm');
            self.last_fg = Some(color);
        }

        let mut encoded = [0u8; 4];
        buffer.extend_from_slice(glyph.encode_utf8(&mut encoded).as_bytes());

        // Writing advances the terminal cursor one cell right
        self.cursor = if col + 1 < self.term_cols {
            Some((col + 1, row))
        } else {
            None
        };
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.render_buffer.extend_from_slice(b"\x1b[0m\x1b[?2026l");
        self.stdout.write_all(&self.render_buffer)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        let _ = self.stdout.execute(Print("\x1b[?7h"));
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
