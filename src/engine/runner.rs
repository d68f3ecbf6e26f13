use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::config::GlitchConfig;
use super::driver::AnimationDriver;
use crate::renderer::TerminalSurface;
use crate::sync::FramePacer;
use crate::utils::logger;

/// 'q', Esc, or Ctrl-C. Raw mode delivers Ctrl-C as a key event rather
/// than SIGINT, so it must be matched here; the signal handler only covers
/// delivery outside the event loop.
fn is_quit_key(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Run the animation against the terminal until 'q'/Esc/Ctrl-C, or until
/// `duration` elapses when one is given.
pub fn run(config: GlitchConfig, fps: f64, duration: Option<Duration>) -> Result<()> {
    let mut surface = TerminalSurface::new()?;
    let mut driver = AnimationDriver::new(config);

    driver.start(&surface);
    let (cols, rows) = (driver.grid().cols(), driver.grid().rows());
    logger::info(&format!(
        "animation started: {}x{} cells, {:.0} fps target",
        cols, rows, fps
    ));

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut pacer = FramePacer::new(fps);
    let epoch = Instant::now();

    while running.load(Ordering::SeqCst) {
        if let Some(limit) = duration {
            if epoch.elapsed() >= limit {
                break;
            }
        }

        // Input polling: quit keys and terminal resizes
        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(key) => {
                    if is_quit_key(&key) {
                        running.store(false, Ordering::SeqCst);
                    }
                }
                Event::Resize(_, _) => {
                    driver.resize(&surface);
                    logger::debug(&format!(
                        "resized: {}x{} cells",
                        driver.grid().cols(),
                        driver.grid().rows()
                    ));
                }
                _ => {}
            }
        }

        let timestamp_ms = epoch.elapsed().as_millis() as u64;
        driver.tick(&mut surface, timestamp_ms)?;

        pacer.wait_for_next_frame();
    }

    driver.stop();
    logger::info(&format!(
        "animation stopped after {} frames",
        pacer.frames_rendered()
    ));

    Ok(())
}
