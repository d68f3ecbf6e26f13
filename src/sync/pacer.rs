use std::time::{Duration, Instant};

/// Fixed-rate frame pacer for the animation loop.
///
/// Sleeps to a per-frame deadline, with compensation for time spent ticking
/// and rendering. Resyncs when the loop falls far behind so the deadline
/// never drifts away permanently.
pub struct FramePacer {
    frame_duration: Duration,
    next_frame_time: Instant,
    frames_rendered: u64,
}

impl FramePacer {
    pub fn new(fps: f64) -> Self {
        let frame_duration = Duration::from_secs_f64(1.0 / fps);
        Self {
            frame_duration,
            next_frame_time: Instant::now() + frame_duration,
            frames_rendered: 0,
        }
    }

    /// Wait until it's time for the next frame.
    ///
    /// If the loop is more than three frame durations behind, the deadline
    /// resets to now instead of chasing an ever-receding schedule.
    pub fn wait_for_next_frame(&mut self) {
        let now = Instant::now();

        if now > self.next_frame_time + self.frame_duration * 3 {
            self.next_frame_time = now + self.frame_duration;
            self.frames_rendered += 1;
            return;
        }

        if now < self.next_frame_time {
            std::thread::sleep(self.next_frame_time - now);
        }

        self.next_frame_time += self.frame_duration;
        self.frames_rendered += 1;
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }
}
