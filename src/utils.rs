use std::time::{Duration, Instant};

// --- Helper Functions ---

// `None` means run uncapped.
pub fn frame_interval(rate: u32) -> Option<Duration> {
    if rate == 0 {
        None
    } else {
        Some(Duration::from_nanos(1_000_000_000 / rate as u64))
    }
}

// --- FPS Counter ---
pub struct FpsCounter {
    interval_secs: f64,
    last_sample: Instant,
    frames: u32,
    fps: f64,
}

impl FpsCounter {
    pub fn new(interval_secs: f64, now: Instant) -> Self {
        Self {
            interval_secs,
            last_sample: now,
            frames: 0,
            fps: 0.0,
        }
    }

    // True when a new estimate was produced.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.frames += 1;
        let elapsed_secs = now.duration_since(self.last_sample).as_secs_f64();
        if elapsed_secs >= self.interval_secs {
            self.fps = self.frames as f64 / elapsed_secs;
            self.last_sample = now;
            self.frames = 0;
            true
        } else {
            false
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }
}
