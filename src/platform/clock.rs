//! Frame timing
//!
//! Converts display refresh timestamps into a whole number of fixed
//! simulation steps, independent of the monitor's refresh rate.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

const FPS_WINDOW: usize = 60;

/// Fixed-timestep accumulator with a rolling FPS estimate
#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    last_time: Option<f64>,
    frame_times: [f64; FPS_WINDOW],
    frame_index: usize,
    frames_seen: usize,
    fps: u32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            last_time: None,
            frame_times: [0.0; FPS_WINDOW],
            frame_index: 0,
            frames_seen: 0,
            fps: 0,
        }
    }

    /// Register a frame at `time_ms` and return how many simulation steps to run
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than trying to catch up forever
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        self.record_frame(time_ms);
        substeps
    }

    /// Forget timing history; the next frame counts as a first frame
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time = None;
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    fn record_frame(&mut self, time_ms: f64) {
        self.frame_times[self.frame_index] = time_ms;
        self.frame_index = (self.frame_index + 1) % FPS_WINDOW;
        self.frames_seen = (self.frames_seen + 1).min(FPS_WINDOW);

        if self.frames_seen < FPS_WINDOW {
            return;
        }
        // Calculate FPS from oldest to newest frame
        let oldest = self.frame_times[self.frame_index];
        let elapsed = time_ms - oldest;
        if elapsed > 0.0 {
            self.fps = ((FPS_WINDOW - 1) as f64 * 1000.0 / elapsed).round() as u32;
        }
    }
}
