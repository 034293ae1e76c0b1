//! Time management utilities

use std::time::Instant;

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Update the timer (call once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f32();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
    }

    /// Time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total elapsed time since timer creation
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Frames counted so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average FPS since timer creation
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            self.frame_count as f32 / self.total_time
        } else {
            0.0
        }
    }
}

/// Fixed-timestep accumulator for the simulation loop.
///
/// Real frame times are fed in via [`FixedStep::accumulate`]; the loop then
/// drains whole steps of `period` seconds, keeping the simulation rate
/// independent of the render rate.
pub struct FixedStep {
    period: f32,
    accumulator: f32,
}

impl FixedStep {
    /// Create an accumulator stepping at the given rate in Hz
    pub fn from_rate(rate: f32) -> Self {
        Self {
            period: 1.0 / rate,
            accumulator: 0.0,
        }
    }

    /// The fixed step period in seconds
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Add elapsed real time
    pub fn accumulate(&mut self, dt: f32) {
        self.accumulator += dt;
    }

    /// Take one fixed step if enough time has accumulated
    pub fn step(&mut self) -> bool {
        if self.accumulator >= self.period {
            self.accumulator -= self.period;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_step_drains_whole_steps() {
        let mut step = FixedStep::from_rate(60.0);
        step.accumulate(3.5 / 60.0);
        let mut steps = 0;
        while step.step() {
            steps += 1;
        }
        assert_eq!(steps, 3);
    }

    #[test]
    fn fixed_step_carries_remainder() {
        let mut step = FixedStep::from_rate(10.0);
        step.accumulate(0.05);
        assert!(!step.step());
        step.accumulate(0.05);
        assert!(step.step());
        assert!(!step.step());
    }

    #[test]
    fn timer_accumulates_frames() {
        let mut timer = Timer::new();
        timer.update();
        timer.update();
        assert_eq!(timer.frame_count(), 2);
        assert!(timer.total_time() >= 0.0);
    }
}
