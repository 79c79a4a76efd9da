//! Frame delta sources for [`TrailSimulation::run`](crate::TrailSimulation::run).
//!
//! A tick source is any iterator of frame deltas in seconds. The run loop
//! stops when the iterator ends, which models the host no longer issuing
//! frame callbacks.

use std::time::Instant;

/// Endless wall-clock deltas, each measured since the previous call.
///
/// The first delta is measured from construction.
#[derive(Debug, Clone)]
pub struct WallClock {
    last: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds since the previous call (or construction) and restart the measurement
    pub fn delta(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for WallClock {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        Some(self.delta())
    }
}

/// A fixed delta repeated for a set number of frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    dt: f32,
    remaining: u64,
}

impl FixedStep {
    pub fn new(dt: f32, frames: u64) -> Self {
        Self {
            dt,
            remaining: frames,
        }
    }

    /// Fixed step matching a target frame rate
    pub fn from_fps(fps: f32, frames: u64) -> Self {
        Self::new(1.0 / fps, frames)
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}

impl Iterator for FixedStep {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.dt)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fixed_step_yields_frames() {
        let steps: Vec<f32> = FixedStep::new(0.25, 3).collect();
        assert_eq!(steps, vec![0.25, 0.25, 0.25]);
        assert_eq!(FixedStep::new(0.1, 0).next(), None);
    }

    #[test]
    fn test_fixed_step_from_fps() {
        let step = FixedStep::from_fps(50.0, 1);
        assert_eq!(step.dt(), 0.02);
    }

    #[test]
    fn test_wall_clock_measures_elapsed() {
        let mut clock = WallClock::new();
        thread::sleep(Duration::from_millis(50));
        let dt = clock.next().unwrap();
        assert!(dt >= 0.050, "Expected at least 50ms, got {dt}");

        let dt = clock.delta();
        assert!(dt < 0.050, "Measurement should restart, got {dt}");
    }
}
