//! Keyframe interpolation driving the comet.
//!
//! The pather owns the simulation clock. Each call to [`KeyframePather::advance`]
//! adds the frame delta, linearly interpolates inside the current segment and
//! moves to the next segment once the local parameter reaches 1.0. The
//! parameter is never clamped, so the frame that completes a segment may
//! overshoot the segment end slightly. After the final segment completes the
//! clock and segment index return to zero and the path replays from the start.

use crate::core_types::{validate_keyframes, Keyframe, Vec3};
use crate::error::TrailError;
use tracing::debug;

/// Output of one [`KeyframePather::advance`] call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSample {
    /// Interpolated comet position for this frame
    pub position: Vec3,
    /// Segment-local parameter used for the interpolation (may exceed 1.0)
    pub t: f32,
    /// True when this frame finished the segment it started in
    pub segment_complete: bool,
}

/// Piecewise-linear keyframe path with looping playback
#[derive(Debug, Clone)]
pub struct KeyframePather {
    keyframes: Vec<Keyframe>,
    segment: usize,
    elapsed: f32,
}

impl KeyframePather {
    /// Create a pather positioned at the start of the first segment.
    ///
    /// # Errors
    ///
    /// Fails when the sequence has fewer than two keyframes, holds non-finite
    /// or negative values, or has a segment of zero or negative duration.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self, TrailError> {
        validate_keyframes(&keyframes)?;
        Ok(Self {
            keyframes,
            segment: 0,
            elapsed: 0.0,
        })
    }

    /// Advance the clock by `dt` seconds and sample the path.
    pub fn advance(&mut self, dt: f32) -> PathSample {
        self.elapsed += dt;

        let curr = self.keyframes[self.segment];
        let next = self.keyframes[self.segment + 1];

        let t = (self.elapsed - curr.time) / (next.time - curr.time);
        let position = lerp(curr.position, next.position, t);

        let segment_complete = t >= 1.0;
        if segment_complete {
            self.segment += 1;

            if self.segment >= self.keyframes.len() - 1 {
                debug!(
                    "Comet path complete after {:.3}s, restarting from first keyframe",
                    self.elapsed
                );
                self.segment = 0;
                self.elapsed = 0.0;
            }
        }

        PathSample {
            position,
            t,
            segment_complete,
        }
    }

    /// Return to the first segment with the clock at zero
    pub fn reset(&mut self) {
        self.segment = 0;
        self.elapsed = 0.0;
    }

    /// Index of the segment the next `advance` interpolates in
    pub fn segment_index(&self) -> usize {
        self.segment
    }

    /// Simulation clock in seconds since the path last (re)started
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn keyframes(&self) -> &[Keyframe] {
        &self.keyframes
    }

    /// Position of the first keyframe
    pub fn start_position(&self) -> Vec3 {
        self.keyframes[0].position
    }
}

#[inline]
fn lerp(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn out_and_back() -> KeyframePather {
        KeyframePather::new(vec![
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, 5.0, 0.0, 0.0),
            Keyframe::new(2.0, 0.0, 0.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_interpolates_midpoint() {
        let mut pather = KeyframePather::new(vec![
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, 5.0, 0.0, 0.0),
        ])
        .unwrap();

        let sample = pather.advance(0.5);
        assert_eq!(sample.position, Vec3::new(2.5, 0.0, 0.0));
        assert_eq!(sample.t, 0.5);
        assert!(!sample.segment_complete);
    }

    #[test]
    fn test_interpolates_all_axes() {
        let mut pather = KeyframePather::new(vec![
            Keyframe::new(1.0, 0.0, 2.0, -4.0),
            Keyframe::new(3.0, 4.0, 6.0, 4.0),
        ])
        .unwrap();

        let sample = pather.advance(2.0);
        assert_relative_eq!(sample.t, 0.5);
        assert_relative_eq!(sample.position.x, 2.0);
        assert_relative_eq!(sample.position.y, 4.0);
        assert_relative_eq!(sample.position.z, 0.0);
    }

    #[test]
    fn test_advances_segment_after_completion() {
        let mut pather = out_and_back();

        pather.advance(0.5);
        let sample = pather.advance(0.5);
        assert!(sample.segment_complete);
        assert_eq!(sample.position, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(pather.segment_index(), 1);

        let sample = pather.advance(0.5);
        assert_eq!(sample.position, Vec3::new(2.5, 0.0, 0.0));
        assert!(!sample.segment_complete);
    }

    #[test]
    fn test_overshoot_is_not_clamped() {
        let mut pather = out_and_back();

        let sample = pather.advance(1.2);
        assert_relative_eq!(sample.t, 1.2);
        assert_relative_eq!(sample.position.x, 6.0, epsilon = 1e-5);
        assert!(sample.segment_complete);
        assert_eq!(pather.segment_index(), 1);
    }

    #[test]
    fn test_loops_after_last_segment() {
        let mut pather = out_and_back();
        let first = pather.advance(0.5);

        pather.advance(0.5);
        pather.advance(0.5);
        let last = pather.advance(0.5);
        assert!(last.segment_complete);
        assert_eq!(last.position, Vec3::new(0.0, 0.0, 0.0));

        // Wrap happened at the end of the completing frame
        assert_eq!(pather.segment_index(), 0);
        assert_eq!(pather.elapsed(), 0.0);

        let replay = pather.advance(0.5);
        assert_eq!(replay, first);
    }

    #[test]
    fn test_single_segment_wraps() {
        let mut pather = KeyframePather::new(vec![
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, 1.0, 1.0, 1.0),
        ])
        .unwrap();

        let sample = pather.advance(1.5);
        assert!(sample.segment_complete);
        assert_eq!(pather.segment_index(), 0);
        assert_eq!(pather.elapsed(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut pather = out_and_back();
        pather.advance(1.5);
        pather.reset();
        assert_eq!(pather.segment_index(), 0);
        assert_eq!(pather.elapsed(), 0.0);
        assert_eq!(pather.start_position(), Vec3::zeros());
    }

    #[test]
    fn test_rejects_zero_duration_segment() {
        let result = KeyframePather::new(vec![
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(0.0, 1.0, 0.0, 0.0),
        ]);
        assert!(matches!(
            result,
            Err(TrailError::NonIncreasingKeyframeTime { index: 1, .. })
        ));
    }
}
