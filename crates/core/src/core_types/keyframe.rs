//! Keyframe anchors for the comet path.

use super::vec3::Vec3;
use crate::error::TrailError;
use serde::{Deserialize, Serialize};

/// A (time, position) anchor on the comet path.
///
/// Positions between two consecutive keyframes are linearly interpolated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Simulation time in seconds at which the comet sits on `position`
    pub time: f32,
    pub position: Vec3,
}

impl Keyframe {
    /// Create a keyframe from its time and coordinates
    pub fn new(time: f32, x: f32, y: f32, z: f32) -> Self {
        Self {
            time,
            position: Vec3::new(x, y, z),
        }
    }
}

impl From<[f32; 4]> for Keyframe {
    /// `[t, x, y, z]`
    fn from(v: [f32; 4]) -> Self {
        Keyframe::new(v[0], v[1], v[2], v[3])
    }
}

/// Check that a keyframe sequence can drive a [`KeyframePather`](crate::KeyframePather).
///
/// The sequence needs at least two entries, every value must be finite, times
/// must be non-negative and strictly increasing. Strict increase rules out
/// zero-duration segments, whose interpolation parameter would be undefined.
///
/// # Errors
///
/// Returns the first violation found, scanning from the start of the sequence.
pub fn validate_keyframes(keyframes: &[Keyframe]) -> Result<(), TrailError> {
    if keyframes.len() < 2 {
        return Err(TrailError::TooFewKeyframes {
            count: keyframes.len(),
        });
    }

    for (index, kf) in keyframes.iter().enumerate() {
        if !kf.time.is_finite() || kf.position.iter().any(|c| !c.is_finite()) {
            return Err(TrailError::NonFiniteKeyframe { index });
        }
        if kf.time < 0.0 {
            return Err(TrailError::NegativeKeyframeTime {
                index,
                time: kf.time,
            });
        }
    }

    for (index, pair) in keyframes.windows(2).enumerate() {
        if pair[1].time <= pair[0].time {
            return Err(TrailError::NonIncreasingKeyframeTime {
                index: index + 1,
                previous: pair[0].time,
                current: pair[1].time,
            });
        }
    }

    Ok(())
}

/// The looping comet path used when no keyframes are configured.
pub fn default_comet_path() -> Vec<Keyframe> {
    [
        [0.0, 0.0, 0.0, 0.0],
        [1.0, 5.0, 0.0, 0.0],
        [2.0, 0.0, 0.0, 0.0],
        [3.0, 8.0, 0.0, 0.0],
        [4.0, 12.0, 12.0, 12.0],
        [5.0, 12.0, 18.0, 18.0],
        [6.0, 18.0, 18.0, 18.0],
        [7.0, 18.0, 12.0, 18.0],
        [8.0, 25.0, 12.0, 12.0],
        [9.0, 25.0, 0.0, 18.0],
        [10.0, 25.0, 1.0, 18.0],
        [11.0, 0.0, 0.0, 0.0],
    ]
    .into_iter()
    .map(Keyframe::from)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_path_is_valid() {
        let path = default_comet_path();
        assert_eq!(path.len(), 12);
        assert!(validate_keyframes(&path).is_ok());
    }

    #[test]
    fn test_rejects_single_keyframe() {
        let err = validate_keyframes(&[Keyframe::new(0.0, 0.0, 0.0, 0.0)]).unwrap_err();
        assert_eq!(err, TrailError::TooFewKeyframes { count: 1 });
    }

    #[test]
    fn test_rejects_zero_duration_segment() {
        let path = [
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, 1.0, 0.0, 0.0),
            Keyframe::new(1.0, 2.0, 0.0, 0.0),
        ];
        let err = validate_keyframes(&path).unwrap_err();
        assert_eq!(
            err,
            TrailError::NonIncreasingKeyframeTime {
                index: 2,
                previous: 1.0,
                current: 1.0,
            }
        );
    }

    #[test]
    fn test_rejects_negative_and_non_finite() {
        let negative = [
            Keyframe::new(-1.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, 0.0, 0.0, 0.0),
        ];
        assert!(matches!(
            validate_keyframes(&negative),
            Err(TrailError::NegativeKeyframeTime { index: 0, .. })
        ));

        let nan = [
            Keyframe::new(0.0, 0.0, 0.0, 0.0),
            Keyframe::new(1.0, f32::NAN, 0.0, 0.0),
        ];
        assert_eq!(
            validate_keyframes(&nan),
            Err(TrailError::NonFiniteKeyframe { index: 1 })
        );
    }
}
