//! Error type for configuration and keyframe validation.
//!
//! Every error surfaces once at construction time. Per-frame operations
//! (interpolation, spawning, integration) are total and never fail.

use std::fmt;

/// Validation failure raised when building a pather, pool or simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum TrailError {
    /// Fewer than two keyframes, so there is no segment to interpolate
    TooFewKeyframes { count: usize },
    /// A keyframe time is below zero
    NegativeKeyframeTime { index: usize, time: f32 },
    /// A keyframe holds NaN or an infinity
    NonFiniteKeyframe { index: usize },
    /// Keyframe times are not strictly increasing (includes zero-duration segments)
    NonIncreasingKeyframeTime {
        index: usize,
        previous: f32,
        current: f32,
    },
    /// A configuration parameter is out of range
    InvalidParameter { name: &'static str, message: String },
}

impl TrailError {
    /// Create error for an out-of-range configuration parameter.
    ///
    /// # Arguments
    /// * `name` - The parameter name (e.g., `"capacity"`, `"damping"`)
    /// * `message` - A description of the constraint that was violated
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}

impl fmt::Display for TrailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewKeyframes { count } => {
                write!(f, "keyframe path needs at least 2 keyframes, got {count}")
            }
            Self::NegativeKeyframeTime { index, time } => {
                write!(f, "keyframe {index} has negative time {time}")
            }
            Self::NonFiniteKeyframe { index } => {
                write!(f, "keyframe {index} contains a non-finite value")
            }
            Self::NonIncreasingKeyframeTime {
                index,
                previous,
                current,
            } => write!(
                f,
                "keyframe {index} time {current} does not follow previous time {previous}; \
                 segment durations must be positive"
            ),
            Self::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

impl std::error::Error for TrailError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = TrailError::TooFewKeyframes { count: 1 };
        assert_eq!(
            err.to_string(),
            "keyframe path needs at least 2 keyframes, got 1"
        );

        let err = TrailError::invalid_parameter("damping", "must be within [0, 1], got 1.5");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'damping': must be within [0, 1], got 1.5"
        );
    }
}
