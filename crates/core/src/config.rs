//! Tunable parameters for the comet trail.
//!
//! Every constant of the animation lives here so hosts can reconfigure the
//! trail without touching the simulation code. `TrailConfig::default()`
//! reproduces the stock look: a 10000-slot pool fed 5 particles per frame
//! along a 12-keyframe looping path.

use crate::core_types::{default_comet_path, validate_keyframes, Keyframe};
use crate::error::TrailError;
use crate::particles::{non_negative, ParticleParams};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Trail configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    /// Number of pre-allocated particle slots
    pub capacity: usize,

    /// Particles spawned at the comet every frame
    pub gen_rate: usize,

    /// Half-width of the per-axis uniform jitter applied to spawn positions
    pub position_jitter: f32,

    /// Half-width of the per-axis uniform jitter added to the heading
    pub velocity_jitter: f32,

    /// Scale applied to the jittered heading to get the spawn velocity
    pub velocity_scale: f32,

    /// Lower bound of the uniform time-to-live draw (seconds)
    pub ttl_min: f32,

    /// Upper bound of the uniform time-to-live draw (seconds)
    pub ttl_max: f32,

    /// Per-tick velocity multiplier. Applied once per frame, not scaled by dt,
    /// so the effective drag depends on frame rate.
    pub damping: f32,

    /// Liveness value written to the render buffer for alive slots
    pub alive_sentinel: u8,

    /// Point size per unit of liveness value (`size = flag * scale`)
    pub point_size_scale: f32,

    /// Seed for the particle jitter; `None` draws a seed from the OS
    pub seed: Option<u64>,

    /// Comet path, looped forever
    pub keyframes: Vec<Keyframe>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: 10_000,
            gen_rate: 5,
            position_jitter: 0.1,
            velocity_jitter: 0.3,
            velocity_scale: 0.1,
            ttl_min: 0.1,
            ttl_max: 0.5,
            damping: 0.90,
            alive_sentinel: 5,
            point_size_scale: 0.3,
            seed: None,
            keyframes: default_comet_path(),
        }
    }
}

impl TrailConfig {
    /// Check every parameter, including the keyframe sequence.
    ///
    /// A `gen_rate` above `capacity` is accepted: the spawn cursor simply laps
    /// the pool within a single frame. It is logged as a warning.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::InvalidParameter`] for the first out-of-range
    /// scalar, or the keyframe error from [`validate_keyframes`].
    pub fn validate(&self) -> Result<(), TrailError> {
        if self.capacity == 0 {
            return Err(TrailError::invalid_parameter(
                "capacity",
                "must be at least 1",
            ));
        }

        self.particle_params().validate()?;
        non_negative("point_size_scale", self.point_size_scale)?;

        if self.alive_sentinel == 0 {
            return Err(TrailError::invalid_parameter(
                "alive_sentinel",
                "must be nonzero or alive particles render invisible",
            ));
        }

        if self.gen_rate > self.capacity {
            warn!(
                "gen_rate {} exceeds capacity {}; spawns will overwrite their own slots",
                self.gen_rate, self.capacity
            );
        }

        validate_keyframes(&self.keyframes)
    }

    /// Emission and decay parameters for the particle pool
    pub fn particle_params(&self) -> ParticleParams {
        ParticleParams {
            position_jitter: self.position_jitter,
            velocity_jitter: self.velocity_jitter,
            velocity_scale: self.velocity_scale,
            ttl_min: self.ttl_min,
            ttl_max: self.ttl_max,
            damping: self.damping,
        }
    }
}
