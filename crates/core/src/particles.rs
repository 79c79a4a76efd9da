//! Fixed-capacity particle pool.
//!
//! State is stored as parallel arrays (position, velocity, acceleration,
//! time-to-live, liveness), one entry per slot, allocated once up front.
//!
//! # Spawning
//!
//! Spawns write to slots picked by a wrapping cursor. The target slot is not
//! checked for liveness: when the spawn rate laps the pool faster than
//! particles expire, still-alive particles are overwritten oldest-first.
//!
//! # Tick order
//!
//! 1. Decrement every slot's ttl by `dt`, dead or alive
//! 2. Kill alive slots whose ttl reached zero
//! 3. Multiply every velocity by the damping factor (once per tick, not dt-scaled)
//! 4. Add every velocity to its position
//!
//! Steps 3 and 4 also run on dead slots. Their stale state keeps drifting
//! until a spawn overwrites it; renderers hide them through the liveness flag.

use crate::core_types::Vec3;
use crate::error::TrailError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Emission and decay parameters for a [`ParticlePool`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleParams {
    /// Per-axis spawn position jitter half-width
    pub position_jitter: f32,
    /// Per-axis heading jitter half-width
    pub velocity_jitter: f32,
    /// Multiplier from jittered heading to spawn velocity
    pub velocity_scale: f32,
    pub ttl_min: f32,
    pub ttl_max: f32,
    /// Velocity multiplier applied every tick
    pub damping: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            position_jitter: 0.1,
            velocity_jitter: 0.3,
            velocity_scale: 0.1,
            ttl_min: 0.1,
            ttl_max: 0.5,
            damping: 0.90,
        }
    }
}

impl ParticleParams {
    /// Check jitter radii, the ttl range and the damping factor.
    ///
    /// # Errors
    ///
    /// Returns [`TrailError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), TrailError> {
        jitter_radius("position_jitter", self.position_jitter)?;
        jitter_radius("velocity_jitter", self.velocity_jitter)?;
        non_negative("velocity_scale", self.velocity_scale)?;

        if !(self.ttl_min.is_finite() && self.ttl_min > 0.0) {
            return Err(TrailError::invalid_parameter(
                "ttl_min",
                format!("must be finite and positive, got {}", self.ttl_min),
            ));
        }
        if !self.ttl_max.is_finite() || self.ttl_max < self.ttl_min {
            return Err(TrailError::invalid_parameter(
                "ttl_max",
                format!(
                    "must be finite and >= ttl_min ({}), got {}",
                    self.ttl_min, self.ttl_max
                ),
            ));
        }

        if !(0.0..=1.0).contains(&self.damping) {
            return Err(TrailError::invalid_parameter(
                "damping",
                format!("must be within [0, 1], got {}", self.damping),
            ));
        }

        Ok(())
    }
}

pub(crate) fn non_negative(name: &'static str, value: f32) -> Result<(), TrailError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TrailError::invalid_parameter(
            name,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}

/// The jitter draw spans `-r..=r`, so `2 * r` must stay finite too
fn jitter_radius(name: &'static str, value: f32) -> Result<(), TrailError> {
    non_negative(name, value)?;
    if (2.0 * value).is_finite() {
        Ok(())
    } else {
        Err(TrailError::invalid_parameter(
            name,
            format!("jitter span 2 * {value} overflows f32"),
        ))
    }
}

/// Ring-buffer particle pool
#[derive(Debug, Clone)]
pub struct ParticlePool {
    positions: Vec<Vec3>,
    velocities: Vec<Vec3>,
    // Reserved for a force term; never written
    accelerations: Vec<Vec3>,
    ttl: Vec<f32>,
    alive: Vec<bool>,
    cursor: usize,
    params: ParticleParams,
}

impl ParticlePool {
    /// Allocate `capacity` dead slots at the origin.
    ///
    /// # Errors
    ///
    /// Fails on zero capacity or when `params` does not validate.
    pub fn new(capacity: usize, params: ParticleParams) -> Result<Self, TrailError> {
        if capacity == 0 {
            return Err(TrailError::invalid_parameter(
                "capacity",
                "must be at least 1",
            ));
        }
        params.validate()?;

        Ok(Self {
            positions: vec![Vec3::zeros(); capacity],
            velocities: vec![Vec3::zeros(); capacity],
            accelerations: vec![Vec3::zeros(); capacity],
            ttl: vec![0.0; capacity],
            alive: vec![false; capacity],
            cursor: 0,
            params,
        })
    }

    /// Spawn `count` particles at `origin` drifting along `heading`.
    ///
    /// Slots `cursor..cursor + count` (modulo capacity) are overwritten
    /// whether or not they hold a live particle, then the cursor advances by
    /// `count`. `heading` is expected to be unit length or zero; a heading with
    /// non-finite components is treated as zero.
    pub fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        origin: Vec3,
        heading: Vec3,
        count: usize,
    ) {
        let heading = if heading.iter().all(|c| c.is_finite()) {
            heading
        } else {
            Vec3::zeros()
        };

        let capacity = self.capacity();
        let ParticleParams {
            position_jitter,
            velocity_jitter,
            velocity_scale,
            ttl_min,
            ttl_max,
            ..
        } = self.params;

        for i in 0..count {
            let slot = (self.cursor + i) % capacity;

            self.positions[slot] = origin + jitter(rng, position_jitter);
            self.velocities[slot] = (heading + jitter(rng, velocity_jitter)) * velocity_scale;
            self.ttl[slot] = rng.random_range(ttl_min..=ttl_max);
            self.alive[slot] = true;
        }

        self.cursor = (self.cursor + count) % capacity;
    }

    /// Run one simulation tick and return how many particles expired.
    pub fn tick(&mut self, dt: f32) -> usize {
        for ttl in &mut self.ttl {
            *ttl -= dt;
        }

        let mut expired = 0;
        for (alive, ttl) in self.alive.iter_mut().zip(&self.ttl) {
            if *alive && *ttl <= 0.0 {
                *alive = false;
                expired += 1;
            }
        }

        // gravity hook: accelerations stay zero

        let damping = self.params.damping;
        for velocity in &mut self.velocities {
            *velocity *= damping;
        }

        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            *position += *velocity;
        }

        expired
    }

    /// Number of alive slots
    pub fn live_count(&self) -> usize {
        self.alive.iter().filter(|alive| **alive).count()
    }

    pub fn capacity(&self) -> usize {
        self.alive.len()
    }

    /// Slot the next spawn writes to first
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn velocities(&self) -> &[Vec3] {
        &self.velocities
    }

    /// Reserved per-slot acceleration, always zero
    pub fn accelerations(&self) -> &[Vec3] {
        &self.accelerations
    }

    /// Seconds remaining per slot. Meaningless for dead slots.
    pub fn ttls(&self) -> &[f32] {
        &self.ttl
    }

    pub fn alive(&self) -> &[bool] {
        &self.alive
    }
}

fn jitter<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-radius..=radius),
        rng.random_range(-radius..=radius),
        rng.random_range(-radius..=radius),
    )
}
