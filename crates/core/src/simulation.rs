//! Frame driver tying the comet path to the particle pool.
//!
//! One frame, in order:
//! 1. advance the keyframe clock by `dt` and sample the comet position
//! 2. move the comet there and derive its heading
//! 3. spawn `gen_rate` particles at the comet along that heading
//! 4. tick the pool by `dt`
//! 5. hand the buffers to the renderer
//!
//! The whole update completes before the renderer reads the buffers; there is
//! no double buffering.

use crate::clock::WallClock;
use crate::comet::Comet;
use crate::config::TrailConfig;
use crate::core_types::Vec3;
use crate::error::TrailError;
use crate::particles::ParticlePool;
use crate::pather::KeyframePather;
use crate::render::{BufferUsage, CometMarker, LivenessBuffer, PointCloudFrame, RenderSink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, trace};

/// What happened during one [`TrailSimulation::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Zero-based frame number
    pub frame: u64,
    pub dt: f32,
    pub comet_position: Vec3,
    /// Unit heading of the comet this frame, zero when it did not move
    pub heading: Vec3,
    /// The comet finished a path segment this frame
    pub segment_complete: bool,
    pub spawned: usize,
    /// Particles whose ttl ran out during this frame's tick
    pub expired: usize,
    /// Alive slots after the tick
    pub live: usize,
}

/// Comet trail simulation
pub struct TrailSimulation {
    config: TrailConfig,
    pather: KeyframePather,
    comet: Comet,
    pool: ParticlePool,
    liveness: LivenessBuffer,
    rng: StdRng,
    frame: u64,
}

impl TrailSimulation {
    /// Build a simulation from a validated configuration.
    ///
    /// The comet starts on the first keyframe. Jitter is drawn from a `StdRng`
    /// seeded with `config.seed`, or from the OS when no seed is set.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure of `config`, including invalid
    /// keyframe sequences.
    pub fn new(config: TrailConfig) -> Result<Self, TrailError> {
        config.validate()?;

        let pather = KeyframePather::new(config.keyframes.clone())?;
        let pool = ParticlePool::new(config.capacity, config.particle_params())?;
        let liveness = LivenessBuffer::new(config.capacity, config.alive_sentinel);
        let comet = Comet::new(pather.start_position());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "Comet trail ready: {} particle slots, {} per frame, {} keyframes, seed {:?}",
            config.capacity,
            config.gen_rate,
            config.keyframes.len(),
            config.seed
        );

        Ok(Self {
            config,
            pather,
            comet,
            pool,
            liveness,
            rng,
            frame: 0,
        })
    }

    /// Run one frame of simulation with delta `dt` seconds
    pub fn step(&mut self, dt: f32) -> FrameReport {
        let sample = self.pather.advance(dt);
        let heading = self.comet.move_to(sample.position);

        let spawned = self.config.gen_rate;
        self.pool.spawn(&mut self.rng, sample.position, heading, spawned);
        let expired = self.pool.tick(dt);
        let live = self.pool.live_count();

        trace!(
            "Frame {}: {} particles alive, {} expired",
            self.frame,
            live,
            expired
        );

        let report = FrameReport {
            frame: self.frame,
            dt,
            comet_position: sample.position,
            heading,
            segment_complete: sample.segment_complete,
            spawned,
            expired,
            live,
        };
        self.frame += 1;
        report
    }

    /// Hand this frame's buffers and comet marker to `sink`
    pub fn render<S: RenderSink + ?Sized>(&mut self, sink: &mut S) {
        let liveness = self.liveness.refresh(self.pool.alive());
        let frame = PointCloudFrame {
            positions: self.pool.positions(),
            liveness,
            usage: BufferUsage::Dynamic,
            needs_update: true,
            point_size_scale: self.config.point_size_scale,
        };
        sink.draw_points(&frame);
        sink.place_comet(&CometMarker::at(self.comet.position()));
    }

    /// Step and render once per delta until `ticks` runs out.
    ///
    /// Returns the number of frames run.
    pub fn run<I, S>(&mut self, ticks: I, sink: &mut S) -> u64
    where
        I: IntoIterator<Item = f32>,
        S: RenderSink + ?Sized,
    {
        let mut frames = 0;
        for dt in ticks {
            self.step(dt);
            self.render(sink);
            frames += 1;
        }
        frames
    }

    /// Run against the wall clock until the process ends
    pub fn run_realtime<S: RenderSink + ?Sized>(&mut self, sink: &mut S) -> u64 {
        self.run(WallClock::new(), sink)
    }

    /// Frames stepped so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn pather(&self) -> &KeyframePather {
        &self.pather
    }

    pub fn comet(&self) -> &Comet {
        &self.comet
    }
}
