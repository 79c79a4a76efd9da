//! Comet Trail Core Library
//!
//! Simulation core of a real-time particle-trail animation: a comet moves
//! along a looping keyframed path and sheds short-lived particles that drift
//! along its heading, slow down and fade out.
//!
//! ## Components
//!
//! - [`KeyframePather`] - piecewise-linear interpolation over timed keyframes
//! - [`ParticlePool`] - fixed-capacity ring buffer of particles (spawn, decay, damping, integration)
//! - [`TrailSimulation`] - per-frame driver feeding a [`RenderSink`]
//!
//! All state lives in host memory. Rendering is left to the host graphics
//! layer, which receives position and liveness buffers every frame.

// Core types and utilities
pub mod core_types;

pub mod clock;
pub mod comet;
pub mod config;
pub mod error;
pub mod particles;
pub mod pather;
pub mod render;
pub mod simulation;

// Re-export core types
pub use core_types::{Keyframe, Vec3};

pub use clock::{FixedStep, WallClock};
pub use comet::Comet;
pub use config::TrailConfig;
pub use error::TrailError;
pub use particles::{ParticleParams, ParticlePool};
pub use pather::{KeyframePather, PathSample};
pub use render::{BufferUsage, CometMarker, LivenessBuffer, PointCloudFrame, RenderSink};
pub use simulation::{FrameReport, TrailSimulation};
