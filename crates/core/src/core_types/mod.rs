//! Core types shared by the pather, the particle pool and the frame driver

pub mod keyframe;
pub mod vec3;

pub use keyframe::{default_comet_path, validate_keyframes, Keyframe};
pub use vec3::Vec3;
