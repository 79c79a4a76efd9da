//! Vector type alias for 3D positions, velocities and headings.

use nalgebra::Vector3;

/// 3D vector type used for the comet, keyframe anchors and every particle slot.
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, matching the
/// single-precision buffers handed to the renderer.
pub type Vec3 = Vector3<f32>;
