//! Renderer boundary.
//!
//! Drawing is delegated to a host graphics layer through [`RenderSink`]. Each
//! frame the sink receives the full position buffer and a byte liveness
//! buffer, both flagged as rewritten, plus a [`CometMarker`] for the comet mesh.
//!
//! The liveness buffer carries a magnitude, not a boolean: point shaders size
//! each vertex as `flag * scale`, so dead slots (flag 0) collapse to nothing
//! and alive slots render at `sentinel * scale`.

use crate::core_types::Vec3;

/// Radius of the sphere mesh drawn at the comet position
pub const COMET_RADIUS: f32 = 0.3;

/// Upload hint for GPU-side buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    /// Uploaded once
    Static,
    /// Rewritten every frame
    Dynamic,
}

/// Buffers handed to the renderer for one frame
#[derive(Debug, Clone, Copy)]
pub struct PointCloudFrame<'a> {
    /// One position per slot, dead slots included
    pub positions: &'a [Vec3],
    /// One flag per slot: 0 for dead, the alive sentinel otherwise
    pub liveness: &'a [u8],
    pub usage: BufferUsage,
    /// Both buffers changed in place since the last frame
    pub needs_update: bool,
    /// Point size per unit of liveness value
    pub point_size_scale: f32,
}

impl PointCloudFrame<'_> {
    /// Size the point shader gives slot `index`
    pub fn point_size(&self, index: usize) -> f32 {
        point_size(self.liveness[index], self.point_size_scale)
    }

    /// Iterator over the positions of slots with a nonzero flag
    pub fn visible_positions(&self) -> impl Iterator<Item = &Vec3> + '_ {
        self.positions
            .iter()
            .zip(self.liveness)
            .filter(|(_, flag)| **flag != 0)
            .map(|(position, _)| position)
    }
}

/// Comet mesh placement for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometMarker {
    pub position: Vec3,
    /// Sphere radius of the mesh
    pub radius: f32,
    /// The sphere geometry never changes; only its translation moves
    pub geometry_usage: BufferUsage,
}

impl CometMarker {
    /// Standard comet sphere at `position`
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            radius: COMET_RADIUS,
            geometry_usage: BufferUsage::Static,
        }
    }
}

/// Host graphics collaborator
pub trait RenderSink {
    /// Draw every slot as a point sized by its liveness flag
    fn draw_points(&mut self, frame: &PointCloudFrame<'_>);

    /// Draw the comet mesh
    fn place_comet(&mut self, comet: &CometMarker);
}

/// Encode a slot's liveness for the point shader
#[inline]
pub fn liveness_flag(alive: bool, sentinel: u8) -> u8 {
    if alive {
        sentinel
    } else {
        0
    }
}

/// Point size rule: `flag * scale`
#[inline]
pub fn point_size(flag: u8, scale: f32) -> f32 {
    f32::from(flag) * scale
}

/// Byte liveness buffer kept in step with the pool's alive flags
#[derive(Debug, Clone)]
pub struct LivenessBuffer {
    flags: Vec<u8>,
    sentinel: u8,
}

impl LivenessBuffer {
    pub fn new(capacity: usize, sentinel: u8) -> Self {
        Self {
            flags: vec![0; capacity],
            sentinel,
        }
    }

    /// Re-encode `alive` into the byte buffer and return it
    pub fn refresh(&mut self, alive: &[bool]) -> &[u8] {
        self.flags.resize(alive.len(), 0);
        for (flag, alive) in self.flags.iter_mut().zip(alive) {
            *flag = liveness_flag(*alive, self.sentinel);
        }
        &self.flags
    }

    pub fn flags(&self) -> &[u8] {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_liveness_encoding() {
        assert_eq!(liveness_flag(true, 5), 5);
        assert_eq!(liveness_flag(false, 5), 0);
    }

    #[test]
    fn test_point_size_rule() {
        assert_relative_eq!(point_size(5, 0.3), 1.5, epsilon = 1e-6);
        assert_eq!(point_size(0, 0.3), 0.0);
    }

    #[test]
    fn test_liveness_buffer_refresh() {
        let mut buffer = LivenessBuffer::new(4, 5);
        assert_eq!(buffer.flags(), &[0, 0, 0, 0]);

        let flags = buffer.refresh(&[true, false, true, false]);
        assert_eq!(flags, &[5, 0, 5, 0]);

        let flags = buffer.refresh(&[false, false, true, true]);
        assert_eq!(flags, &[0, 0, 5, 5]);
    }

    #[test]
    fn test_comet_marker_uses_static_sphere() {
        let marker = CometMarker::at(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(marker.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(marker.radius, COMET_RADIUS);
        assert_eq!(marker.geometry_usage, BufferUsage::Static);
    }

    #[test]
    fn test_frame_visibility() {
        let positions = [Vec3::x(), Vec3::y(), Vec3::z()];
        let liveness = [5, 0, 5];
        let frame = PointCloudFrame {
            positions: &positions,
            liveness: &liveness,
            usage: BufferUsage::Dynamic,
            needs_update: true,
            point_size_scale: 0.3,
        };

        let visible: Vec<_> = frame.visible_positions().copied().collect();
        assert_eq!(visible, vec![Vec3::x(), Vec3::z()]);
        assert_eq!(frame.point_size(1), 0.0);
        assert!(frame.point_size(0) > 0.0);
    }
}
