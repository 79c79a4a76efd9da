//! The comet: a single moving point whose motion sets the particle heading.

use crate::core_types::Vec3;

/// Current comet position and the heading derived from its last move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comet {
    position: Vec3,
    heading: Vec3,
}

impl Comet {
    /// Place a stationary comet at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            heading: Vec3::zeros(),
        }
    }

    /// Move to `position` and return the unit heading from the previous position.
    ///
    /// A move shorter than `f32::EPSILON` (or a non-finite one) yields a zero
    /// heading so no NaN reaches spawned velocities.
    pub fn move_to(&mut self, position: Vec3) -> Vec3 {
        let delta = position - self.position;
        self.heading = delta
            .try_normalize(f32::EPSILON)
            .filter(|h| h.iter().all(|c| c.is_finite()))
            .unwrap_or_else(Vec3::zeros);
        self.position = position;
        self.heading
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Heading of the last move, zero when stationary
    pub fn heading(&self) -> Vec3 {
        self.heading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heading_points_from_previous_to_new() {
        let mut comet = Comet::new(Vec3::new(1.0, 1.0, 1.0));
        let heading = comet.move_to(Vec3::new(1.0, 4.0, 5.0));

        assert_relative_eq!(heading.norm(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(heading.y, 0.6, epsilon = 1e-6);
        assert_relative_eq!(heading.z, 0.8, epsilon = 1e-6);
        assert_eq!(comet.position(), Vec3::new(1.0, 4.0, 5.0));
        assert_eq!(comet.heading(), heading);
    }

    #[test]
    fn test_stationary_comet_has_zero_heading() {
        let mut comet = Comet::new(Vec3::new(2.0, 0.0, 0.0));
        comet.move_to(Vec3::new(3.0, 0.0, 0.0));

        let heading = comet.move_to(Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(heading, Vec3::zeros());
        assert!(heading.iter().all(|c| !c.is_nan()));
    }

    #[test]
    fn test_non_finite_move_has_zero_heading() {
        let mut comet = Comet::new(Vec3::zeros());
        let heading = comet.move_to(Vec3::new(f32::INFINITY, 0.0, 0.0));
        assert_eq!(heading, Vec3::zeros());
    }
}
