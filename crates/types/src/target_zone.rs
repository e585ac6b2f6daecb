use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A spherical region in world (meters) coordinates used for accuracy
/// scoring. A non-positive radius is accepted: it simply makes the
/// zone unhittable, which accuracy scoring surfaces as a zero score rather
/// than an error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetZone {
    pub center: Point3<f32>,
    pub radius: f32,
}

impl TargetZone {
    pub fn new(center: Point3<f32>, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn is_valid(&self) -> bool {
        self.radius > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_radius_is_not_valid() {
        assert!(!TargetZone::new(Point3::origin(), 0.0).is_valid());
        assert!(!TargetZone::new(Point3::origin(), -1.0).is_valid());
        assert!(TargetZone::new(Point3::origin(), 0.1).is_valid());
    }
}
