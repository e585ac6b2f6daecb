//! Coordinate constants and small vector-geometry helpers shared by every
//! detector and analyzer, so unit conversions live in one place instead of
//! being sprinkled through the phase state machines.

use nalgebra::{Point3, Vector3};

/// Depth-camera positions arrive in millimeters; scoring and velocity math
/// is done in meters.
pub const MM_PER_M: f32 = 1000.0;

/// Frame timestamps are microseconds, monotonic.
pub const US_PER_S: f32 = 1_000_000.0;

/// +Y is up, +Z is forward (away from camera), +X is camera-right.
pub const UP: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);
pub const FORWARD: Vector3<f32> = Vector3::new(0.0, 0.0, 1.0);

pub fn millimeters_to_meters(position: Point3<f32>) -> Point3<f32> {
    Point3::from(position.coords / MM_PER_M)
}

/// Seconds elapsed from `from_us` to `to_us`. Zero if the stream did not
/// advance (or went backwards); callers treat that as "no time passed"
/// rather than dividing by zero.
pub fn elapsed_seconds(from_us: u64, to_us: u64) -> f32 {
    if to_us <= from_us {
        return 0.0;
    }
    (to_us - from_us) as f32 / US_PER_S
}

/// Angle in degrees between two vectors, 0 for parallel, 180 for opposed.
/// Returns 0 for a degenerate (near-zero-length) input rather than NaN.
pub fn angle_between_deg(a: Vector3<f32>, b: Vector3<f32>) -> f32 {
    let denom = a.norm() * b.norm();
    if denom < f32::EPSILON {
        return 0.0;
    }
    let cosine = (a.dot(&b) / denom).clamp(-1.0, 1.0);
    cosine.acos().to_degrees()
}

/// Angle in degrees of `v` away from vertical (+Y), used for body lean.
pub fn angle_from_vertical_deg(v: Vector3<f32>) -> f32 {
    angle_between_deg(v, UP)
}

/// Interior angle in degrees at vertex `b` of the joint chain a-b-c, e.g.
/// the knee angle formed by hip-knee-ankle.
pub fn joint_angle_deg(a: Point3<f32>, b: Point3<f32>, c: Point3<f32>) -> f32 {
    angle_between_deg(a - b, c - b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn elapsed_seconds_is_zero_for_non_increasing_timestamps() {
        assert_relative_eq!(elapsed_seconds(1_000, 1_000), 0.0);
        assert_relative_eq!(elapsed_seconds(1_000, 500), 0.0);
    }

    #[test]
    fn elapsed_seconds_converts_microseconds() {
        assert_relative_eq!(elapsed_seconds(0, 1_000_000), 1.0);
        assert_relative_eq!(elapsed_seconds(0, 500_000), 0.5);
    }

    #[test]
    fn right_angle_joint() {
        let hip = Point3::new(0.0, 1.0, 0.0);
        let knee = Point3::new(0.0, 0.0, 0.0);
        let ankle = Point3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(joint_angle_deg(hip, knee, ankle), 90.0, epsilon = 1e-3);
    }

    #[test]
    fn straight_leg_joint_is_180_degrees() {
        let hip = Point3::new(0.0, 2.0, 0.0);
        let knee = Point3::new(0.0, 1.0, 0.0);
        let ankle = Point3::new(0.0, 0.0, 0.0);
        assert_relative_eq!(joint_angle_deg(hip, knee, ankle), 180.0, epsilon = 1e-3);
    }

    #[test]
    fn degenerate_joint_angle_is_zero_not_nan() {
        let p = Point3::new(0.0, 0.0, 0.0);
        assert_relative_eq!(joint_angle_deg(p, p, p), 0.0);
    }
}
