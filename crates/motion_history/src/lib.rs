//! Bounded per-joint ring buffer of tracked samples with derivative
//! queries. One `MotionHistory` is owned per joint by a detector; it knows
//! nothing about phases or kicks, only about turning a short window of
//! positions into velocities, accelerations, and a peak speed.

use std::collections::VecDeque;

use motion_core::logging::warn_non_monotonic_frame;
use nalgebra::{Point3, Vector3};
use types::geometry::{elapsed_seconds, millimeters_to_meters};
use types::{Confidence, JointSample};

/// Oldest-first ring, capacity 30 (~1s at 30 Hz).
pub const CAPACITY: usize = 30;

#[derive(Clone, Debug)]
pub struct MotionHistory {
    label: &'static str,
    samples: VecDeque<JointSample>,
}

impl Default for MotionHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionHistory {
    pub fn new() -> Self {
        Self::named("joint")
    }

    /// Same as `new`, but `label` identifies the joint in the warning
    /// logged for an out-of-order frame (spec §7).
    pub fn named(label: &'static str) -> Self {
        Self {
            label,
            samples: VecDeque::with_capacity(CAPACITY),
        }
    }

    /// Out-of-order or stalled timestamps are dropped from derivative
    /// computation (spec §7): the sample is still stored so the window's
    /// size stays stable, but a frame that moves time backwards is logged
    /// since a tracker producing these repeatedly signals upstream trouble.
    pub fn add_frame(&mut self, position_mm: Point3<f32>, timestamp_us: u64, confidence: Confidence) {
        if let Some(last) = self.samples.back() {
            if timestamp_us < last.timestamp_us {
                warn_non_monotonic_frame(self.label, last.timestamp_us, timestamp_us);
            }
        }
        if self.samples.len() == CAPACITY {
            self.samples.pop_front();
        }
        self.samples
            .push_back(JointSample::new(position_mm, timestamp_us, confidence));
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn has_enough_data(&self) -> bool {
        self.samples.len() >= 3
    }

    /// Sample `k` frames back; `k = 0` is the most recent.
    fn sample(&self, k: usize) -> Option<&JointSample> {
        let len = self.samples.len();
        if k >= len {
            return None;
        }
        self.samples.get(len - 1 - k)
    }

    /// Position `k` frames back, converted to meters. Fails when `k >= len`.
    pub fn get_position(&self, k: usize) -> Option<Point3<f32>> {
        self.sample(k).map(|s| millimeters_to_meters(s.position_mm))
    }

    /// Velocity "at" index `k`: the derivative between sample `k` and the
    /// one before it (`k + 1`). Fails when either sample is missing.
    pub fn get_velocity(&self, k: usize) -> Option<Vector3<f32>> {
        let newer = self.sample(k)?;
        let older = self.sample(k + 1)?;
        Some(Self::velocity_between(older, newer))
    }

    /// Zero for an unreliable endpoint or a non-positive time delta, so a
    /// dropout frame contributes "no motion" rather than a spike.
    fn velocity_between(older: &JointSample, newer: &JointSample) -> Vector3<f32> {
        if !older.confidence.is_reliable() || !newer.confidence.is_reliable() {
            return Vector3::zeros();
        }
        let dt = elapsed_seconds(older.timestamp_us, newer.timestamp_us);
        if dt <= 0.0 {
            return Vector3::zeros();
        }
        let delta_m = millimeters_to_meters(newer.position_mm) - millimeters_to_meters(older.position_mm);
        delta_m / dt
    }

    pub fn get_current_velocity(&self) -> Vector3<f32> {
        self.get_velocity(0).unwrap_or_else(Vector3::zeros)
    }

    pub fn get_current_speed(&self) -> f32 {
        self.get_current_velocity().norm()
    }

    pub fn get_current_acceleration(&self) -> Vector3<f32> {
        let (Some(newer_velocity), Some(older_velocity), Some(newest), Some(middle)) = (
            self.get_velocity(0),
            self.get_velocity(1),
            self.sample(0),
            self.sample(1),
        ) else {
            return Vector3::zeros();
        };
        let dt = elapsed_seconds(middle.timestamp_us, newest.timestamp_us);
        if dt <= 0.0 {
            return Vector3::zeros();
        }
        (newer_velocity - older_velocity) / dt
    }

    /// Mean of the last `n` inter-frame velocities, used to latch a kick or
    /// header direction. Clamped to however many velocities actually exist;
    /// zero if none do.
    pub fn get_average_velocity(&self, n: usize) -> Vector3<f32> {
        let available = self.samples.len().saturating_sub(1);
        let count = n.min(available);
        if count == 0 {
            return Vector3::zeros();
        }
        let sum: Vector3<f32> = (0..count)
            .filter_map(|k| self.get_velocity(k))
            .sum();
        sum / count as f32
    }

    /// Maximum speed over the whole stored window.
    pub fn get_peak_speed(&self) -> f32 {
        let available = self.samples.len().saturating_sub(1);
        (0..available)
            .filter_map(|k| self.get_velocity(k))
            .map(|v| v.norm())
            .fold(0.0_f32, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use types::Confidence::{High, Low};

    fn history_with(samples: &[(f32, u64)]) -> MotionHistory {
        let mut history = MotionHistory::new();
        for &(z_mm, t_us) in samples {
            history.add_frame(Point3::new(0.0, 0.0, z_mm), t_us, High);
        }
        history
    }

    #[test]
    fn never_grows_past_capacity() {
        let mut history = MotionHistory::new();
        for i in 0..(CAPACITY * 3) {
            history.add_frame(Point3::origin(), i as u64 * 1_000, High);
        }
        assert_eq!(history.len(), CAPACITY);
    }

    #[test]
    fn clear_resets_to_empty() {
        let mut history = history_with(&[(0.0, 0), (10.0, 33_333)]);
        history.clear();
        assert!(!history.has_enough_data());
        assert_relative_eq!(history.get_current_speed(), 0.0);
    }

    #[test]
    fn two_calls_to_clear_are_equivalent_to_one() {
        let mut history = history_with(&[(0.0, 0), (10.0, 33_333), (20.0, 66_666)]);
        history.clear();
        history.clear();
        assert_eq!(history.len(), 0);
    }

    #[test]
    fn fewer_than_two_samples_yields_zero_velocity() {
        let history = history_with(&[(0.0, 0)]);
        assert_relative_eq!(history.get_current_speed(), 0.0);
    }

    #[test]
    fn constant_position_stream_has_zero_speed_and_no_motion() {
        let mut history = MotionHistory::new();
        for i in 0..30 {
            history.add_frame(Point3::new(1.0, 2.0, 3.0), i as u64 * 33_333, High);
        }
        assert_relative_eq!(history.get_current_speed(), 0.0);
    }

    #[test]
    fn velocity_converts_millimeters_and_microseconds_to_si() {
        // 100mm over 1/30s is 3 m/s forward.
        let history = history_with(&[(0.0, 0), (100.0, 33_333)]);
        let velocity = history.get_current_velocity();
        assert_relative_eq!(velocity.z, 3.0, epsilon = 1e-2);
        assert_relative_eq!(history.get_current_speed(), 3.0, epsilon = 1e-2);
    }

    #[test]
    fn zero_time_delta_does_not_divide_by_zero() {
        let history = history_with(&[(0.0, 1_000), (500.0, 1_000)]);
        assert_relative_eq!(history.get_current_speed(), 0.0);
    }

    #[test]
    fn out_of_order_timestamp_is_stored_but_yields_zero_velocity() {
        // Stalled/out-of-order frame moving time backwards: still kept so
        // the window size stays stable, but contributes no derivative.
        let history = history_with(&[(0.0, 66_666), (100.0, 33_333)]);
        assert_eq!(history.len(), 2);
        assert_relative_eq!(history.get_current_speed(), 0.0);
    }

    #[test]
    fn low_confidence_sample_does_not_spike_velocity() {
        let mut history = MotionHistory::new();
        history.add_frame(Point3::new(0.0, 0.0, 0.0), 0, High);
        // A huge, physically implausible jump, but reported low-confidence.
        history.add_frame(Point3::new(0.0, 0.0, 5_000.0), 33_333, Low);
        assert_relative_eq!(history.get_current_speed(), 0.0);
    }

    #[test]
    fn acceleration_needs_three_samples() {
        let history = history_with(&[(0.0, 0), (100.0, 33_333)]);
        assert_eq!(history.get_current_acceleration(), Vector3::zeros());

        let history = history_with(&[(0.0, 0), (100.0, 33_333), (300.0, 66_666)]);
        assert!(history.get_current_acceleration().norm() > 0.0);
    }

    #[test]
    fn average_velocity_matches_hand_computed_mean() {
        // Constant 3 m/s forward for three inter-frame steps.
        let history = history_with(&[(0.0, 0), (100.0, 33_333), (200.0, 66_666), (300.0, 99_999)]);
        let average = history.get_average_velocity(3);
        assert_relative_eq!(average.z, 3.0, epsilon = 1e-1);
    }

    #[test]
    fn peak_speed_is_the_maximum_over_the_window() {
        let history = history_with(&[(0.0, 0), (10.0, 33_333), (500.0, 66_666), (520.0, 99_999)]);
        let peak = history.get_peak_speed();
        // the 490mm jump between samples 1 and 2 dominates.
        assert!(peak > 10.0);
    }

    proptest::proptest! {
        #[test]
        fn velocity_sign_follows_motion_direction(step_mm in -50.0f32..50.0) {
            let history = history_with(&[(0.0, 0), (step_mm, 33_333)]);
            let velocity = history.get_current_velocity();
            if step_mm > 0.0 {
                prop_assert!(velocity.z >= 0.0);
            } else if step_mm < 0.0 {
                prop_assert!(velocity.z <= 0.0);
            }
        }
    }
}
