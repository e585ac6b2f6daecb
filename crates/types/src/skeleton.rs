use std::ops::{Index, IndexMut};

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::joint::JointId;

/// One tracked joint at one instant. Immutable once constructed; a new
/// frame produces new samples rather than mutating old ones.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointSample {
    /// Millimeters, camera frame.
    pub position_mm: Point3<f32>,
    pub timestamp_us: u64,
    pub confidence: Confidence,
}

impl JointSample {
    pub fn new(position_mm: Point3<f32>, timestamp_us: u64, confidence: Confidence) -> Self {
        Self {
            position_mm,
            timestamp_us,
            confidence,
        }
    }

    pub fn untracked(timestamp_us: u64) -> Self {
        Self {
            position_mm: Point3::origin(),
            timestamp_us,
            confidence: Confidence::None,
        }
    }
}

/// One pose: every joint sample for a single camera frame, keyed by
/// `JointId`. Passed by value and does not persist beyond the call that
/// receives it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkeletonFrame {
    pub timestamp_us: u64,
    joints: [JointSample; JointId::COUNT],
}

impl SkeletonFrame {
    pub fn new(timestamp_us: u64) -> Self {
        Self {
            timestamp_us,
            joints: [JointSample::untracked(timestamp_us); JointId::COUNT],
        }
    }

    pub fn with_joint(mut self, id: JointId, sample: JointSample) -> Self {
        self[id] = sample;
        self
    }

    pub fn set(&mut self, id: JointId, sample: JointSample) {
        self[id] = sample;
    }

    pub fn joints(&self) -> impl Iterator<Item = (JointId, &JointSample)> {
        JointId::ALL.iter().map(move |&id| (id, &self[id]))
    }
}

impl Index<JointId> for SkeletonFrame {
    type Output = JointSample;

    fn index(&self, id: JointId) -> &Self::Output {
        &self.joints[id.index()]
    }
}

impl IndexMut<JointId> for SkeletonFrame {
    fn index_mut(&mut self, id: JointId) -> &mut Self::Output {
        &mut self.joints[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_frame_has_no_confidence_anywhere() {
        let frame = SkeletonFrame::new(0);
        for (_, sample) in frame.joints() {
            assert_eq!(sample.confidence, Confidence::None);
        }
    }

    #[test]
    fn with_joint_round_trips() {
        let sample = JointSample::new(Point3::new(1.0, 2.0, 3.0), 42, Confidence::High);
        let frame = SkeletonFrame::new(42).with_joint(JointId::Head, sample);
        assert_eq!(frame[JointId::Head], sample);
        assert_eq!(frame[JointId::Pelvis].confidence, Confidence::None);
    }
}
