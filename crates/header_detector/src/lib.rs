//! Six joint histories, the header phase state machine, and the
//! header-type classifier + quality scoring, all in one detector —
//! unlike kicks, headers have no separate analyzer stage.

mod snapshot;
mod tuning;

pub use snapshot::HeaderContactSnapshot;
pub use tuning::HeaderTuning;

use log::trace;
use motion_history::MotionHistory;
use nalgebra::Vector3;
use types::geometry::{angle_from_vertical_deg, elapsed_seconds, joint_angle_deg};
use types::{HeaderQuality, HeaderResult, HeaderType, JointId, SkeletonFrame};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HeaderPhase {
    Idle,
    Preparation,
    Contact,
    Recovery,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderEvent {
    pub result: HeaderResult,
    pub contact: HeaderContactSnapshot,
}

pub struct HeaderDetector {
    tuning: HeaderTuning,

    head: MotionHistory,
    neck: MotionHistory,
    spine_chest: MotionHistory,
    pelvis: MotionHistory,
    shoulder_left: MotionHistory,
    shoulder_right: MotionHistory,

    phase: HeaderPhase,
    phase_entered_at_us: u64,
    peak_head_speed_mps: f32,
    prior_head_speed_mps: f32,
    latched_direction: Vector3<f32>,
    latched_velocity: Vector3<f32>,
    contact: Option<HeaderContactSnapshot>,

    callback: Option<Box<dyn FnMut(HeaderEvent)>>,
}

impl Default for HeaderDetector {
    fn default() -> Self {
        Self::new(HeaderTuning::default())
    }
}

impl HeaderDetector {
    pub fn new(tuning: HeaderTuning) -> Self {
        Self {
            tuning,
            head: MotionHistory::named("head"),
            neck: MotionHistory::named("neck"),
            spine_chest: MotionHistory::named("spine_chest"),
            pelvis: MotionHistory::named("pelvis"),
            shoulder_left: MotionHistory::named("shoulder_left"),
            shoulder_right: MotionHistory::named("shoulder_right"),
            phase: HeaderPhase::Idle,
            phase_entered_at_us: 0,
            peak_head_speed_mps: 0.0,
            prior_head_speed_mps: 0.0,
            latched_direction: Vector3::zeros(),
            latched_velocity: Vector3::zeros(),
            contact: None,
            callback: None,
        }
    }

    pub fn phase(&self) -> HeaderPhase {
        self.phase
    }

    pub fn set_header_callback(&mut self, callback: Option<Box<dyn FnMut(HeaderEvent)>>) {
        self.callback = callback;
    }

    pub fn reset(&mut self) {
        self.phase = HeaderPhase::Idle;
        self.phase_entered_at_us = 0;
        self.peak_head_speed_mps = 0.0;
        self.prior_head_speed_mps = 0.0;
        self.latched_direction = Vector3::zeros();
        self.latched_velocity = Vector3::zeros();
        self.contact = None;
    }

    pub fn process_skeleton(&mut self, frame: &SkeletonFrame) {
        self.head.add_frame(frame[JointId::Head].position_mm, frame.timestamp_us, frame[JointId::Head].confidence);
        self.neck.add_frame(frame[JointId::Neck].position_mm, frame.timestamp_us, frame[JointId::Neck].confidence);
        self.spine_chest.add_frame(frame[JointId::SpineChest].position_mm, frame.timestamp_us, frame[JointId::SpineChest].confidence);
        self.pelvis.add_frame(frame[JointId::Pelvis].position_mm, frame.timestamp_us, frame[JointId::Pelvis].confidence);
        self.shoulder_left.add_frame(frame[JointId::ShoulderLeft].position_mm, frame.timestamp_us, frame[JointId::ShoulderLeft].confidence);
        self.shoulder_right.add_frame(frame[JointId::ShoulderRight].position_mm, frame.timestamp_us, frame[JointId::ShoulderRight].confidence);

        match self.phase {
            HeaderPhase::Idle => self.step_idle(frame.timestamp_us),
            HeaderPhase::Preparation => self.step_preparation(frame.timestamp_us),
            HeaderPhase::Contact => self.step_contact(frame.timestamp_us),
            HeaderPhase::Recovery => self.step_recovery(frame, frame.timestamp_us),
        }
    }

    fn enter_phase(&mut self, phase: HeaderPhase, timestamp_us: u64) {
        trace!("header phase {:?} -> {:?} at {}us", self.phase, phase, timestamp_us);
        self.phase = phase;
        self.phase_entered_at_us = timestamp_us;
    }

    fn step_idle(&mut self, timestamp_us: u64) {
        let speed = self.head.get_current_speed();
        let velocity = self.head.get_current_velocity();
        if speed > self.tuning.v_preparation && (velocity.y > 0.0 || velocity.z > 0.0) {
            self.peak_head_speed_mps = 0.0;
            self.prior_head_speed_mps = speed;
            self.enter_phase(HeaderPhase::Preparation, timestamp_us);
        }
    }

    fn step_preparation(&mut self, timestamp_us: u64) {
        let elapsed = elapsed_seconds(self.phase_entered_at_us, timestamp_us);
        if elapsed > self.tuning.preparation_timeout_s {
            self.reset();
            return;
        }

        let speed = self.head.get_current_speed();
        self.peak_head_speed_mps = self.peak_head_speed_mps.max(speed);

        let decelerating = speed < self.tuning.prior_speed_deceleration_ratio * self.prior_head_speed_mps;
        if elapsed >= self.tuning.preparation_min_time_s && self.prior_head_speed_mps > self.tuning.v_preparation && decelerating {
            let mean_velocity = self.head.get_average_velocity(3);
            self.latched_direction = if mean_velocity.norm() > 0.0 {
                mean_velocity.normalize()
            } else {
                Vector3::zeros()
            };
            self.latched_velocity = self.head.get_current_velocity();
            self.enter_phase(HeaderPhase::Contact, timestamp_us);
            return;
        }
        self.prior_head_speed_mps = speed;
    }

    fn step_contact(&mut self, timestamp_us: u64) {
        let elapsed = elapsed_seconds(self.phase_entered_at_us, timestamp_us);
        if elapsed >= self.tuning.contact_duration_s {
            self.contact = Some(self.capture_snapshot(timestamp_us));
            self.enter_phase(HeaderPhase::Recovery, timestamp_us);
        }
    }

    fn step_recovery(&mut self, frame: &SkeletonFrame, timestamp_us: u64) {
        let elapsed = elapsed_seconds(self.phase_entered_at_us, timestamp_us);
        let speed = self.head.get_current_speed();
        if elapsed >= self.tuning.recovery_duration_s || speed < self.tuning.recovery_speed_exit_mps {
            if let Some(contact) = self.contact.take() {
                let result = self.assemble_result(&contact, frame, timestamp_us);
                if let Some(callback) = self.callback.as_mut() {
                    callback(HeaderEvent { result, contact });
                }
            }
            self.reset();
        }
    }

    fn capture_snapshot(&self, timestamp_us: u64) -> HeaderContactSnapshot {
        HeaderContactSnapshot {
            peak_head_speed_mps: self.peak_head_speed_mps,
            latched_direction: self.latched_direction,
            latched_velocity: self.latched_velocity,
            contact_timestamp_us: timestamp_us,
            completion_timestamp_us: timestamp_us,
            head_position_m: self.head.get_position(0).unwrap_or_default(),
            neck_position_m: self.neck.get_position(0).unwrap_or_default(),
            spine_chest_position_m: self.spine_chest.get_position(0).unwrap_or_default(),
            pelvis_position_m: self.pelvis.get_position(0).unwrap_or_default(),
        }
    }

    fn classify(&self, contact: &HeaderContactSnapshot) -> HeaderType {
        let lean = angle_from_vertical_deg(contact.head_position_m - contact.pelvis_position_m);
        if lean > self.tuning.lean_threshold_deg {
            return HeaderType::GlidingHeader;
        }
        if contact.peak_head_speed_mps >= self.tuning.power_header_speed_mps && contact.latched_velocity.y < 0.0 {
            return HeaderType::PowerHeader;
        }
        if contact.latched_velocity.x.abs() > contact.latched_velocity.z.abs() {
            return HeaderType::FlickOn;
        }
        if contact.latched_velocity.y > 0.0 {
            return HeaderType::DefensiveClear;
        }
        HeaderType::PowerHeader
    }

    fn score(&self, contact: &HeaderContactSnapshot) -> HeaderQuality {
        let head_velocity_mps = contact.peak_head_speed_mps;
        let neck_angle_deg = joint_angle_deg(contact.head_position_m, contact.neck_position_m, contact.spine_chest_position_m);

        let alignment = contact.spine_chest_position_m - contact.pelvis_position_m;
        let body_alignment_score = if alignment.norm() > f32::EPSILON && contact.latched_direction.norm() > f32::EPSILON {
            (alignment.normalize().dot(&contact.latched_direction) + 1.0) * 50.0
        } else {
            50.0
        };

        let power_score = (100.0 * head_velocity_mps / 4.0).min(100.0);
        let timing_score = if head_velocity_mps > 1.5 { 80.0 } else { 60.0 };
        let overall_score = HeaderQuality::weighted_overall(power_score, timing_score, body_alignment_score);

        HeaderQuality {
            head_velocity_mps,
            neck_angle_deg,
            body_alignment_score,
            timing_score,
            power_score,
            overall_score,
        }
    }

    fn assemble_result(&self, contact: &HeaderContactSnapshot, _frame: &SkeletonFrame, timestamp_us: u64) -> HeaderResult {
        HeaderResult {
            header_type: self.classify(contact),
            direction: contact.latched_direction,
            timestamp_us,
            valid: true,
            quality: self.score(contact),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::cell::RefCell;
    use std::rc::Rc;
    use types::{Confidence, JointSample};

    fn stationary_frame(timestamp_us: u64) -> SkeletonFrame {
        let mut frame = SkeletonFrame::new(timestamp_us);
        for &id in JointId::ALL.iter() {
            frame.set(id, JointSample::new(Point3::origin(), timestamp_us, Confidence::High));
        }
        frame.set(JointId::Pelvis, JointSample::new(Point3::new(0.0, 900.0, 0.0), timestamp_us, Confidence::High));
        frame.set(JointId::SpineChest, JointSample::new(Point3::new(0.0, 1300.0, 0.0), timestamp_us, Confidence::High));
        frame.set(JointId::Neck, JointSample::new(Point3::new(0.0, 1500.0, 0.0), timestamp_us, Confidence::High));
        frame
    }

    #[test]
    fn quiet_idle_emits_no_events() {
        let mut detector = HeaderDetector::default();
        for i in 0..90u64 {
            detector.process_skeleton(&stationary_frame(i * 33_333));
        }
        assert_eq!(detector.phase(), HeaderPhase::Idle);
    }

    #[test]
    fn diving_header_classifies_as_gliding() {
        let mut detector = HeaderDetector::default();
        let events = Rc::new(RefCell::new(Vec::new()));
        let events_clone = events.clone();
        detector.set_header_callback(Some(Box::new(move |event| events_clone.borrow_mut().push(event))));

        let dt_us = 33_333;
        let mut t = 0u64;
        let head_y = 1700.0_f32; // pelvis is at y=900, so dy=800 throughout.
        let mut head_z = 0.0_f32;

        detector.process_skeleton(&stationary_frame(t));

        // Head reaches forward at high speed (vz > 0 satisfies Idle entry);
        // the forward reach outgrows the vertical offset from the pelvis,
        // producing a lean well past 45 degrees by Contact.
        for _ in 0..6 {
            t += dt_us;
            head_z += 300.0;
            let mut frame = stationary_frame(t);
            frame.set(JointId::Head, JointSample::new(Point3::new(0.0, head_y, head_z), t, Confidence::High));
            detector.process_skeleton(&frame);
        }
        // Sharp deceleration (head speed collapses below 0.6x prior).
        t += dt_us;
        head_z += 20.0;
        let mut frame = stationary_frame(t);
        frame.set(JointId::Head, JointSample::new(Point3::new(0.0, head_y, head_z), t, Confidence::High));
        detector.process_skeleton(&frame);

        // Let Contact and Recovery elapse with the head settling.
        for _ in 0..20 {
            t += dt_us;
            let mut frame = stationary_frame(t);
            frame.set(JointId::Head, JointSample::new(Point3::new(0.0, head_y, head_z), t, Confidence::High));
            detector.process_skeleton(&frame);
        }

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].result.header_type, HeaderType::GlidingHeader);
    }

    #[test]
    fn reset_is_idempotent() {
        let mut detector = HeaderDetector::default();
        detector.process_skeleton(&stationary_frame(0));
        detector.reset();
        detector.reset();
        assert_eq!(detector.phase(), HeaderPhase::Idle);
    }
}
