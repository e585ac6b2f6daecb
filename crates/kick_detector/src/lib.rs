//! Nine joint histories, dominant-foot selection, and the kick phase state
//! machine. Single-threaded, frame-driven: `process_skeleton` is the
//! only entry point, called synchronously once per camera frame.

mod snapshot;
mod tuning;

pub use snapshot::KickContactSnapshot;
pub use tuning::KickTuning;

use log::{debug, trace};
use motion_history::MotionHistory;
use nalgebra::Vector3;
use types::geometry::elapsed_seconds;
use types::{JointId, KickQuality, KickResult, KickType, Side, SkeletonFrame};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KickPhase {
    Idle,
    WindUp,
    Acceleration,
    Contact,
    FollowThrough,
}

/// Emitted once, at the end of FollowThrough. `result` carries the
/// detector's provisional classification and scores; `KickAnalyzer`
/// consumes `contact` to refine both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KickEvent {
    pub result: KickResult,
    pub contact: KickContactSnapshot,
}

pub struct KickDetector {
    tuning: KickTuning,

    pelvis: MotionHistory,
    hip_left: MotionHistory,
    hip_right: MotionHistory,
    knee_left: MotionHistory,
    knee_right: MotionHistory,
    ankle_left: MotionHistory,
    ankle_right: MotionHistory,
    foot_left: MotionHistory,
    foot_right: MotionHistory,

    dominant_foot: Side,
    phase: KickPhase,
    phase_entered_at_us: u64,
    windup_entered_at_us: u64,
    peak_foot_speed_mps: f32,
    prior_foot_speed_mps: f32,
    latched_direction: Vector3<f32>,
    contact: Option<KickContactSnapshot>,

    callback: Option<Box<dyn FnMut(KickEvent)>>,
}

impl Default for KickDetector {
    fn default() -> Self {
        Self::new(KickTuning::default())
    }
}

impl KickDetector {
    pub fn new(tuning: KickTuning) -> Self {
        Self {
            tuning,
            pelvis: MotionHistory::named("pelvis"),
            hip_left: MotionHistory::named("hip_left"),
            hip_right: MotionHistory::named("hip_right"),
            knee_left: MotionHistory::named("knee_left"),
            knee_right: MotionHistory::named("knee_right"),
            ankle_left: MotionHistory::named("ankle_left"),
            ankle_right: MotionHistory::named("ankle_right"),
            foot_left: MotionHistory::named("foot_left"),
            foot_right: MotionHistory::named("foot_right"),
            dominant_foot: Side::Unknown,
            phase: KickPhase::Idle,
            phase_entered_at_us: 0,
            windup_entered_at_us: 0,
            peak_foot_speed_mps: 0.0,
            prior_foot_speed_mps: 0.0,
            latched_direction: Vector3::zeros(),
            contact: None,
            callback: None,
        }
    }

    pub fn phase(&self) -> KickPhase {
        self.phase
    }

    pub fn dominant_foot(&self) -> Side {
        self.dominant_foot
    }

    pub fn set_kick_callback(&mut self, callback: Option<Box<dyn FnMut(KickEvent)>>) {
        self.callback = callback;
    }

    /// Caller abort. Two consecutive calls are equivalent to one.
    pub fn reset(&mut self) {
        self.phase = KickPhase::Idle;
        self.phase_entered_at_us = 0;
        self.windup_entered_at_us = 0;
        self.peak_foot_speed_mps = 0.0;
        self.prior_foot_speed_mps = 0.0;
        self.latched_direction = Vector3::zeros();
        self.contact = None;
    }

    pub fn process_skeleton(&mut self, frame: &SkeletonFrame) {
        self.pelvis.add_frame(frame[JointId::Pelvis].position_mm, frame.timestamp_us, frame[JointId::Pelvis].confidence);
        self.hip_left.add_frame(frame[JointId::HipLeft].position_mm, frame.timestamp_us, frame[JointId::HipLeft].confidence);
        self.hip_right.add_frame(frame[JointId::HipRight].position_mm, frame.timestamp_us, frame[JointId::HipRight].confidence);
        self.knee_left.add_frame(frame[JointId::KneeLeft].position_mm, frame.timestamp_us, frame[JointId::KneeLeft].confidence);
        self.knee_right.add_frame(frame[JointId::KneeRight].position_mm, frame.timestamp_us, frame[JointId::KneeRight].confidence);
        self.ankle_left.add_frame(frame[JointId::AnkleLeft].position_mm, frame.timestamp_us, frame[JointId::AnkleLeft].confidence);
        self.ankle_right.add_frame(frame[JointId::AnkleRight].position_mm, frame.timestamp_us, frame[JointId::AnkleRight].confidence);
        self.foot_left.add_frame(frame[JointId::FootLeft].position_mm, frame.timestamp_us, frame[JointId::FootLeft].confidence);
        self.foot_right.add_frame(frame[JointId::FootRight].position_mm, frame.timestamp_us, frame[JointId::FootRight].confidence);

        self.update_dominant_foot();

        // Re-entry during FollowThrough is not permitted; new motion is
        // deferred until the phase completes and resets to Idle.
        match self.phase {
            KickPhase::Idle => self.step_idle(frame.timestamp_us),
            KickPhase::WindUp => self.step_windup(frame.timestamp_us),
            KickPhase::Acceleration => self.step_acceleration(frame.timestamp_us),
            KickPhase::Contact => self.step_contact(frame, frame.timestamp_us),
            KickPhase::FollowThrough => self.step_followthrough(frame, frame.timestamp_us),
        }
    }

    fn update_dominant_foot(&mut self) {
        let right = self.foot_right.get_current_speed();
        let left = self.foot_left.get_current_speed();
        let ratio = self.tuning.dominant_foot_hysteresis_ratio;

        if right > left * ratio {
            self.dominant_foot = Side::Right;
        } else if left > right * ratio {
            self.dominant_foot = Side::Left;
        }
        // Otherwise keep the prior choice; stays Unknown until one side
        // first clears the ratio.
    }

    fn dominant_ankle(&self) -> &MotionHistory {
        match self.dominant_foot {
            Side::Left => &self.ankle_left,
            _ => &self.ankle_right,
        }
    }

    fn dominant_foot_history(&self) -> &MotionHistory {
        match self.dominant_foot {
            Side::Left => &self.foot_left,
            _ => &self.foot_right,
        }
    }

    fn enter_phase(&mut self, phase: KickPhase, timestamp_us: u64) {
        trace!("kick phase {:?} -> {:?} at {}us", self.phase, phase, timestamp_us);
        self.phase = phase;
        self.phase_entered_at_us = timestamp_us;
    }

    fn step_idle(&mut self, timestamp_us: u64) {
        if self.dominant_foot == Side::Unknown {
            return;
        }
        let ankle = self.dominant_ankle();
        let speed = ankle.get_current_speed();
        let velocity_z = ankle.get_current_velocity().z;
        if speed > self.tuning.v_windup && velocity_z < 0.0 {
            self.windup_entered_at_us = timestamp_us;
            self.peak_foot_speed_mps = 0.0;
            self.enter_phase(KickPhase::WindUp, timestamp_us);
        }
    }

    fn step_windup(&mut self, timestamp_us: u64) {
        let elapsed = elapsed_seconds(self.phase_entered_at_us, timestamp_us);
        let timed_out = elapsed_seconds(self.windup_entered_at_us, timestamp_us) > self.tuning.windup_timeout_s;
        if timed_out {
            debug!("windup timed out after {elapsed}s, returning to idle");
            self.reset();
            return;
        }

        let foot = self.dominant_foot_history();
        let speed = foot.get_current_speed();
        let velocity_z = foot.get_current_velocity().z;
        if elapsed >= self.tuning.min_windup_time_s && speed > self.tuning.v_acceleration && velocity_z > 0.0 {
            self.prior_foot_speed_mps = speed;
            self.enter_phase(KickPhase::Acceleration, timestamp_us);
        }
    }

    fn step_acceleration(&mut self, timestamp_us: u64) {
        let foot = self.dominant_foot_history();
        let speed = foot.get_current_speed();
        self.peak_foot_speed_mps = self.peak_foot_speed_mps.max(speed);

        let elapsed = elapsed_seconds(self.phase_entered_at_us, timestamp_us);
        let prior_cleared_floor = self.prior_foot_speed_mps > self.tuning.prior_speed_floor_ratio * self.tuning.v_acceleration;
        let decelerating = speed < self.tuning.deceleration_ratio * self.prior_foot_speed_mps;

        if elapsed >= self.tuning.min_acceleration_time_s && prior_cleared_floor && decelerating {
            let mean_velocity = foot.get_average_velocity(3);
            self.latched_direction = if mean_velocity.norm() > 0.0 {
                mean_velocity.normalize()
            } else {
                Vector3::zeros()
            };
            self.enter_phase(KickPhase::Contact, timestamp_us);
            return;
        }
        self.prior_foot_speed_mps = speed;
    }

    fn step_contact(&mut self, frame: &SkeletonFrame, timestamp_us: u64) {
        let foot = self.dominant_foot_history();
        let velocity_z = foot.get_current_velocity().z;
        let speed = foot.get_current_speed();

        if velocity_z > 0.0 && speed < self.tuning.v_acceleration {
            self.contact = Some(self.capture_snapshot(frame, timestamp_us));
            self.enter_phase(KickPhase::FollowThrough, timestamp_us);
        }
    }

    fn step_followthrough(&mut self, frame: &SkeletonFrame, timestamp_us: u64) {
        let elapsed = elapsed_seconds(self.phase_entered_at_us, timestamp_us);
        if elapsed >= self.tuning.followthrough_duration_s {
            if let Some(mut contact) = self.contact.take() {
                let foot = self.dominant_foot_history();
                contact.foot_position_at_followthrough_exit_m = foot.get_position(0).unwrap_or(contact.foot_position_at_contact_m);
                contact.completion_timestamp_us = timestamp_us;
                let result = self.assemble_result(&contact, frame);
                if let Some(callback) = self.callback.as_mut() {
                    callback(KickEvent { result, contact });
                }
            }
            self.reset();
        }
    }

    fn capture_snapshot(&self, frame: &SkeletonFrame, timestamp_us: u64) -> KickContactSnapshot {
        use types::geometry::millimeters_to_meters;

        let (hip, knee, ankle, foot) = match self.dominant_foot {
            Side::Left => (&self.hip_left, &self.knee_left, &self.ankle_left, &self.foot_left),
            _ => (&self.hip_right, &self.knee_right, &self.ankle_right, &self.foot_right),
        };

        KickContactSnapshot {
            foot: self.dominant_foot,
            peak_foot_speed_mps: self.peak_foot_speed_mps,
            latched_direction: self.latched_direction,
            windup_duration_s: elapsed_seconds(self.windup_entered_at_us, self.phase_entered_at_us),
            contact_timestamp_us: timestamp_us,
            completion_timestamp_us: timestamp_us,
            hip_position_m: hip.get_position(0).unwrap_or_default(),
            knee_position_m: knee.get_position(0).unwrap_or_default(),
            ankle_position_m: ankle.get_position(0).unwrap_or_default(),
            foot_position_at_contact_m: foot.get_position(0).unwrap_or_default(),
            foot_position_at_followthrough_exit_m: foot.get_position(0).unwrap_or_default(),
            left_hip_position_m: self.hip_left.get_position(0).unwrap_or_default(),
            right_hip_position_m: self.hip_right.get_position(0).unwrap_or_default(),
            pelvis_position_m: self.pelvis.get_position(0).unwrap_or_default(),
            spine_chest_position_m: millimeters_to_meters(frame[JointId::SpineChest].position_mm),
        }
    }

    /// Provisional assembly: peak speed as foot velocity, ball speed
    /// from the 3.6 km/h-per-m/s conversion, type a placeholder until
    /// `KickAnalyzer` overwrites it.
    fn assemble_result(&self, contact: &KickContactSnapshot, _frame: &SkeletonFrame) -> KickResult {
        let foot_velocity_mps = contact.peak_foot_speed_mps;
        let estimated_ball_speed_kmh = foot_velocity_mps * 3.6;
        KickResult {
            kick_type: KickType::Instep,
            foot: contact.foot,
            direction: contact.latched_direction,
            timestamp_us: contact.completion_timestamp_us,
            valid: true,
            quality: KickQuality {
                foot_velocity_mps,
                estimated_ball_speed_kmh,
                ..Default::default()
            },
        }
    }
}
