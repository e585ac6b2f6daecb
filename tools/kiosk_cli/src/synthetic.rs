use nalgebra::Point3;
use types::{Confidence, JointId, JointSample, SkeletonFrame};

use motion_core::SkeletonSource;

const DT_US: u64 = 33_333;

fn stationary_frame(timestamp_us: u64) -> SkeletonFrame {
    let mut frame = SkeletonFrame::new(timestamp_us);
    for &id in JointId::ALL.iter() {
        frame.set(id, JointSample::new(Point3::origin(), timestamp_us, Confidence::High));
    }
    frame
}

/// A bundled demo trace used when `kiosk_cli` is run without `--input`:
/// a few idle frames, then a right-foot instep kick matching spec.md §8's
/// concrete scenario 2 (backward ramp, forward ramp, sharp deceleration,
/// forward decay).
pub struct SyntheticSource {
    frames: std::vec::IntoIter<SkeletonFrame>,
}

impl SyntheticSource {
    pub fn demo_kick() -> Self {
        let mut frames = Vec::new();
        let mut t = 0u64;
        let mut z_mm = 0.0_f32;

        frames.push(stationary_frame(t));

        let mut push_foot_frame = |t: u64, z_mm: f32, frames: &mut Vec<SkeletonFrame>| {
            let mut frame = stationary_frame(t);
            let sample = JointSample::new(Point3::new(0.0, 0.0, z_mm), t, Confidence::High);
            frame.set(JointId::FootRight, sample);
            frame.set(JointId::AnkleRight, sample);
            frames.push(frame);
        };

        // Backward ramp: 10 frames at 1.8 m/s.
        for _ in 0..10 {
            t += DT_US;
            z_mm -= 60.0;
            push_foot_frame(t, z_mm, &mut frames);
        }
        // Forward ramp: 5 frames at 3.0 m/s.
        for _ in 0..5 {
            t += DT_US;
            z_mm += 100.0;
            push_foot_frame(t, z_mm, &mut frames);
        }
        // Sharp deceleration.
        t += DT_US;
        z_mm += 20.0;
        push_foot_frame(t, z_mm, &mut frames);
        // Forward decay.
        for _ in 0..9 {
            t += DT_US;
            z_mm += 15.0;
            push_foot_frame(t, z_mm, &mut frames);
        }
        // Quiet tail so FollowThrough's 300ms elapses and the event fires.
        for _ in 0..10 {
            t += DT_US;
            z_mm += 15.0;
            push_foot_frame(t, z_mm, &mut frames);
        }

        Self { frames: frames.into_iter() }
    }
}

impl SkeletonSource for SyntheticSource {
    fn next_frame(&mut self) -> Option<SkeletonFrame> {
        self.frames.next()
    }
}
