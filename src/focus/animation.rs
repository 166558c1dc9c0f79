use std::time::{Duration, Instant};

use crate::focus::framing::CameraPose;
use crate::math::easing::Easing;

/// An eased transition between two camera poses.
#[derive(Debug, Clone)]
pub struct FocusAnimation {
    pub start: CameraPose,
    pub end: CameraPose,
    pub start_time: Instant,
    pub duration: Duration,
    pub easing: Easing,
    /// Auto-rotate state captured when the animation started.
    pub restore_auto_rotate: Option<bool>,
}

impl FocusAnimation {
    pub fn new(
        start: CameraPose,
        end: CameraPose,
        start_time: Instant,
        duration: Duration,
        easing: Easing,
    ) -> Self {
        Self {
            start,
            end,
            start_time,
            duration,
            easing,
            restore_auto_rotate: None,
        }
    }

    /// Normalized time in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }

        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Pose at `now` and the normalized time it was sampled at. At `t == 1`
    /// the end pose is returned verbatim.
    pub fn sample(&self, now: Instant) -> (CameraPose, f32) {
        let t = self.progress(now);
        if t >= 1.0 {
            return (self.end, 1.0);
        }

        (self.start.lerp(&self.end, self.easing.apply(t)), t)
    }
}
