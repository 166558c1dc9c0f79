use std::time::Duration;

use crate::math::easing::Easing;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OffsetMode {
    /// Back away along the camera's current viewing direction.
    KeepDirection,
    /// Always approach from the same elevated angle.
    Isometric {
        azimuth_degrees: f32,
        elevation_degrees: f32,
    },
}

impl OffsetMode {
    pub fn isometric() -> Self {
        OffsetMode::Isometric {
            azimuth_degrees: 45.0,
            elevation_degrees: 30.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FocusConfig {
    pub duration: Duration,
    pub easing: Easing,
    pub offset_mode: OffsetMode,
    /// View distance as a multiple of the framed volume's radius.
    pub distance_factor: f32,
    pub min_distance: f32,
    /// Half-extent of the volume framed around objects without geometry.
    pub fallback_radius: f32,
    pub suspend_auto_rotate: bool,
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(700),
            easing: Easing::default(),
            offset_mode: OffsetMode::KeepDirection,
            distance_factor: 2.2,
            min_distance: 1.5,
            fallback_radius: 2.0,
            suspend_auto_rotate: true,
        }
    }
}
