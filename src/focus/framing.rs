use glam::Vec3;

use crate::camera::Camera;
use crate::focus::config::{FocusConfig, OffsetMode};
use crate::math::bounds::AABB;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraPose {
    pub fn lerp(&self, other: &CameraPose, s: f32) -> CameraPose {
        CameraPose {
            position: self.position.lerp(other.position, s),
            target: self.target.lerp(other.target, s),
        }
    }
}

pub fn view_distance(bounds: &AABB, config: &FocusConfig) -> f32 {
    (bounds.radius() * config.distance_factor).max(config.min_distance)
}

pub fn offset_direction(camera: &Camera, mode: OffsetMode) -> Vec3 {
    match mode {
        OffsetMode::KeepDirection => camera.forward().map(|forward| -forward).unwrap_or(Vec3::Z),
        OffsetMode::Isometric {
            azimuth_degrees,
            elevation_degrees,
        } => {
            let azimuth = azimuth_degrees.to_radians();
            let elevation = elevation_degrees.to_radians();
            Vec3::new(
                elevation.cos() * azimuth.sin(),
                elevation.sin(),
                elevation.cos() * azimuth.cos(),
            )
        }
    }
}

/// Pose that looks at the center of `bounds` from far enough away to see all of it.
pub fn frame_bounds(bounds: &AABB, camera: &Camera, config: &FocusConfig) -> CameraPose {
    let center = bounds.center();
    let distance = view_distance(bounds, config);
    let direction = offset_direction(camera, config.offset_mode);

    CameraPose {
        position: center + direction * distance,
        target: center,
    }
}
