use std::time::Duration;

use glam::{Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 8.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }
}

impl Camera {
    /// Unit viewing direction, or `None` when the eye sits on the target.
    pub fn forward(&self) -> Option<Vec3> {
        (self.target - self.eye).try_normalize()
    }
}

/// Orbit-style input state: the point the camera circles and the idle spin.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    pub target: Vec3,
    pub auto_rotate: bool,
    /// Radians per second around +Y.
    pub auto_rotate_speed: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            auto_rotate: true,
            auto_rotate_speed: std::f32::consts::TAU / 30.0,
        }
    }
}

impl OrbitControls {
    /// Spins the eye around the target while `auto_rotate` is set, then syncs the camera.
    pub fn update(&self, camera: &mut Camera, delta: Duration) {
        if self.auto_rotate {
            let rotation = Quat::from_rotation_y(self.auto_rotate_speed * delta.as_secs_f32());
            camera.eye = self.target + rotation * (camera.eye - self.target);
        }

        self.sync(camera);
    }

    pub fn sync(&self, camera: &mut Camera) {
        camera.target = self.target;
    }
}
