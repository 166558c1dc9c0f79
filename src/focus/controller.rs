use std::time::Instant;

use crate::camera::{Camera, OrbitControls};
use crate::focus::animation::FocusAnimation;
use crate::focus::config::FocusConfig;
use crate::focus::framing::{frame_bounds, CameraPose};
use crate::focus::selection::Selection;
use crate::scene_graph::object3d::ObjectId;
use crate::scene_graph::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Idle,
    Resolving,
    Animating,
}

/// Moves the camera onto whatever the latest selection resolves to.
///
/// At most one animation exists at a time. Every new selection cancels the
/// current animation outright, even one that is then dropped, so a superseded
/// animation can never write the camera again.
pub struct FocusController {
    config: FocusConfig,
    animation: Option<FocusAnimation>,
    state: FocusState,
}

impl FocusController {
    pub fn new(config: FocusConfig) -> Self {
        Self {
            config,
            animation: None,
            state: FocusState::Idle,
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn animation(&self) -> Option<&FocusAnimation> {
        self.animation.as_ref()
    }

    /// Resolves `selection` against `scene` and starts framing it. Returns the
    /// object being framed, or `None` when the request was dropped. A dropped
    /// request still stops the running animation.
    pub fn select(
        &mut self,
        selection: Selection,
        scene: Option<&Scene>,
        camera: &Camera,
        orbit: &mut OrbitControls,
        now: Instant,
    ) -> Option<ObjectId> {
        self.cancel(orbit);
        self.state = FocusState::Resolving;

        let Some(scene) = scene else {
            log::debug!("Dropping {:?}: no model loaded yet", selection);
            self.state = FocusState::Idle;
            return None;
        };

        let target = match &selection {
            Selection::Node(id) => scene.find_by_id(*id),
            Selection::Room(name) if name.trim().is_empty() => {
                log::debug!("Dropping room selection with a blank name");
                self.state = FocusState::Idle;
                return None;
            }
            Selection::Room(name) => Some(scene.resolve_name(name)),
        };

        let Some((target, bounds)) = target.and_then(|target| {
            scene
                .focus_bounds(target, self.config.fallback_radius)
                .map(|bounds| (target, bounds))
        }) else {
            log::debug!("Dropping {:?}: object is not part of the model", selection);
            self.state = FocusState::Idle;
            return None;
        };

        let end = frame_bounds(&bounds, camera, &self.config);
        log::debug!(
            "Focusing {:?} ({:?}) at {} from {}",
            target,
            scene
                .get_object(target)
                .map(|object| object.name.as_str())
                .unwrap_or_default(),
            end.target,
            end.position
        );

        self.start(end, camera, orbit, now);
        Some(target)
    }

    /// Starts animating from the current camera pose to `end`, replacing any
    /// animation already running.
    pub fn start(
        &mut self,
        end: CameraPose,
        camera: &Camera,
        orbit: &mut OrbitControls,
        now: Instant,
    ) {
        self.cancel(orbit);

        let start = CameraPose {
            position: camera.eye,
            target: orbit.target,
        };
        let mut animation = FocusAnimation::new(
            start,
            end,
            now,
            self.config.duration,
            self.config.easing,
        );

        if self.config.suspend_auto_rotate {
            animation.restore_auto_rotate = Some(orbit.auto_rotate);
            orbit.auto_rotate = false;
        }

        self.animation = Some(animation);
        self.state = FocusState::Animating;
    }

    /// Steps the running animation. Call once per frame.
    pub fn update(&mut self, camera: &mut Camera, orbit: &mut OrbitControls, now: Instant) {
        let Some(animation) = &self.animation else {
            return;
        };

        let (pose, t) = animation.sample(now);
        camera.eye = pose.position;
        orbit.target = pose.target;
        orbit.sync(camera);

        if t >= 1.0 {
            log::trace!("Focus animation finished at {}", pose.position);
            self.finish(orbit);
        }
    }

    /// Stops the running animation where it is.
    pub fn cancel(&mut self, orbit: &mut OrbitControls) {
        if self.animation.is_some() {
            log::trace!("Cancelling focus animation");
        }
        self.finish(orbit);
    }

    fn finish(&mut self, orbit: &mut OrbitControls) {
        if let Some(animation) = self.animation.take() {
            if let Some(auto_rotate) = animation.restore_auto_rotate {
                orbit.auto_rotate = auto_rotate;
            }
        }

        self.state = FocusState::Idle;
    }
}

impl Default for FocusController {
    fn default() -> Self {
        Self::new(FocusConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec3;

    use super::*;
    use crate::math::bounds::AABB;
    use crate::scene_graph::object3d::Object3D;
    use crate::scene_graph::transform::Transform;

    struct Fixture {
        scene: Scene,
        camera: Camera,
        orbit: OrbitControls,
        controller: FocusController,
        kitchen: ObjectId,
        garage: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::new("House");
        let kitchen = scene.add_child(
            scene.root(),
            Object3D::named("Kitchen")
                .with_transform(Transform::from_translation(Vec3::new(-10.0, 0.0, 0.0)))
                .with_geometry(AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0))),
        );
        let garage = scene.add_child(
            scene.root(),
            Object3D::named("Garage")
                .with_transform(Transform::from_translation(Vec3::new(10.0, 0.0, 0.0)))
                .with_geometry(AABB::new(Vec3::splat(-2.0), Vec3::splat(2.0))),
        );

        Fixture {
            scene,
            camera: Camera::default(),
            orbit: OrbitControls::default(),
            controller: FocusController::default(),
            kitchen,
            garage,
        }
    }

    #[test]
    fn selection_without_scene_is_dropped() {
        let mut f = fixture();
        let now = Instant::now();

        let result = f.controller.select(
            Selection::Room("Kitchen".into()),
            None,
            &f.camera,
            &mut f.orbit,
            now,
        );

        assert_eq!(result, None);
        assert_eq!(f.controller.state(), FocusState::Idle);
        assert!(f.orbit.auto_rotate);
        assert!(!f.controller.is_animating());
    }

    #[test]
    fn animation_snaps_to_end_pose() {
        let mut f = fixture();
        let start = Instant::now();

        let target = f.controller.select(
            Selection::Room("kitchen".into()),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );
        assert_eq!(target, Some(f.kitchen));
        assert_eq!(f.controller.state(), FocusState::Animating);

        let end = f.controller.animation().unwrap().end;
        assert_eq!(end.target, Vec3::new(-10.0, 0.0, 0.0));

        let mut now = start;
        while f.controller.is_animating() {
            now += Duration::from_millis(16);
            f.controller.update(&mut f.camera, &mut f.orbit, now);
            if f.controller.is_animating() {
                let t = f.controller.animation().unwrap().progress(now);
                assert!(t < 1.0);
            }
        }

        assert_eq!(f.camera.eye, end.position);
        assert_eq!(f.camera.target, end.target);
        assert_eq!(f.orbit.target, end.target);
        assert_eq!(f.controller.state(), FocusState::Idle);
    }

    #[test]
    fn newer_selection_replaces_running_animation() {
        let mut f = fixture();
        let start = Instant::now();

        f.controller.select(
            Selection::Node(f.kitchen),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );
        f.controller
            .update(&mut f.camera, &mut f.orbit, start + Duration::from_millis(200));

        let switch = start + Duration::from_millis(250);
        f.controller.select(
            Selection::Node(f.garage),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            switch,
        );
        let garage_end = f.controller.animation().unwrap().end;
        assert_eq!(garage_end.target, Vec3::new(10.0, 0.0, 0.0));

        // Well past the point where the kitchen animation would have ended.
        f.controller
            .update(&mut f.camera, &mut f.orbit, start + Duration::from_millis(800));
        assert!(f.controller.is_animating());
        assert_ne!(f.camera.target, Vec3::new(-10.0, 0.0, 0.0));

        f.controller
            .update(&mut f.camera, &mut f.orbit, switch + Duration::from_secs(1));
        assert_eq!(f.camera.eye, garage_end.position);
        assert_eq!(f.orbit.target, garage_end.target);
    }

    #[test]
    fn auto_rotate_is_restored_after_completion() {
        let mut f = fixture();
        let start = Instant::now();
        assert!(f.orbit.auto_rotate);

        f.controller.select(
            Selection::Node(f.garage),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );
        assert!(!f.orbit.auto_rotate);

        f.controller
            .update(&mut f.camera, &mut f.orbit, start + Duration::from_secs(1));
        assert!(f.orbit.auto_rotate);
    }

    #[test]
    fn auto_rotate_survives_chained_cancellation() {
        let mut f = fixture();
        let start = Instant::now();

        for (step, id) in [f.kitchen, f.garage, f.kitchen].into_iter().enumerate() {
            f.controller.select(
                Selection::Node(id),
                Some(&f.scene),
                &f.camera,
                &mut f.orbit,
                start + Duration::from_millis(100 * step as u64),
            );
            assert!(!f.orbit.auto_rotate);
        }

        f.controller.cancel(&mut f.orbit);
        assert!(f.orbit.auto_rotate);
        assert_eq!(f.controller.state(), FocusState::Idle);
    }

    #[test]
    fn disabled_auto_rotate_stays_disabled() {
        let mut f = fixture();
        f.orbit.auto_rotate = false;
        let start = Instant::now();

        f.controller.select(
            Selection::Node(f.kitchen),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );
        f.controller
            .update(&mut f.camera, &mut f.orbit, start + Duration::from_secs(1));
        assert!(!f.orbit.auto_rotate);
    }

    fn assert_cancelled(f: &Fixture) {
        assert_eq!(f.controller.state(), FocusState::Idle);
        assert!(!f.controller.is_animating());
        assert!(f.orbit.auto_rotate);
    }

    #[test]
    fn unknown_node_id_cancels_running_animation() {
        let mut f = fixture();
        let start = Instant::now();
        f.controller.select(
            Selection::Node(f.kitchen),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );
        f.controller
            .update(&mut f.camera, &mut f.orbit, start + Duration::from_millis(100));
        let stopped_at = f.camera.eye;

        let other = Scene::new("Other");
        let result = f.controller.select(
            Selection::Node(other.root()),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start + Duration::from_millis(100),
        );

        assert_eq!(result, None);
        assert_cancelled(&f);

        // Nothing keeps flying toward the kitchen.
        f.controller
            .update(&mut f.camera, &mut f.orbit, start + Duration::from_secs(1));
        assert_eq!(f.camera.eye, stopped_at);
    }

    #[test]
    fn selection_without_scene_cancels_running_animation() {
        let mut f = fixture();
        let start = Instant::now();
        f.controller.select(
            Selection::Node(f.garage),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );
        assert!(!f.orbit.auto_rotate);

        let result = f.controller.select(
            Selection::Node(f.kitchen),
            None,
            &f.camera,
            &mut f.orbit,
            start + Duration::from_millis(100),
        );

        assert_eq!(result, None);
        assert_cancelled(&f);
    }

    #[test]
    fn blank_room_is_dropped() {
        let mut f = fixture();
        let start = Instant::now();
        f.controller.select(
            Selection::Node(f.kitchen),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );

        let result = f.controller.select(
            Selection::Room("   ".into()),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            start,
        );

        assert_eq!(result, None);
        assert_cancelled(&f);
    }

    #[test]
    fn unmatched_room_frames_whole_model() {
        let mut f = fixture();
        let result = f.controller.select(
            Selection::Room("nonexistent-zzz".into()),
            Some(&f.scene),
            &f.camera,
            &mut f.orbit,
            Instant::now(),
        );

        assert_eq!(result, Some(f.scene.root()));
        let end = f.controller.animation().unwrap().end;
        assert_eq!(end.target, f.scene.world_bounds(f.scene.root()).center());
        assert_eq!(end.target, Vec3::new(0.5, 0.0, 0.0));
    }
}
