use std::time::Instant;

use crate::camera::{Camera, OrbitControls};
use crate::focus::{FocusConfig, FocusController, Selection};
use crate::scene_graph::loader::ModelLoader;
use crate::scene_graph::object3d::ObjectId;
use crate::scene_graph::scene::Scene;

/// Everything the property browser owns between frames.
pub struct ViewerState {
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub focus: FocusController,
    scene: Option<Scene>,
    loader: Option<ModelLoader>,
    last_frame: Instant,
}

impl ViewerState {
    pub fn new(config: FocusConfig, now: Instant) -> Self {
        Self {
            camera: Camera::default(),
            orbit: OrbitControls::default(),
            focus: FocusController::new(config),
            scene: None,
            loader: None,
            last_frame: now,
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Replaces the model. A running focus animation keeps going since it
    /// only moves the camera.
    pub fn set_scene(&mut self, scene: Option<Scene>) {
        self.scene = scene;
    }

    pub fn load_model(&mut self, loader: ModelLoader) {
        self.loader = Some(loader);
    }

    pub fn is_loading(&self) -> bool {
        self.loader.is_some()
    }

    pub fn select(&mut self, selection: Selection, now: Instant) -> Option<ObjectId> {
        self.focus.select(
            selection,
            self.scene.as_ref(),
            &self.camera,
            &mut self.orbit,
            now,
        )
    }

    /// Runs one frame: picks up a finished model, then advances the focus
    /// animation or the idle orbit.
    pub fn update(&mut self, now: Instant) -> anyhow::Result<()> {
        let delta = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;

        if let Some(loader) = self.loader.as_mut() {
            if let Some(result) = loader.poll() {
                self.loader = None;
                self.set_scene(Some(result?));
            }
        }

        if self.focus.is_animating() {
            self.focus.update(&mut self.camera, &mut self.orbit, now);
        } else {
            self.orbit.update(&mut self.camera, delta);
        }

        Ok(())
    }
}
