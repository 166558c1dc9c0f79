use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use anyhow::anyhow;

use crate::scene_graph::scene::Scene;

// Imports a model on a worker thread and hands the finished scene back to the frame loop.
pub struct ModelLoader {
    path: PathBuf,
    receiver: Option<Receiver<anyhow::Result<Scene>>>,
}

impl ModelLoader {
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (sender, receiver) = channel();

        let worker_path = path.clone();
        std::thread::spawn(move || {
            log::debug!("Loading model {}", worker_path.display());
            // The receiver may already be gone if the viewer was dropped.
            let _ = sender.send(Scene::load_gltf(&worker_path));
        });

        Self {
            path,
            receiver: Some(receiver),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.receiver.is_some()
    }

    /// Returns the loaded scene once, without blocking. `None` while still loading
    /// and after the result has been taken.
    pub fn poll(&mut self) -> Option<anyhow::Result<Scene>> {
        let receiver = self.receiver.as_ref()?;

        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(anyhow!(
                "Model loader for {} exited without a result",
                self.path.display()
            )),
        };

        self.receiver = None;
        Some(result)
    }

    /// Blocks until the worker finishes.
    pub fn wait(mut self) -> anyhow::Result<Scene> {
        let receiver = self
            .receiver
            .take()
            .ok_or_else(|| anyhow!("Model {} was already taken", self.path.display()))?;

        receiver.recv().map_err(|_| {
            anyhow!(
                "Model loader for {} exited without a result",
                self.path.display()
            )
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_reported_through_channel() {
        let loader = ModelLoader::spawn("does/not/exist.gltf");
        assert!(loader.is_pending());
        assert!(loader.wait().is_err());
    }

    #[test]
    fn poll_yields_result_once() {
        let mut loader = ModelLoader::spawn("does/not/exist.gltf");

        let result = loop {
            if let Some(result) = loader.poll() {
                break result;
            }
            std::thread::yield_now();
        };

        assert!(result.is_err());
        assert!(!loader.is_pending());
        assert!(loader.poll().is_none());
    }
}
