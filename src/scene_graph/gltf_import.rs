use std::path::Path;

use anyhow::Context;
use glam::{Quat, Vec3};

use crate::math::bounds::AABB;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

impl Scene {
    /// Opens a `.gltf` or `.glb` file. Only the document is read; buffers are
    /// not needed since extents come from accessor bounds.
    pub fn load_gltf(path: impl AsRef<Path>) -> anyhow::Result<Scene> {
        let path = path.as_ref();
        let gltf = gltf::Gltf::open(path)
            .with_context(|| format!("Failed to open glTF file {}", path.display()))?;

        let fallback_name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        Scene::from_gltf(&gltf.document, &fallback_name)
    }

    /// Builds a scene from the document's default scene, or its first scene.
    /// The glTF scene's top-level nodes become children of the root.
    pub fn from_gltf(document: &gltf::Document, fallback_name: &str) -> anyhow::Result<Scene> {
        let gltf_scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .context("No scenes in glTF document")?;

        let root_name = gltf_scene.name().unwrap_or(fallback_name);
        let mut scene = Scene::new(root_name);
        let root = scene.root();

        for node in gltf_scene.nodes() {
            scene.spawn_gltf_node(&node, root);
        }

        log::info!(
            "Imported glTF scene {:?} with {} objects",
            root_name,
            scene.len()
        );

        Ok(scene)
    }

    fn spawn_gltf_node(&mut self, node: &gltf::Node, parent: ObjectId) -> ObjectId {
        let (translation, rotation, scale) = node.transform().decomposed();

        let mut object = Object3D::named(node.name().unwrap_or_default()).with_transform(
            Transform::new(
                Vec3::from(translation),
                Quat::from_array(rotation),
                Vec3::from(scale),
            ),
        );
        object.geometry_extent = node.mesh().and_then(|mesh| mesh_extent(&mesh));

        let object_id = self.add_child(parent, object);

        for child in node.children() {
            self.spawn_gltf_node(&child, object_id);
        }

        object_id
    }
}

/// Union of the POSITION accessor bounds of every primitive in `mesh`.
fn mesh_extent(mesh: &gltf::Mesh) -> Option<AABB> {
    let mut extent = AABB::empty();

    for primitive in mesh.primitives() {
        let Some(positions) = primitive.get(&gltf::Semantic::Positions) else {
            continue;
        };

        match (
            positions.min().as_ref().and_then(json_vec3),
            positions.max().as_ref().and_then(json_vec3),
        ) {
            (Some(min), Some(max)) => extent.union(&AABB::new(min, max)),
            _ => log::warn!(
                "Primitive {} of mesh {:?} has no usable POSITION bounds",
                primitive.index(),
                mesh.name().unwrap_or_default()
            ),
        }
    }

    if extent.is_empty() {
        None
    } else {
        Some(extent)
    }
}

fn json_vec3(value: &gltf::json::Value) -> Option<Vec3> {
    let components = value.as_array()?;
    if components.len() != 3 {
        return None;
    }

    let x = components[0].as_f64()? as f32;
    let y = components[1].as_f64()? as f32;
    let z = components[2].as_f64()? as f32;
    Some(Vec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOWER: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [{ "name": "Tower", "nodes": [0] }],
        "nodes": [
            { "name": "Floor 15", "translation": [0.0, 30.0, 0.0], "children": [1, 2] },
            { "name": "Unit A1", "mesh": 0, "translation": [-5.0, 0.0, 0.0] },
            { "name": "Unit A2", "mesh": 0, "translation": [5.0, 0.0, 0.0], "scale": [2.0, 1.0, 1.0] }
        ],
        "meshes": [{
            "name": "Box",
            "primitives": [{ "attributes": { "POSITION": 0 } }]
        }],
        "buffers": [{ "byteLength": 96 }],
        "bufferViews": [{ "buffer": 0, "byteLength": 96 }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 8,
            "type": "VEC3",
            "min": [-1.0, 0.0, -1.0],
            "max": [1.0, 3.0, 1.0]
        }]
    }"#;

    fn tower() -> Scene {
        let gltf = gltf::Gltf::from_slice(TOWER.as_bytes()).unwrap();
        Scene::from_gltf(&gltf.document, "fallback").unwrap()
    }

    #[test]
    fn imports_hierarchy_and_names() {
        let scene = tower();
        let names: Vec<&str> = scene
            .traverse(scene.root())
            .map(|(_, object)| object.name.as_str())
            .collect();

        assert_eq!(names, ["Tower", "Floor 15", "Unit A1", "Unit A2"]);
    }

    #[test]
    fn mesh_extents_come_from_accessor_bounds() {
        let scene = tower();
        let unit = scene.resolve_name("unit a1");

        assert_eq!(
            scene.get_object(unit).unwrap().geometry_extent,
            Some(AABB::new(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 3.0, 1.0)))
        );

        let bounds = scene.world_bounds(unit);
        assert_eq!(bounds.min, Vec3::new(-6.0, 30.0, -1.0));
        assert_eq!(bounds.max, Vec3::new(-4.0, 33.0, 1.0));
    }

    #[test]
    fn node_scale_is_applied_per_axis() {
        let scene = tower();
        let unit = scene.resolve_name("unit a2");
        let bounds = scene.world_bounds(unit);

        assert_eq!(bounds.min.x, 3.0);
        assert_eq!(bounds.max.x, 7.0);
        assert_eq!(bounds.size().z, 2.0);
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = Scene::load_gltf("does/not/exist.glb");
        assert!(result.is_err());
    }

    #[test]
    fn json_vec3_rejects_wrong_shapes() {
        let value = gltf::json::Value::from(vec![1.0, 2.0]);
        assert_eq!(json_vec3(&value), None);

        let value = gltf::json::Value::from("1, 2, 3");
        assert_eq!(json_vec3(&value), None);

        let value = gltf::json::Value::from(vec![1.0, 2.0, 3.5]);
        assert_eq!(json_vec3(&value), Some(Vec3::new(1.0, 2.0, 3.5)));
    }
}
