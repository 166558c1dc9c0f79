use glam::{Mat4, Quat, Vec3};
use id_arena::Arena;

use crate::math::bounds::AABB;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::Transform;

/// A loaded model: an arena of objects hanging off a single root.
pub struct Scene {
    pub objects: Arena<Object3D>,
    root: ObjectId,
}

impl Scene {
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut objects = Arena::new();
        let root = objects.alloc(Object3D::named(root_name));
        Self { objects, root }
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    /// Allocates `object` and appends it to `parent`'s children.
    pub fn add_child(&mut self, parent: ObjectId, object: Object3D) -> ObjectId {
        let object_id = self.add_object(object);
        self.set_object_parent(object_id, Some(parent));
        object_id
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.len() == 0
    }

    /// Depth-first pre-order walk starting at `start`, children in insertion order.
    pub fn traverse(&self, start: ObjectId) -> Traverse<'_> {
        let stack = if self.objects.get(start).is_some() {
            vec![start]
        } else {
            Vec::new()
        };

        Traverse { scene: self, stack }
    }

    /// Updates all object transforms in hierarchical order
    pub fn update_transforms(&self) {
        let root_objects = self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        });

        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY, false);
        }
    }

    fn update_object_transform_recursive(
        &self,
        object_id: ObjectId,
        parent_world_matrix: Mat4,
        parent_changed: bool,
    ) {
        if let Some(object) = self.objects.get(object_id) {
            let local_matrix = *object.transform.get_local_matrix();
            let changed = parent_changed || object.transform.is_world_dirty();
            if changed {
                object
                    .transform
                    .set_world_matrix(parent_world_matrix * local_matrix);
            }

            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix, changed);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        self.invalidate_object_hierarchy(child_id);
    }

    pub fn set_object_transform(
        &mut self,
        object_id: ObjectId,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
    ) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_transform(translation, rotation, scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    pub fn world_position(&self, object_id: ObjectId) -> Option<Vec3> {
        self.update_transforms();
        self.get_object_transform(object_id)
            .map(Transform::world_position)
    }

    /// World-space bounds of every geometry extent in the subtree rooted at
    /// `object_id`. Empty when the subtree carries no geometry or the id is unknown.
    pub fn world_bounds(&self, object_id: ObjectId) -> AABB {
        self.update_transforms();
        self.cached_world_bounds(object_id)
    }

    /// [`Scene::world_bounds`] against the cached world matrices. Only valid
    /// right after [`Scene::update_transforms`].
    pub(crate) fn cached_world_bounds(&self, object_id: ObjectId) -> AABB {
        let mut bounds = AABB::empty();
        for (_, object) in self.traverse(object_id) {
            if let Some(extent) = &object.geometry_extent {
                let world_matrix = *object.transform.get_world_matrix();
                bounds.union(&extent.transformed(&world_matrix));
            }
        }

        bounds
    }

    /// Like [`Scene::world_bounds`], but an empty result is replaced by a cube
    /// of half-extent `fallback_radius` around the object's world position.
    pub fn focus_bounds(&self, object_id: ObjectId, fallback_radius: f32) -> Option<AABB> {
        self.objects.get(object_id)?;

        let bounds = self.world_bounds(object_id);
        if !bounds.is_empty() {
            return Some(bounds);
        }

        let center = self.world_position(object_id)?;
        log::trace!(
            "No geometry under {:?}, framing {} units around {}",
            object_id,
            fallback_radius,
            center
        );
        Some(AABB::from_center_half_extent(center, fallback_radius))
    }
}

pub struct Traverse<'a> {
    scene: &'a Scene,
    stack: Vec<ObjectId>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (ObjectId, &'a Object3D);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(object) = self.scene.get_object(id) {
                self.stack.extend(object.child_ids.iter().rev().copied());
                return Some((id, object));
            }
        }

        None
    }
}
