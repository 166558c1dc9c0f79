use id_arena::Id;

use crate::math::bounds::AABB;
use crate::scene_graph::scene::Scene;
use crate::scene_graph::transform::Transform;

pub type ObjectId = Id<Object3D>;

#[derive(Debug, Default)]
pub struct Object3D {
    pub name: String,
    pub transform: Transform,
    /// Bounds of this object's own geometry in its local space.
    pub geometry_extent: Option<AABB>,
    pub parent_id: Option<ObjectId>,
    pub child_ids: Vec<ObjectId>,
}

impl Object3D {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_geometry(mut self, extent: AABB) -> Self {
        self.geometry_extent = Some(extent);
        self
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn parent<'a>(&self, scene: &'a Scene) -> Option<&'a Object3D> {
        self.parent_id.and_then(|id| scene.get_object(id))
    }

    pub fn children<'a, 'b>(&'a self, scene: &'b Scene) -> impl Iterator<Item = &'b Object3D> + 'b
    where
        'a: 'b,
    {
        self.child_ids
            .iter()
            .filter_map(move |id| scene.get_object(*id))
    }
}
