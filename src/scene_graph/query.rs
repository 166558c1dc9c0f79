use glam::Vec3;

use crate::scene_graph::object3d::ObjectId;
use crate::scene_graph::scene::Scene;

/// One row of the node listing. Holds a copied id, never a reference into the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSummary {
    pub id: ObjectId,
    pub name: String,
    pub center: Option<Vec3>,
    pub size: Option<Vec3>,
}

impl Scene {
    /// Resolves a free-text room query to an object.
    ///
    /// Named objects are visited depth-first from the root. The last object
    /// whose lower-cased name contains the query wins; failing that, the last
    /// object whose name is itself contained in the query; failing that, the
    /// root. A blank query is contained in every name, so it resolves to the
    /// last named object.
    pub fn resolve_name(&self, query: &str) -> ObjectId {
        let query = query.trim().to_lowercase();

        let names: Vec<(ObjectId, String)> = self
            .traverse(self.root())
            .filter(|(_, object)| object.has_name())
            .map(|(id, object)| (id, object.name.to_lowercase()))
            .collect();

        let contains_query = names
            .iter()
            .rev()
            .find(|(_, name)| name.contains(&query))
            .map(|(id, _)| *id);
        if let Some(id) = contains_query {
            return id;
        }

        let contained_in_query = names
            .iter()
            .rev()
            .find(|(_, name)| query.contains(name.as_str()))
            .map(|(id, _)| *id);
        if let Some(id) = contained_in_query {
            return id;
        }

        log::debug!("No object matches {:?}, framing the whole model", query);
        self.root()
    }

    /// Looks `id` up among the objects reachable from the root.
    pub fn find_by_id(&self, id: ObjectId) -> Option<ObjectId> {
        self.traverse(self.root())
            .find(|(candidate, _)| *candidate == id)
            .map(|(id, _)| id)
    }

    /// Every named object in traversal order with its world-space bounds.
    pub fn node_summaries(&self) -> Vec<NodeSummary> {
        self.update_transforms();

        self.traverse(self.root())
            .filter(|(_, object)| object.has_name())
            .map(|(id, object)| {
                let bounds = self.cached_world_bounds(id);
                let (center, size) = if bounds.is_empty() {
                    (None, None)
                } else {
                    (Some(bounds.center()), Some(bounds.size()))
                };

                NodeSummary {
                    id,
                    name: object.name.clone(),
                    center,
                    size,
                }
            })
            .collect()
    }
}
