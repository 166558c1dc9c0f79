use crate::scene_graph::object3d::ObjectId;

/// A single focus request from a listing or the node panel. Consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Node(ObjectId),
    Room(String),
}

impl Selection {
    /// Builds a selection from loosely typed request fields. The node id wins
    /// when both are present; a blank room name counts as absent.
    pub fn from_parts(node_id: Option<ObjectId>, room_name: Option<&str>) -> Option<Selection> {
        if let Some(id) = node_id {
            return Some(Selection::Node(id));
        }

        room_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| Selection::Room(name.to_string()))
    }
}
