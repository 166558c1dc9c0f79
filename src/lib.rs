pub mod camera;
pub mod catalog;
pub mod focus;
pub mod math;
pub mod scene_graph;
pub mod viewer;
