pub mod gltf_import;
pub mod loader;
pub mod object3d;
pub mod query;
pub mod scene;
pub mod transform;
