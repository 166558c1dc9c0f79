pub mod animation;
pub mod config;
pub mod controller;
pub mod framing;
pub mod selection;

pub use config::{FocusConfig, OffsetMode};
pub use controller::{FocusController, FocusState};
pub use framing::CameraPose;
pub use selection::Selection;
