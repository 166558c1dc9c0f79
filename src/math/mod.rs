pub mod bounds;
pub mod easing;
