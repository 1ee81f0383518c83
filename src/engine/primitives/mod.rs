pub mod box_primitive;
pub mod capsule;
pub mod primitive;
pub mod pyramid;
pub mod sphere;
pub mod torus;
