use glam::{Vec3, Vec4};

/// Capacity of the packed shape buffer.
///
/// _Must match the array sizes declared by the raymarching shader_
pub const MAX_SHAPES: usize = 32;

// ~~ Primitive Defaults ~~

pub const DEFAULT_COLOR: Vec4 = Vec4::ONE;
pub const DEFAULT_BLEND_SMOOTHNESS: f32 = 0.5;

pub const DEFAULT_SPHERE_RADIUS: f32 = 0.5;
pub const DEFAULT_BOX_HALF_EXTENTS: Vec3 = Vec3::splat(0.5);
pub const DEFAULT_TORUS_MAJOR_RADIUS: f32 = 0.5;
pub const DEFAULT_TORUS_MINOR_RADIUS: f32 = 0.2;
pub const DEFAULT_CAPSULE_POINT_A: Vec3 = Vec3::new(0., -0.5, 0.);
pub const DEFAULT_CAPSULE_POINT_B: Vec3 = Vec3::new(0., 0.5, 0.);
pub const DEFAULT_CAPSULE_RADIUS: f32 = 0.2;
pub const DEFAULT_PYRAMID_HEIGHT: f32 = 1.0;

// ~~ Primitive Ranges ~~

/// Inclusive `(min, max)` ranges for scalar shape parameters
pub mod ranges {
    pub const BLEND_SMOOTHNESS: (f32, f32) = (0.0, 1.0);
    pub const SPHERE_RADIUS: (f32, f32) = (0.1, 2.0);
    pub const TORUS_MAJOR_RADIUS: (f32, f32) = (0.1, 2.0);
    pub const TORUS_MINOR_RADIUS: (f32, f32) = (0.05, 1.0);
    pub const CAPSULE_RADIUS: (f32, f32) = (0.05, 1.0);
    pub const PYRAMID_HEIGHT: (f32, f32) = (0.1, 2.0);
}

// ~~ Raymarch Settings ~~

pub const DEFAULT_MAX_STEPS: u32 = 100;
pub const DEFAULT_MAX_DISTANCE: f32 = 100.;
pub const DEFAULT_SURFACE_DISTANCE: f32 = 0.001;
pub const DEFAULT_SMOOTH_BLEND: f32 = 0.5;

pub const MAX_STEPS_RANGE: (u32, u32) = (1, 4096);
pub const MAX_DISTANCE_RANGE: (f32, f32) = (0.01, 1.0e6);
pub const SURFACE_DISTANCE_RANGE: (f32, f32) = (1.0e-6, 1.0);
pub const SMOOTH_BLEND_RANGE: (f32, f32) = (0.0, 1.0);

// ~~ Save States ~~

pub const LOCAL_STORAGE_DIR: &str = ".sdf_scene";
pub const SAVE_STATE_FILENAME_RAYMARCH_CONFIG: &str = "raymarch.sdfsave";
