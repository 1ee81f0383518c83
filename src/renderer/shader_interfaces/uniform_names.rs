//! Names of the uniforms declared by the raymarching shader.

// ~~ Raymarch Settings ~~

pub const MAX_STEPS: &str = "_MaxSteps";
pub const MAX_DISTANCE: &str = "_MaxDistance";
pub const SURFACE_DISTANCE: &str = "_SurfaceDistance";
pub const SMOOTH_BLEND: &str = "_SmoothBlend";

// ~~ Shape Arrays ~~

pub const SHAPE_COUNT: &str = "_ShapeCount";
pub const SHAPE_POSITIONS: &str = "_ShapePositions";
pub const SHAPE_ROTATIONS: &str = "_ShapeRotations";
pub const SHAPE_SCALES: &str = "_ShapeScales";
pub const SHAPE_PARAMS_1: &str = "_ShapeParams1";
pub const SHAPE_PARAMS_2: &str = "_ShapeParams2";
pub const SHAPE_PARAMS_3: &str = "_ShapeParams3";
pub const SHAPE_PARAMS_4: &str = "_ShapeParams4";
pub const SHAPE_COLORS: &str = "_ShapeColors";
pub const SHAPE_TYPES: &str = "_ShapeTypes";
pub const BLEND_OPERATIONS: &str = "_BlendOperations";
pub const BLEND_SMOOTHNESS: &str = "_BlendSmoothness";
