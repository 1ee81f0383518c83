use super::shader_interfaces::{
    shape_buffer::{PackedShapeBuffer, ShapeBufferVec4},
    uniform_buffers::RaymarchUniforms,
    uniform_names,
};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// The external program that raymarches the packed shapes (usually a shader). Each call is one
/// atomic update: implementations must never observe half of a frame's data.
pub trait RaymarchEvaluator {
    /// Called whenever any global raymarch setting changes.
    fn set_raymarch_uniforms(&mut self, uniforms: RaymarchUniforms);

    /// Called once per frame with every array and the shape count of that frame.
    fn set_shape_buffer(&mut self, buffer: &PackedShapeBuffer);

    /// Release any resources allocated for the evaluator (e.g. material instances). Called once
    /// when the owning scene is torn down.
    fn release(&mut self) {}
}

/// A material exposing shader parameters by name.
pub trait ShaderMaterial {
    fn set_int(&mut self, name: &str, value: i32);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vector_array(&mut self, name: &str, values: &[ShapeBufferVec4]);
    fn set_float_array(&mut self, name: &str, values: &[f32]);
}

/// Writes raymarch data into a [`ShaderMaterial`] using the names in [`uniform_names`].
pub struct MaterialEvaluator<M: ShaderMaterial> {
    material: M,
}

impl<M: ShaderMaterial> MaterialEvaluator<M> {
    pub fn new(material: M) -> Self {
        Self { material }
    }

    pub fn material(&self) -> &M {
        &self.material
    }

    pub fn into_material(self) -> M {
        self.material
    }
}

impl<M: ShaderMaterial> RaymarchEvaluator for MaterialEvaluator<M> {
    fn set_raymarch_uniforms(&mut self, uniforms: RaymarchUniforms) {
        let max_steps = i32::try_from(uniforms.max_steps).unwrap_or(i32::MAX);
        self.material.set_int(uniform_names::MAX_STEPS, max_steps);
        self.material
            .set_float(uniform_names::MAX_DISTANCE, uniforms.max_distance);
        self.material
            .set_float(uniform_names::SURFACE_DISTANCE, uniforms.surface_distance);
        self.material
            .set_float(uniform_names::SMOOTH_BLEND, uniforms.smooth_blend);
    }

    fn set_shape_buffer(&mut self, buffer: &PackedShapeBuffer) {
        let m = &mut self.material;
        // shape count is bounded by MAX_SHAPES
        m.set_int(uniform_names::SHAPE_COUNT, buffer.shape_count() as i32);
        m.set_vector_array(uniform_names::SHAPE_POSITIONS, &buffer.positions);
        m.set_vector_array(uniform_names::SHAPE_ROTATIONS, &buffer.rotations);
        m.set_vector_array(uniform_names::SHAPE_SCALES, &buffer.scales);
        m.set_vector_array(uniform_names::SHAPE_PARAMS_1, &buffer.params1);
        m.set_vector_array(uniform_names::SHAPE_PARAMS_2, &buffer.params2);
        m.set_vector_array(uniform_names::SHAPE_PARAMS_3, &buffer.params3);
        m.set_vector_array(uniform_names::SHAPE_PARAMS_4, &buffer.params4);
        m.set_vector_array(uniform_names::SHAPE_COLORS, &buffer.colors);
        m.set_float_array(uniform_names::SHAPE_TYPES, &buffer.shape_types);
        m.set_float_array(uniform_names::BLEND_OPERATIONS, &buffer.blend_operations);
        m.set_float_array(uniform_names::BLEND_SMOOTHNESS, &buffer.blend_smoothness);
    }
}
