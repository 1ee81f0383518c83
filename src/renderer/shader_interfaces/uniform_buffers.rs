use crate::engine::raymarch_config::RaymarchConfig;
use bytemuck::{Pod, Zeroable};

/// Global raymarch settings as seen by the shader. Size should be no more than 128 bytes so it
/// can also be used as a push constant.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Pod, Zeroable)]
pub struct RaymarchUniforms {
    pub max_steps: u32,
    pub max_distance: f32,
    pub surface_distance: f32,
    /// Global smooth-blend factor, applied independently of per-shape smoothness
    pub smooth_blend: f32,
}

impl RaymarchUniforms {
    pub fn new(config: &RaymarchConfig) -> Self {
        Self {
            max_steps: config.max_steps(),
            max_distance: config.max_distance(),
            surface_distance: config.surface_distance(),
            smooth_blend: config.smooth_blend(),
        }
    }
}
