pub mod evaluator;
pub mod shader_interfaces;
