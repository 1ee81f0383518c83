use crate::renderer::shader_interfaces::shape_buffer::{blend_op_codes, ShapeBufferUnit};

/// How a shape is combined with the result accumulated from every shape before it. The running
/// result is always the left operand.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Default)]
pub enum BlendOperation {
    /// Soft minimum of the running result and this shape.
    #[default]
    Union,
    /// Soft difference: this shape is carved out of the running result.
    Subtraction,
    /// Soft maximum of the running result and this shape.
    Intersection,
}

impl BlendOperation {
    /// Ordinal written to the `_BlendOperations` array.
    pub fn op_code(&self) -> ShapeBufferUnit {
        match *self {
            Self::Union => blend_op_codes::UNION,
            Self::Subtraction => blend_op_codes::SUBTRACTION,
            Self::Intersection => blend_op_codes::INTERSECTION,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_codes_are_ordinals() {
        assert_eq!(BlendOperation::Union.op_code(), 0.);
        assert_eq!(BlendOperation::Subtraction.op_code(), 1.);
        assert_eq!(BlendOperation::Intersection.op_code(), 2.);
    }
}
