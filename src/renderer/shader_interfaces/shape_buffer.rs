use crate::engine::{
    config_engine::MAX_SHAPES, primitives::primitive::EncodablePrimitive, sdf_shape::SdfShape,
};
use bytemuck::{Pod, Zeroable};

pub type ShapeBufferUnit = f32;
pub type ShapeBufferVec4 = [ShapeBufferUnit; 4];

/// Each shape has this many generic 4-component parameter slots (`_ShapeParams1` to
/// `_ShapeParams4` in the shader). What they contain depends on the shape type.
pub const PARAM_SLOT_COUNT: usize = 4;
/// Kind specific shape parameters. Index 0 is `params1`.
pub type ParamSlots = [ShapeBufferVec4; PARAM_SLOT_COUNT];

/// Shape type ordinals written to `_ShapeTypes`.
///
/// _Must match the decoding logic in the raymarching shader_
#[rustfmt::skip]
pub mod shape_type_codes {
    use super::ShapeBufferUnit;
    pub const SPHERE:   ShapeBufferUnit = 0.;
    pub const BOX:      ShapeBufferUnit = 1.;
    pub const TORUS:    ShapeBufferUnit = 2.;
    pub const CAPSULE:  ShapeBufferUnit = 3.;
    pub const PYRAMID:  ShapeBufferUnit = 4.;
}

/// Blend operation ordinals written to `_BlendOperations`.
#[rustfmt::skip]
pub mod blend_op_codes {
    use super::ShapeBufferUnit;
    pub const UNION:        ShapeBufferUnit = 0.;
    pub const SUBTRACTION:  ShapeBufferUnit = 1.;
    pub const INTERSECTION: ShapeBufferUnit = 2.;
}

/// One shape's worth of data, in the layout it occupies across the parallel arrays of a
/// [`PackedShapeBuffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapePacket {
    /// World space position, w = 1
    pub position: ShapeBufferVec4,
    /// World space rotation quaternion (x, y, z, w)
    pub rotation: ShapeBufferVec4,
    /// Lossy world scale, w = 1
    pub scale: ShapeBufferVec4,
    pub params: ParamSlots,
    /// RGBA
    pub color: ShapeBufferVec4,
    pub shape_type: ShapeBufferUnit,
    pub blend_operation: ShapeBufferUnit,
    pub blend_smoothness: ShapeBufferUnit,
}

/// Reads the owner's world transform and the shape descriptor into a [`ShapePacket`].
pub fn create_shape_packet(shape: &SdfShape) -> ShapePacket {
    let node = shape.node().borrow();
    let position = node.world_position();
    let rotation = node.world_rotation();
    let scale = node.lossy_scale();
    let descriptor = shape.descriptor();

    ShapePacket {
        position: [position.x, position.y, position.z, 1.],
        rotation: rotation.to_array(),
        scale: [scale.x, scale.y, scale.z, 1.],
        params: descriptor.primitive.encoded_params(),
        color: descriptor.color.to_array(),
        shape_type: descriptor.primitive.kind().type_code(),
        blend_operation: descriptor.blend_operation.op_code(),
        blend_smoothness: descriptor.blend_smoothness,
    }
}

/// Fixed capacity parallel arrays describing every packed shape for one frame. Index `i` across
/// all arrays describes one shape. Entries at `i >= shape_count` are zero and must not be
/// evaluated.
///
/// _Layout must match the buffer declared by the raymarching shader_
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PackedShapeBuffer {
    pub positions: [ShapeBufferVec4; MAX_SHAPES],
    pub rotations: [ShapeBufferVec4; MAX_SHAPES],
    pub scales: [ShapeBufferVec4; MAX_SHAPES],
    pub params1: [ShapeBufferVec4; MAX_SHAPES],
    pub params2: [ShapeBufferVec4; MAX_SHAPES],
    pub params3: [ShapeBufferVec4; MAX_SHAPES],
    pub params4: [ShapeBufferVec4; MAX_SHAPES],
    pub colors: [ShapeBufferVec4; MAX_SHAPES],
    pub shape_types: [ShapeBufferUnit; MAX_SHAPES],
    pub blend_operations: [ShapeBufferUnit; MAX_SHAPES],
    pub blend_smoothness: [ShapeBufferUnit; MAX_SHAPES],
    /// Kept at or below [`MAX_SHAPES`] by [`Self::set_shape_count`]
    shape_count: u32,
}

impl PackedShapeBuffer {
    pub fn new() -> Self {
        Self::zeroed()
    }

    /// Bounded by [`MAX_SHAPES`] even for a buffer cast from arbitrary bytes.
    #[inline]
    pub fn shape_count(&self) -> usize {
        (self.shape_count as usize).min(MAX_SHAPES)
    }

    /// Clamped to [`MAX_SHAPES`].
    pub fn set_shape_count(&mut self, shape_count: usize) {
        // bounded by MAX_SHAPES so the cast can't truncate
        self.shape_count = shape_count.min(MAX_SHAPES) as u32;
    }

    /// Zero-fills every array and resets the shape count.
    pub fn clear(&mut self) {
        *self = Self::zeroed();
    }

    /// Writes `packet` into every array at `index`. Does not change the shape count.
    pub fn write_packet(&mut self, index: usize, packet: &ShapePacket) {
        debug_assert!(index < MAX_SHAPES);
        self.positions[index] = packet.position;
        self.rotations[index] = packet.rotation;
        self.scales[index] = packet.scale;
        self.params1[index] = packet.params[0];
        self.params2[index] = packet.params[1];
        self.params3[index] = packet.params[2];
        self.params4[index] = packet.params[3];
        self.colors[index] = packet.color;
        self.shape_types[index] = packet.shape_type;
        self.blend_operations[index] = packet.blend_operation;
        self.blend_smoothness[index] = packet.blend_smoothness;
    }

    /// Gathers the values at `index` back into a [`ShapePacket`]. Returns `None` when
    /// `index >= MAX_SHAPES`.
    pub fn packet(&self, index: usize) -> Option<ShapePacket> {
        if index >= MAX_SHAPES {
            return None;
        }
        Some(ShapePacket {
            position: self.positions[index],
            rotation: self.rotations[index],
            scale: self.scales[index],
            params: [
                self.params1[index],
                self.params2[index],
                self.params3[index],
                self.params4[index],
            ],
            color: self.colors[index],
            shape_type: self.shape_types[index],
            blend_operation: self.blend_operations[index],
            blend_smoothness: self.blend_smoothness[index],
        })
    }

    /// Packets for the leading `shape_count` indices.
    pub fn live_packets(&self) -> impl Iterator<Item = ShapePacket> + '_ {
        (0..self.shape_count()).filter_map(|i| self.packet(i))
    }

    /// Raw bytes for uploading to a gpu buffer.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}

impl Default for PackedShapeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn buffer_has_no_padding() {
        let vec4_arrays = 8 * MAX_SHAPES * size_of::<ShapeBufferVec4>();
        let scalar_arrays = 3 * MAX_SHAPES * size_of::<ShapeBufferUnit>();
        let expected = vec4_arrays + scalar_arrays + size_of::<u32>();
        assert_eq!(size_of::<PackedShapeBuffer>(), expected);
        assert_eq!(PackedShapeBuffer::new().as_bytes().len(), expected);
    }

    #[test]
    fn new_buffer_is_zeroed() {
        let buffer = PackedShapeBuffer::new();
        assert_eq!(buffer.shape_count(), 0);
        assert!(buffer.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn packet_written_to_every_array() {
        let packet = ShapePacket {
            position: [1., 2., 3., 1.],
            rotation: [0., 0., 0., 1.],
            scale: [1., 1., 1., 1.],
            params: [[0.2, 0., 0., 0.], [0.; 4], [0., -0.5, 0., 0.], [0., 0.5, 0., 0.]],
            color: [1., 0., 0., 1.],
            shape_type: shape_type_codes::CAPSULE,
            blend_operation: blend_op_codes::SUBTRACTION,
            blend_smoothness: 0.25,
        };
        let mut buffer = PackedShapeBuffer::new();
        buffer.write_packet(5, &packet);

        assert_eq!(buffer.packet(5), Some(packet));
        assert_eq!(buffer.params3[5], [0., -0.5, 0., 0.]);
        assert_eq!(buffer.packet(4), Some(ShapePacket::default()));
        assert_eq!(buffer.packet(MAX_SHAPES), None);

        buffer.clear();
        assert_eq!(buffer, PackedShapeBuffer::new());
    }

    #[test]
    fn shape_count_never_exceeds_capacity() {
        let mut buffer = PackedShapeBuffer::new();
        buffer.set_shape_count(MAX_SHAPES + 8);
        assert_eq!(buffer.shape_count(), MAX_SHAPES);
        assert_eq!(buffer.live_packets().count(), MAX_SHAPES);

        let mut bytes = PackedShapeBuffer::new().as_bytes().to_vec();
        let count_offset = bytes.len() - std::mem::size_of::<u32>();
        bytes[count_offset..].copy_from_slice(&1000u32.to_ne_bytes());
        let cast: PackedShapeBuffer = bytemuck::pod_read_unaligned(&bytes);
        assert_eq!(cast.shape_count(), MAX_SHAPES);
    }
}
