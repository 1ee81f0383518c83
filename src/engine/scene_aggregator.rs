use super::{config_engine::MAX_SHAPES, shape_registry::ShapeRegistry};
use crate::renderer::{
    evaluator::RaymarchEvaluator,
    shader_interfaces::shape_buffer::{create_shape_packet, PackedShapeBuffer},
};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};

/// Packs registered shapes into a [`PackedShapeBuffer`] once per frame.
///
/// Packing rules:
/// - at most [`MAX_SHAPES`] shapes are packed, the first ones in registration order. The rest are
///   dropped for that frame without error.
/// - a registered shape whose node is disabled keeps its slot but leaves it zero-filled. Slots are
///   never compacted, so index `i` always corresponds to the `i`th registered shape.
/// - the evaluator folds shapes in index order, so registration order changes the rendered
///   result.
pub struct SceneAggregator {
    buffer: PackedShapeBuffer,
    frame_number: u64,
    /// Shapes dropped by the last pass, so the overflow warning isn't repeated every frame
    last_dropped_count: usize,
}

impl SceneAggregator {
    pub fn new() -> Self {
        Self {
            buffer: PackedShapeBuffer::new(),
            frame_number: 0,
            last_dropped_count: 0,
        }
    }

    /// Rebuilds the buffer from `registry`. Destroyed shapes are pruned first.
    pub fn aggregate(&mut self, registry: &mut ShapeRegistry) -> &PackedShapeBuffer {
        self.frame_number += 1;
        self.buffer.clear();

        let live_shapes = registry.live_shapes();
        let shape_count = live_shapes.len().min(MAX_SHAPES);
        self.note_overflow(live_shapes.len() - shape_count);

        let mut disabled_count = 0;
        for (index, shape) in live_shapes.iter().take(shape_count).enumerate() {
            let shape = shape.borrow();
            if !shape.is_active() {
                trace!(
                    "slot {} left empty, {} '{}' is disabled",
                    index,
                    shape.kind(),
                    shape.node().borrow().name()
                );
                disabled_count += 1;
                continue;
            }
            let packet = create_shape_packet(&shape);
            self.buffer.write_packet(index, &packet);
        }
        self.buffer.set_shape_count(shape_count);

        trace!(
            "frame {}: packed {} shape(s), {} disabled",
            self.frame_number,
            shape_count,
            disabled_count
        );
        &self.buffer
    }

    /// Sends the most recently aggregated buffer to `evaluator` in a single update. Does nothing
    /// without an evaluator.
    pub fn publish(&self, evaluator: Option<&mut (dyn RaymarchEvaluator + 'static)>) {
        match evaluator {
            Some(evaluator) => evaluator.set_shape_buffer(&self.buffer),
            None => trace!(
                "no evaluator attached, frame {} not published",
                self.frame_number
            ),
        }
    }

    /// Buffer from the most recent [`Self::aggregate`] call.
    pub fn buffer(&self) -> &PackedShapeBuffer {
        &self.buffer
    }

    /// Number of [`Self::aggregate`] calls so far.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    fn note_overflow(&mut self, dropped_count: usize) {
        if dropped_count != self.last_dropped_count {
            if dropped_count > 0 {
                warn!(
                    "{} shape(s) registered beyond the capacity of {}. only the first {} in registration order will be rendered",
                    dropped_count, MAX_SHAPES, MAX_SHAPES
                );
            } else {
                info!("shape count back within capacity");
            }
        }
        self.last_dropped_count = dropped_count;
    }
}

impl Default for SceneAggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        operation::BlendOperation,
        primitives::{box_primitive::BoxPrimitive, capsule::Capsule, sphere::Sphere},
        scene_node::{new_scene_node_ref, SceneNode},
        sdf_shape::{SdfShape, SdfShapeRef, ShapeDescriptor},
    };
    use glam::{Quat, Vec3, Vec4};
    use std::rc::Rc;

    fn shape_at(position: Vec3, descriptor: ShapeDescriptor) -> SdfShapeRef {
        let node = new_scene_node_ref(SceneNode::new("shape").with_translation(position));
        SdfShape::new_ref(node, descriptor).unwrap()
    }

    fn registry_of(shapes: &[SdfShapeRef]) -> ShapeRegistry {
        let mut registry = ShapeRegistry::new();
        for shape in shapes {
            registry.register(&Rc::downgrade(shape));
        }
        registry
    }

    #[test]
    fn sphere_and_capsule_parameters() {
        let shapes = vec![
            shape_at(Vec3::ZERO, ShapeDescriptor::new(Sphere::new(0.7))),
            shape_at(
                Vec3::ZERO,
                ShapeDescriptor::new(Capsule::new(
                    Vec3::new(0., -0.5, 0.),
                    Vec3::new(0., 0.5, 0.),
                    0.2,
                )),
            ),
        ];
        let mut registry = registry_of(&shapes);
        let mut aggregator = SceneAggregator::new();
        let buffer = aggregator.aggregate(&mut registry);

        assert_eq!(buffer.shape_count(), 2);
        assert_eq!(buffer.params1[0], [0.7, 0., 0., 0.]);
        assert_eq!(buffer.params3[0], [0.; 4]);
        assert_eq!(buffer.params4[0], [0.; 4]);
        assert_eq!(buffer.params1[1], [0.2, 0., 0., 0.]);
        assert_eq!(buffer.params3[1], [0., -0.5, 0., 0.]);
        assert_eq!(buffer.params4[1], [0., 0.5, 0., 0.]);
        assert_eq!(buffer.shape_types[..2], [0., 3.]);
    }

    #[test]
    fn transform_and_descriptor_are_packed() {
        let rotation = Quat::from_rotation_z(0.3);
        let node = new_scene_node_ref(
            SceneNode::new("box")
                .with_translation(Vec3::new(1., 2., 3.))
                .with_rotation(rotation)
                .with_scale(Vec3::new(1., 2., 3.)),
        );
        let descriptor = ShapeDescriptor::new(BoxPrimitive::new(Vec3::new(0.5, 0.25, 1.)))
            .with_color(Vec4::new(1., 0., 0., 0.5))
            .with_blend(BlendOperation::Intersection, 0.1);
        let shape = SdfShape::new_ref(node, descriptor).unwrap();
        let mut registry = registry_of(&[shape.clone()]);

        let mut aggregator = SceneAggregator::new();
        let buffer = aggregator.aggregate(&mut registry);

        assert_eq!(buffer.positions[0], [1., 2., 3., 1.]);
        assert!(Vec4::from(buffer.rotations[0]).abs_diff_eq(Vec4::from(rotation), 1e-6));
        assert!(Vec4::from(buffer.scales[0]).abs_diff_eq(Vec4::new(1., 2., 3., 1.), 1e-5));
        assert_eq!(buffer.params1[0], [0.5, 0.25, 1., 0.]);
        assert_eq!(buffer.colors[0], [1., 0., 0., 0.5]);
        assert_eq!(buffer.shape_types[0], 1.);
        assert_eq!(buffer.blend_operations[0], 2.);
        assert_eq!(buffer.blend_smoothness[0], 0.1);
    }

    #[test]
    fn overflow_keeps_first_shapes_in_registration_order() {
        let shapes: Vec<SdfShapeRef> = (0..40)
            .map(|i| shape_at(Vec3::new(i as f32, 0., 0.), ShapeDescriptor::default()))
            .collect();
        let mut registry = registry_of(&shapes);
        let mut aggregator = SceneAggregator::new();
        let buffer = aggregator.aggregate(&mut registry);

        assert_eq!(buffer.shape_count(), MAX_SHAPES);
        for i in 0..MAX_SHAPES {
            assert_eq!(buffer.positions[i][0], i as f32);
        }
        // dropped shapes are still registered
        assert_eq!(registry.len(), 40);
    }

    #[test]
    fn disabled_shape_keeps_its_slot_zeroed() {
        let shapes = vec![
            shape_at(Vec3::X, ShapeDescriptor::new(Sphere::new(0.3))),
            shape_at(Vec3::Y, ShapeDescriptor::new(Sphere::new(0.4))),
            shape_at(Vec3::Z, ShapeDescriptor::new(Sphere::new(0.5))),
        ];
        shapes[1].borrow().node().borrow_mut().set_enabled(false);
        let mut registry = registry_of(&shapes);
        let mut aggregator = SceneAggregator::new();
        let buffer = aggregator.aggregate(&mut registry);

        assert_eq!(buffer.shape_count(), 3);
        assert_eq!(buffer.packet(1), Some(Default::default()));
        assert_eq!(buffer.colors[1], [0.; 4]);
        // no compaction: the third shape stays at index 2
        assert_eq!(buffer.params1[2], [0.5, 0., 0., 0.]);
        assert_eq!(buffer.positions[2], [0., 0., 1., 1.]);

        shapes[1].borrow().node().borrow_mut().set_enabled(true);
        let buffer = aggregator.aggregate(&mut registry);
        assert_eq!(buffer.params1[1], [0.4, 0., 0., 0.]);
        assert_eq!(buffer.colors[1], [1.; 4]);
    }

    #[test]
    fn reordering_changes_index_not_values() {
        let a = shape_at(Vec3::X, ShapeDescriptor::new(Sphere::new(0.3)));
        let b = shape_at(Vec3::Y, ShapeDescriptor::new(Sphere::new(0.6)));
        let mut aggregator = SceneAggregator::new();

        let ab = *aggregator.aggregate(&mut registry_of(&[a.clone(), b.clone()]));
        let ba = *aggregator.aggregate(&mut registry_of(&[b.clone(), a.clone()]));

        assert_eq!(ab.packet(0), ba.packet(1));
        assert_eq!(ab.packet(1), ba.packet(0));
        assert_ne!(ab, ba);
    }

    #[test]
    fn destroyed_shape_is_absent_next_pass() {
        let a = shape_at(Vec3::X, ShapeDescriptor::new(Sphere::new(0.3)));
        let b = shape_at(Vec3::Y, ShapeDescriptor::new(Sphere::new(0.6)));
        let mut registry = registry_of(&[a.clone(), b.clone()]);
        let mut aggregator = SceneAggregator::new();
        assert_eq!(aggregator.aggregate(&mut registry).shape_count(), 2);

        drop(a);
        let buffer = aggregator.aggregate(&mut registry);
        assert_eq!(buffer.shape_count(), 1);
        assert_eq!(buffer.params1[0], [0.6, 0., 0., 0.]);
        assert_eq!(buffer.packet(1), Some(Default::default()));
        assert_eq!(aggregator.frame_number(), 2);
    }
}
