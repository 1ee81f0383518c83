use super::sdf_shape::{SdfShapeRef, WeakSdfShapeRef};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use std::rc::Weak;

/// Registered shapes in registration order. Shapes are referenced, not owned: a shape whose host
/// dropped it is pruned before anyone reads the collection.
///
/// Registration order is significant, it decides the order shapes are blended in.
#[derive(Default, Debug)]
pub struct ShapeRegistry {
    shapes: Vec<WeakSdfShapeRef>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Appends `shape` unless that same shape (by identity) is already registered. Registering a
    /// shape that has already been destroyed does nothing. Returns true if the shape was added.
    pub fn register(&mut self, shape: &WeakSdfShapeRef) -> bool {
        if shape.strong_count() == 0 {
            trace!("ignoring registration of destroyed shape");
            return false;
        }
        if self.position(shape).is_some() {
            return false;
        }
        self.shapes.push(shape.clone());
        trace!("registered shape at index {}", self.shapes.len() - 1);
        true
    }

    /// Removes `shape` if registered. Returns true if the shape was removed.
    pub fn unregister(&mut self, shape: &WeakSdfShapeRef) -> bool {
        match self.position(shape) {
            Some(index) => {
                // `remove` rather than `swap_remove` to keep registration order
                self.shapes.remove(index);
                trace!("unregistered shape at index {}", index);
                true
            }
            None => false,
        }
    }

    /// Removes every shape whose host has been destroyed. Returns the number removed.
    pub fn prune_stale(&mut self) -> usize {
        let len_before = self.shapes.len();
        self.shapes.retain(|shape| shape.strong_count() > 0);
        let pruned = len_before - self.shapes.len();
        if pruned > 0 {
            debug!("pruned {} destroyed shape(s) from the registry", pruned);
        }
        pruned
    }

    /// Prunes destroyed shapes, then returns strong handles to the rest in registration order.
    pub fn live_shapes(&mut self) -> Vec<SdfShapeRef> {
        self.prune_stale();
        self.shapes.iter().filter_map(Weak::upgrade).collect()
    }

    pub fn contains(&self, shape: &WeakSdfShapeRef) -> bool {
        self.position(shape).is_some()
    }

    /// Number of registered entries, including any not yet pruned.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position(&self, shape: &WeakSdfShapeRef) -> Option<usize> {
        self.shapes
            .iter()
            .position(|registered| Weak::ptr_eq(registered, shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{
        scene_node::{new_scene_node_ref, SceneNode},
        sdf_shape::{SdfShape, ShapeDescriptor},
    };
    use std::rc::Rc;

    fn new_shape() -> SdfShapeRef {
        let node = new_scene_node_ref(SceneNode::new("shape"));
        SdfShape::new_ref(node, ShapeDescriptor::default()).unwrap()
    }

    #[test]
    fn register_and_unregister_are_idempotent() {
        let mut registry = ShapeRegistry::new();
        let shape = new_shape();
        let weak = Rc::downgrade(&shape);

        assert!(registry.register(&weak));
        assert!(!registry.register(&weak));
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(&weak));
        assert!(!registry.unregister(&weak));
        assert!(registry.is_empty());
    }

    #[test]
    fn equal_values_are_distinct_entries() {
        let mut registry = ShapeRegistry::new();
        let a = new_shape();
        let b = new_shape();
        assert_eq!(*a.borrow().descriptor(), *b.borrow().descriptor());

        registry.register(&Rc::downgrade(&a));
        registry.register(&Rc::downgrade(&b));
        assert_eq!(registry.len(), 2);

        registry.unregister(&Rc::downgrade(&a));
        assert!(!registry.contains(&Rc::downgrade(&a)));
        assert!(registry.contains(&Rc::downgrade(&b)));
    }

    #[test]
    fn destroyed_shapes_are_pruned() {
        let mut registry = ShapeRegistry::new();
        let kept = new_shape();
        let destroyed = new_shape();
        registry.register(&Rc::downgrade(&destroyed));
        registry.register(&Rc::downgrade(&kept));

        drop(destroyed);
        assert_eq!(registry.len(), 2);

        let live = registry.live_shapes();
        assert_eq!(live.len(), 1);
        assert!(Rc::ptr_eq(&live[0], &kept));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn destroyed_shape_is_not_registered() {
        let mut registry = ShapeRegistry::new();
        let weak = Rc::downgrade(&new_shape());
        assert!(!registry.register(&weak));
        assert!(registry.is_empty());
    }

    #[test]
    fn live_shapes_keep_registration_order() {
        let mut registry = ShapeRegistry::new();
        let shapes: Vec<SdfShapeRef> = (0..5).map(|_| new_shape()).collect();
        for shape in shapes.iter().rev() {
            registry.register(&Rc::downgrade(shape));
        }
        // re-registering doesn't move a shape to the back
        registry.register(&Rc::downgrade(&shapes[4]));

        let live = registry.live_shapes();
        for (live_shape, expected) in live.iter().zip(shapes.iter().rev()) {
            assert!(Rc::ptr_eq(live_shape, expected));
        }
    }
}
