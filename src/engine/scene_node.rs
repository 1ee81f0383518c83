use crate::helper::more_errors::HierarchyError;
use glam::{Affine3A, Quat, Vec3};
use std::{cell::RefCell, rc::Rc};

/// Use functions `borrow` and `borrow_mut` to access the `SceneNode`.
pub type SceneNodeRef = Rc<RefCell<SceneNode>>;

#[inline]
pub fn new_scene_node_ref(inner: SceneNode) -> SceneNodeRef {
    Rc::new(RefCell::new(inner))
}

/// Translation, rotation and scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    /// Kept normalized by [`SceneNode::set_rotation`]
    pub rotation: Quat,
    pub scale: Vec3,
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A host scene-graph node. Shapes read their world transform from the node they are attached to
/// every frame, so nothing here is cached.
#[derive(Clone, Debug)]
pub struct SceneNode {
    name: String,
    local: NodeTransform,
    enabled: bool,
    parent: Option<SceneNodeRef>,
}

impl SceneNode {
    /// Enabled root node at the origin.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            local: NodeTransform::IDENTITY,
            enabled: true,
            parent: None,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.local.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.set_rotation(rotation);
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.local.scale = scale;
        self
    }

    /// A node that isn't shared yet can't be anyone's ancestor, so no cycle check is needed here.
    pub fn with_parent(mut self, parent: SceneNodeRef) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_transform(&self) -> &NodeTransform {
        &self.local
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.local.translation = translation;
    }

    /// Non-normalizable rotations (near zero length) fall back to identity.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.local.rotation = if rotation.length_squared() > f32::EPSILON {
            rotation.normalize()
        } else {
            Quat::IDENTITY
        };
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.local.scale = scale;
    }

    /// Reparents `node`. Fails, leaving the hierarchy unchanged, if `parent` is `node` itself or
    /// one of its descendants.
    pub fn set_parent(
        node: &SceneNodeRef,
        parent: Option<SceneNodeRef>,
    ) -> Result<(), HierarchyError> {
        let mut ancestor = parent.clone();
        while let Some(current) = ancestor {
            if Rc::ptr_eq(&current, node) {
                let parent_name = parent
                    .as_ref()
                    .map(|p| p.borrow().name().to_string())
                    .unwrap_or_default();
                return Err(HierarchyError::ParentCycle {
                    node: node.borrow().name().to_string(),
                    parent: parent_name,
                });
            }
            ancestor = current.borrow().parent().cloned();
        }
        node.borrow_mut().parent = parent;
        Ok(())
    }

    pub fn parent(&self) -> Option<&SceneNodeRef> {
        self.parent.as_ref()
    }

    /// Whether this node itself is enabled, ignoring parents.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Enabled, and every parent up the hierarchy is enabled too.
    pub fn is_active_in_hierarchy(&self) -> bool {
        self.enabled
            && self
                .parent
                .as_ref()
                .map_or(true, |parent| parent.borrow().is_active_in_hierarchy())
    }

    pub fn world_matrix(&self) -> Affine3A {
        let local = self.local.to_affine();
        match &self.parent {
            Some(parent) => parent.borrow().world_matrix() * local,
            None => local,
        }
    }

    pub fn world_position(&self) -> Vec3 {
        self.world_matrix().translation.into()
    }

    pub fn world_rotation(&self) -> Quat {
        let rotation = match &self.parent {
            Some(parent) => parent.borrow().world_rotation() * self.local.rotation,
            None => self.local.rotation,
        };
        rotation.normalize()
    }

    /// World scale extracted from the world matrix. Lossy because a skewed matrix (non-uniform
    /// parent scale with a rotated child) can't be represented by a scale vector.
    pub fn lossy_scale(&self) -> Vec3 {
        let matrix = self.world_matrix().matrix3;
        // mirrored transforms flip the x axis
        let sign = if matrix.determinant() < 0. { -1. } else { 1. };
        Vec3::new(
            matrix.x_axis.length() * sign,
            matrix.y_axis.length(),
            matrix.z_axis.length(),
        )
    }
}
