use anyhow::Context;
use glam::{Quat, Vec3, Vec4};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use sdf_scene_packer::{
    config,
    engine::{
        operation::BlendOperation,
        primitives::{
            box_primitive::BoxPrimitive, capsule::Capsule, pyramid::Pyramid, sphere::Sphere,
            torus::Torus,
        },
        raymarch_config::RaymarchConfig,
        save_states::storage_dir,
        scene_node::{new_scene_node_ref, SceneNode},
        sdf_scene::SdfScene,
        sdf_shape::{SdfShape, SdfShapeRef, ShapeDescriptor},
    },
    helper::{
        anyhow_panic::{anyhow_unwrap, log_anyhow_error_and_sources},
        logger,
    },
    renderer::{
        evaluator::{MaterialEvaluator, ShaderMaterial},
        shader_interfaces::shape_buffer::ShapeBufferVec4,
    },
};

/// Prints uniform writes instead of forwarding them to a GPU material.
struct LoggingMaterial;

impl ShaderMaterial for LoggingMaterial {
    fn set_int(&mut self, name: &str, value: i32) {
        debug!("{} = {}", name, value);
    }
    fn set_float(&mut self, name: &str, value: f32) {
        debug!("{} = {}", name, value);
    }
    fn set_vector_array(&mut self, name: &str, values: &[ShapeBufferVec4]) {
        trace!("{} = {:?}", name, values);
    }
    fn set_float_array(&mut self, name: &str, values: &[f32]) {
        trace!("{} = {:?}", name, values);
    }
}

fn main() {
    if let Err(e) = logger::init(config::log_level()) {
        eprintln!("failed to init logger: {}", e);
    }
    info!(
        "{} v{}.{}",
        config::ENGINE_NAME,
        config::ENGINE_VERSION_MAJOR,
        config::ENGINE_VERSION_MINOR
    );

    anyhow_unwrap(run_demo(), "run demo scene");
}

fn run_demo() -> anyhow::Result<()> {
    let mut scene = SdfScene::with_evaluator(
        RaymarchConfig::from_env(),
        Box::new(MaterialEvaluator::new(LoggingMaterial)),
    );

    let save_dir = storage_dir();
    if let Err(e) = scene.load_config(&save_dir) {
        info!("using default raymarch settings: {}", e);
    }

    let shapes = demo_shapes().context("creating demo shapes")?;
    let events = scene.event_sender();
    for shape in &shapes {
        events
            .activated(shape)
            .map_err(|_| anyhow::anyhow!("shape event channel closed"))?;
    }
    log_frame(&mut scene);

    // disabled hosts keep their slot but stop contributing
    shapes[1].borrow().node().borrow_mut().set_enabled(false);
    log_frame(&mut scene);

    shapes[1].borrow().node().borrow_mut().set_enabled(true);
    shapes[2]
        .borrow()
        .node()
        .borrow_mut()
        .set_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));
    shapes[0]
        .borrow_mut()
        .set_blend_smoothness(0.9)
        .context("updating sphere blend")?;
    // orbit the pyramid around the sphere instead of the root
    let sphere_node = shapes[0].borrow().node().clone();
    let pyramid_node = shapes[4].borrow().node().clone();
    SceneNode::set_parent(&pyramid_node, Some(sphere_node)).context("reparenting pyramid")?;
    scene.set_smooth_blend(0.25);
    log_frame(&mut scene);

    // destroying a host without deactivating it first
    let mut shapes = shapes;
    let destroyed = shapes.remove(3);
    drop(destroyed);
    log_frame(&mut scene);

    if let Err(e) = scene
        .save_config(&save_dir)
        .context("saving raymarch settings")
    {
        log_anyhow_error_and_sources(&e, "persist raymarch settings");
    }
    Ok(())
}

fn demo_shapes() -> anyhow::Result<Vec<SdfShapeRef>> {
    let root = new_scene_node_ref(SceneNode::new("root").with_translation(Vec3::new(0., 1., 0.)));
    let node = |name: &str, translation: Vec3| {
        new_scene_node_ref(
            SceneNode::new(name)
                .with_translation(translation)
                .with_parent(root.clone()),
        )
    };

    let shapes = vec![
        SdfShape::new_ref(
            node("sphere", Vec3::new(-1.5, 0., 0.)),
            ShapeDescriptor::new(Sphere::new(0.6)).with_color(Vec4::new(0.9, 0.2, 0.2, 1.)),
        )?,
        SdfShape::new_ref(
            node("box", Vec3::new(-0.5, 0., 0.)),
            ShapeDescriptor::new(BoxPrimitive::new(Vec3::new(0.4, 0.3, 0.5)))
                .with_blend(BlendOperation::Subtraction, 0.2),
        )?,
        SdfShape::new_ref(
            node("torus", Vec3::new(0.5, 0., 0.)),
            ShapeDescriptor::new(Torus::new(0.5, 0.15)).with_color(Vec4::new(0.2, 0.8, 0.3, 1.)),
        )?,
        SdfShape::new_ref(
            node("capsule", Vec3::new(1.5, 0., 0.)),
            ShapeDescriptor::new(Capsule::default()),
        )?,
        SdfShape::new_ref(
            node("pyramid", Vec3::new(0., 0., 1.5)),
            ShapeDescriptor::new(Pyramid::new(0.8))
                .with_blend(BlendOperation::Intersection, 0.5),
        )?,
    ];
    for shape in &shapes {
        let shape = shape.borrow();
        debug!("created {} '{}'", shape.kind(), shape.node().borrow().name());
    }
    Ok(shapes)
}

fn log_frame(scene: &mut SdfScene) {
    let frame_number = scene.frame_number() + 1;
    match scene.advance_frame() {
        Some(buffer) => {
            info!("frame {}: {} shape(s)", frame_number, buffer.shape_count());
            for (index, packet) in buffer.live_packets().enumerate() {
                debug!(
                    "\t{}: type {} at {:?}",
                    index, packet.shape_type, packet.position
                );
            }
        }
        None => info!("frame {}: no shapes registered", frame_number),
    }
}
