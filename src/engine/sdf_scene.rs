use super::{
    commands::{shape_event_channel, ShapeEvent, ShapeEventReceiver, ShapeEventSender},
    raymarch_config::RaymarchConfig,
    save_states::{load_raymarch_config, save_raymarch_config},
    scene_aggregator::SceneAggregator,
    sdf_shape::{SdfShapeRef, WeakSdfShapeRef},
    shape_registry::ShapeRegistry,
};
use crate::{
    helper::more_errors::IoError,
    renderer::{
        evaluator::RaymarchEvaluator,
        shader_interfaces::{shape_buffer::PackedShapeBuffer, uniform_buffers::RaymarchUniforms},
    },
};
#[allow(unused_imports)]
use log::{debug, error, info, trace, warn};
use std::{path::Path, rc::Rc};

/// Owns the shape registry, the aggregator and the evaluator target for one scene. Create one per
/// application and pass it (or a [`ShapeEventSender`] from [`Self::event_sender`]) to whatever
/// hosts shapes. Call [`Self::advance_frame`] once per tick.
pub struct SdfScene {
    registry: ShapeRegistry,
    /// Created by the first registration
    aggregator: Option<SceneAggregator>,
    config: RaymarchConfig,
    evaluator: Option<Box<dyn RaymarchEvaluator>>,

    event_sender: ShapeEventSender,
    event_receiver: ShapeEventReceiver,
}

impl SdfScene {
    pub fn new(config: RaymarchConfig) -> Self {
        let (event_sender, event_receiver) = shape_event_channel();
        Self {
            registry: ShapeRegistry::new(),
            aggregator: None,
            config,
            evaluator: None,
            event_sender,
            event_receiver,
        }
    }

    pub fn with_evaluator(config: RaymarchConfig, evaluator: Box<dyn RaymarchEvaluator>) -> Self {
        let mut scene = Self::new(config);
        scene.attach_evaluator(evaluator);
        scene
    }

    // ~~ Frame ~~

    /// Applies pending shape events, then packs and publishes this frame's buffer. Returns the
    /// buffer (whether or not an evaluator received it), or `None` if no shape has ever been
    /// registered.
    pub fn advance_frame(&mut self) -> Option<&PackedShapeBuffer> {
        self.execute_shape_events();

        let aggregator = self.aggregator.as_mut()?;
        aggregator.aggregate(&mut self.registry);
        aggregator.publish(self.evaluator.as_deref_mut());
        Some(aggregator.buffer())
    }

    /// Number of frames packed so far.
    pub fn frame_number(&self) -> u64 {
        self.aggregator
            .as_ref()
            .map_or(0, SceneAggregator::frame_number)
    }

    // ~~ Shapes ~~

    /// Cloneable handle for raising [`ShapeEvent`]s from host lifecycle callbacks.
    pub fn event_sender(&self) -> ShapeEventSender {
        self.event_sender.clone()
    }

    /// Queues `event` to be applied at the start of the next [`Self::advance_frame`].
    pub fn queue_event(&mut self, event: ShapeEvent) {
        // the receiver lives as long as self, so this can't fail
        let _ = self.event_sender.send(event);
    }

    /// Registers `shape` now, after any events already queued. No-op if already registered.
    /// Returns true if added.
    pub fn register_shape(&mut self, shape: &SdfShapeRef) -> bool {
        self.execute_shape_events();
        self.register_weak(&Rc::downgrade(shape))
    }

    /// Unregisters `shape` now, after any events already queued. No-op if not registered.
    /// Returns true if removed.
    pub fn unregister_shape(&mut self, shape: &WeakSdfShapeRef) -> bool {
        self.execute_shape_events();
        self.registry.unregister(shape)
    }

    /// Registered shapes whose hosts are still alive (enabled or not). Prunes destroyed ones.
    pub fn live_shape_count(&mut self) -> usize {
        self.execute_shape_events();
        self.registry.prune_stale();
        self.registry.len()
    }

    pub fn has_aggregator(&self) -> bool {
        self.aggregator.is_some()
    }

    // ~~ Evaluator ~~

    /// Sets the evaluator and immediately pushes the raymarch settings to it. Shape data follows
    /// on the next frame. Returns the previous evaluator, if any.
    pub fn attach_evaluator(
        &mut self,
        evaluator: Box<dyn RaymarchEvaluator>,
    ) -> Option<Box<dyn RaymarchEvaluator>> {
        let previous = self.evaluator.replace(evaluator);
        self.publish_config();
        previous
    }

    /// Takes the evaluator away (e.g. while its shader reloads). Registry state is kept and
    /// frames are still packed, just not delivered.
    pub fn detach_evaluator(&mut self) -> Option<Box<dyn RaymarchEvaluator>> {
        self.evaluator.take()
    }

    // ~~ Raymarch Config ~~

    pub fn config(&self) -> &RaymarchConfig {
        &self.config
    }

    pub fn set_max_steps(&mut self, max_steps: u32) {
        self.config.set_max_steps(max_steps);
        self.publish_config();
    }

    pub fn set_max_distance(&mut self, max_distance: f32) {
        self.config.set_max_distance(max_distance);
        self.publish_config_if_finite(max_distance);
    }

    pub fn set_surface_distance(&mut self, surface_distance: f32) {
        self.config.set_surface_distance(surface_distance);
        self.publish_config_if_finite(surface_distance);
    }

    /// Clamped to [0, 1].
    pub fn set_smooth_blend(&mut self, smooth_blend: f32) {
        self.config.set_smooth_blend(smooth_blend);
        self.publish_config_if_finite(smooth_blend);
    }

    /// Applies every field through the clamping setters and publishes once.
    pub fn set_config(&mut self, config: &RaymarchConfig) {
        self.config.apply(config);
        self.publish_config();
    }

    pub fn save_config(&self, dir: &Path) -> Result<(), IoError> {
        save_raymarch_config(dir, &self.config)
    }

    /// Loads settings saved by [`Self::save_config`]. On error the current settings are kept.
    pub fn load_config(&mut self, dir: &Path) -> Result<(), IoError> {
        let loaded = load_raymarch_config(dir)?;
        self.set_config(&loaded);
        Ok(())
    }
}

// ~~ Private Functions ~~

impl SdfScene {
    fn execute_shape_events(&mut self) {
        let events = self.event_receiver.get_events();
        if !events.is_empty() {
            trace!("applying {} shape event(s)", events.len());
        }
        for event in events {
            match event {
                ShapeEvent::Activated(shape) => {
                    self.register_weak(&shape);
                }
                ShapeEvent::Deactivated(shape) => {
                    self.registry.unregister(&shape);
                }
            }
        }
    }

    fn register_weak(&mut self, shape: &WeakSdfShapeRef) -> bool {
        if self.aggregator.is_none() {
            debug!("creating scene aggregator");
            self.aggregator = Some(SceneAggregator::new());
        }
        self.registry.register(shape)
    }

    /// Non-finite writes are ignored by the config, so there is nothing new to publish.
    fn publish_config_if_finite(&mut self, value: f32) {
        if value.is_finite() {
            self.publish_config();
        }
    }

    fn publish_config(&mut self) {
        if let Some(evaluator) = self.evaluator.as_deref_mut() {
            evaluator.set_raymarch_uniforms(RaymarchUniforms::new(&self.config));
        }
    }
}

impl Drop for SdfScene {
    fn drop(&mut self) {
        if let Some(mut evaluator) = self.evaluator.take() {
            debug!("releasing raymarch evaluator");
            evaluator.release();
        }
    }
}
