pub mod commands;
pub mod config_engine;
pub mod operation;
pub mod primitives;
pub mod raymarch_config;
pub mod save_states;
pub mod scene_aggregator;
pub mod scene_node;
/// Scene entry point
pub mod sdf_scene;
pub mod sdf_shape;
pub mod shape_registry;
