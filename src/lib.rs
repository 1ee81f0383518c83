pub mod config;
pub mod engine;
pub mod helper;
pub mod renderer;
