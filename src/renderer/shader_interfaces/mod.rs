pub mod shape_buffer;
pub mod uniform_buffers;
pub mod uniform_names;
