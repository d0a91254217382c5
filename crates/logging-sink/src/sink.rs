//! Handlers that publish records to writers or memory.

mod memory;
mod record_sink;
mod render;

pub use memory::MemoryHandler;
pub use record_sink::RecordSink;
pub use render::render_record;
