//! Go IR rendering

mod renderer;
mod writer;

pub use renderer::GoRenderer;
pub use writer::GoWriter;
