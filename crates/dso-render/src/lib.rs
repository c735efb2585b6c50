pub mod graph;
pub mod grid;
pub mod history;
pub mod marker;
pub mod matrix;
pub mod program;
pub mod renderer;
pub mod shaders;

pub use program::{FlatProgram, RendererError};
pub use renderer::ScopeRenderer;

/// Cast a slice of 2-D vertices to bytes for buffer uploads.
pub(crate) fn cast_vertices(data: &[[f32; 2]]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}
