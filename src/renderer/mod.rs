//! Rendering module
//!
//! The scene is painted on the CPU into a flat triangle list (`Frame`) and
//! presented by a minimal WebGPU pipeline. Emoji glyphs ride along for the
//! host to draw with its text renderer.

pub mod bodies;
pub mod painter;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use bodies::Glyph;
pub use painter::Painter;
pub use pipeline::{GpuError, RenderState};
pub use scene::{Frame, RenderOptions, build_frame};
pub use vertex::Vertex;
