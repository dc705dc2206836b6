//! Rendering module
//!
//! The scene is rebuilt from the session state every frame as a flat
//! triangle list and drawn in a single pass.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderError, RenderState, field_to_ndc};
pub use scene::build_scene;
pub use vertex::Vertex;
