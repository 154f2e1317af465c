//! Rendering interface shared by every backend.
//!
//! # Invariants
//! - Renderers read the scene and never mutate it.
//! - A frame is fully determined by the scene and the view.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};
