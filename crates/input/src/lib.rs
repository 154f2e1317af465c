//! Input surface: normalized pointer state plus the high-level actions the
//! desktop shell and the CLI produce.
//!
//! # Invariants
//! - `MouseState` coordinates always lie in [-1, 1].
//! - The camera reads pointer state; it never writes it.

pub mod action;
pub mod mouse;

pub use action::{Action, DragButton};
pub use mouse::MouseState;
