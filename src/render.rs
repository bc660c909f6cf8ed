//! Rendering of descriptor trees into Markdown line sequences.
//!
//! Every renderer returns an owned sequence of lines which the caller
//! appends to its own. Nothing here holds shared output state.

/// Single-component rendering.
pub mod component;
/// Heading, paragraph and table emitters.
pub mod lines;
mod page;
/// Recursive directory traversal.
pub mod tree;

pub use component::render_component;
pub use page::Page;
pub use tree::{render_section, walk, WalkError};
