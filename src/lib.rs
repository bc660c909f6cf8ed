//! Component Documentation Generator
//!
//! Component libraries are directory trees. A directory holding a
//! `descriptor.json` is a component; any other directory groups the
//! directories below it. Each top-level library becomes one Markdown page.

pub mod domain;
pub use domain::{Config, Descriptor, LinkRef, Links, PropertyDescriptor, PropertyKind};

/// Filesystem access: descriptor loading, directory classification and
/// library discovery.
pub mod storage;
pub use storage::{discover, load_descriptor, Library, LoadError, Node};

pub mod render;
pub use render::{render_component, walk, Page, WalkError};

pub mod generate;
pub use generate::{GenerateError, Generator, Mode, Report, Status};
