mod descriptor;
/// Top-level library discovery.
pub mod library;
/// Directory classification and sorted listing.
pub mod node;

pub use descriptor::{load as load_descriptor, LoadError, DESCRIPTOR_FILE};
pub use library::{discover, DiscoverError, Library};
pub use node::{sorted_children, Node};
