//! Recursive traversal of a library directory
//!
//! Children are visited in sorted order. A child directory holding a
//! descriptor is rendered as a component and not descended into. Any other
//! child directory becomes a section heading followed by its own contents.
//! Everything else is skipped.

use std::{
    io,
    path::{Path, PathBuf},
};

use crate::{
    render::{component::render_component, lines::heading},
    storage::{load_descriptor, sorted_children, LoadError, Node},
};

/// Renders the contents of `dir` found at `depth`.
///
/// Only the children are rendered; `dir` itself gets no heading. Components
/// and sections directly inside `dir` are headed at `depth + 2`.
///
/// # Errors
///
/// Fails on the first directory that cannot be listed, the first descriptor
/// that cannot be loaded, or a directory that contains itself through a
/// symbolic link. No lines are returned in that case.
pub fn walk(depth: usize, dir: &Path) -> Result<Vec<String>, WalkError> {
    Walker::default().walk(depth, dir)
}

/// Renders a section: a heading for the directory `name`, then its contents.
///
/// # Errors
///
/// Fails under the same conditions as [`walk`].
pub fn render_section(depth: usize, name: &str, dir: &Path) -> Result<Vec<String>, WalkError> {
    Walker::default().section(depth, name, dir)
}

/// Tracks the directories on the current descent path.
#[derive(Debug, Default)]
struct Walker {
    ancestors: Vec<PathBuf>,
}

impl Walker {
    fn walk(&mut self, depth: usize, dir: &Path) -> Result<Vec<String>, WalkError> {
        let canonical = dir.canonicalize().map_err(|source| WalkError::Resolve {
            path: dir.to_path_buf(),
            source,
        })?;

        if self.ancestors.contains(&canonical) {
            return Err(WalkError::Cycle {
                path: dir.to_path_buf(),
            });
        }

        self.ancestors.push(canonical);
        let lines = self.children(depth, dir);
        self.ancestors.pop();
        lines
    }

    fn children(&mut self, depth: usize, dir: &Path) -> Result<Vec<String>, WalkError> {
        let children = sorted_children(dir).map_err(|source| WalkError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut lines = Vec::new();
        for child in children {
            match Node::classify(&child) {
                Node::Component { name, descriptor } => {
                    tracing::trace!("Rendering component {}", child.display());
                    let descriptor = load_descriptor(&descriptor)?;
                    lines.extend(render_component(depth + 1, &name, &descriptor));
                }
                Node::Section { name, path } => {
                    lines.extend(self.section(depth + 1, &name, &path)?);
                }
                Node::Ignored => {}
            }
        }
        Ok(lines)
    }

    fn section(&mut self, depth: usize, name: &str, dir: &Path) -> Result<Vec<String>, WalkError> {
        let mut lines = vec![heading(depth + 1, name)];
        lines.extend(self.walk(depth, dir)?);
        Ok(lines)
    }
}

/// Errors that can occur while walking a library.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A directory could not be listed.
    #[error("failed to read directory {}", path.display())]
    ReadDir {
        /// The directory.
        path: PathBuf,
        /// The underlying listing error.
        source: walkdir::Error,
    },

    /// A directory path could not be resolved.
    #[error("failed to resolve {}", path.display())]
    Resolve {
        /// The directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A component descriptor could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A directory is its own ancestor.
    #[error("directory cycle at {}", path.display())]
    Cycle {
        /// The path at which the cycle was entered again.
        path: PathBuf,
    },
}
