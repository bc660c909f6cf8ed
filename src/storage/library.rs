//! Top-level library discovery
//!
//! Each direct child directory of the input root is a library, and each
//! library becomes one documentation page.

use std::path::{Path, PathBuf};

use crate::{
    domain::Config,
    storage::node::{entry_name, sorted_children},
};

/// A top-level directory documented as a single page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    name: String,
    path: PathBuf,
}

impl Library {
    /// Creates a library rooted at `path`, named after its final component.
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self {
            name: entry_name(&path),
            path,
        }
    }

    /// The library's directory name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The library's directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The page file stem: spaces become underscores, then `suffix` is
    /// appended.
    #[must_use]
    pub fn file_stem(&self, suffix: &str) -> String {
        format!("{}{suffix}", self.name.replace(' ', "_"))
    }

    /// The page file name, which doubles as the page id.
    #[must_use]
    pub fn file_name(&self, suffix: &str) -> String {
        format!("{}.md", self.file_stem(suffix))
    }

    /// The page title.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{} Components", self.name)
    }
}

/// Lists the libraries under `root`, sorted by name.
///
/// Non-directories and names rejected by [`Config::is_ignored`] are skipped.
///
/// # Errors
///
/// Returns [`DiscoverError::NoInput`] if `root` is not a directory, or
/// [`DiscoverError::Read`] if it cannot be listed.
pub fn discover(root: &Path, config: &Config) -> Result<Vec<Library>, DiscoverError> {
    if !root.is_dir() {
        return Err(DiscoverError::NoInput(root.to_path_buf()));
    }

    let children = sorted_children(root).map_err(|source| DiscoverError::Read {
        path: root.to_path_buf(),
        source,
    })?;

    Ok(children
        .into_iter()
        .filter(|path| {
            let name = entry_name(path);
            let keep = path.is_dir() && !config.is_ignored(&name);
            if !keep {
                tracing::debug!("Skipping top-level entry {name}");
            }
            keep
        })
        .map(Library::new)
        .collect())
}

/// Errors that can occur when discovering libraries.
#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    /// The input root does not exist or is not a directory.
    #[error("No libs found here: {}", .0.display())]
    NoInput(PathBuf),

    /// The input root exists but could not be listed.
    #[error("failed to list {}", path.display())]
    Read {
        /// The input root.
        path: PathBuf,
        /// The underlying listing error.
        source: walkdir::Error,
    },
}
