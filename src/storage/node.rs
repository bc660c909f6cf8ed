//! Directory entry listing and classification
//!
//! The component tree is never materialized. Each directory is classified at
//! the moment the walker reaches it, by probing for a descriptor file among
//! its direct children.

use std::{
    fs,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use crate::storage::DESCRIPTOR_FILE;

/// What a directory entry becomes in the rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A directory that directly contains a descriptor file.
    ///
    /// It is rendered in full and never descended into.
    Component {
        /// The directory name, used as the component heading.
        name: String,
        /// Path to the directory's descriptor file.
        descriptor: PathBuf,
    },

    /// A directory without a descriptor, rendered as a heading and walked.
    Section {
        /// The directory name, used as the section heading.
        name: String,
        /// Path to the directory.
        path: PathBuf,
    },

    /// Anything that is not a directory.
    Ignored,
}

impl Node {
    /// Classifies the entry at `path`.
    ///
    /// Symbolic links to directories are followed. Any entry named
    /// [`DESCRIPTOR_FILE`] directly inside the directory makes it a
    /// component, unless that entry is itself a directory; descriptors
    /// further down do not count. A dangling descriptor link still marks a
    /// component, so loading it reports the missing file.
    #[must_use]
    pub fn classify(path: &Path) -> Self {
        if !path.is_dir() {
            return Self::Ignored;
        }

        let name = entry_name(path);
        let descriptor = path.join(DESCRIPTOR_FILE);

        if fs::symlink_metadata(&descriptor).is_ok() && !descriptor.is_dir() {
            Self::Component { name, descriptor }
        } else {
            Self::Section {
                name,
                path: path.to_path_buf(),
            }
        }
    }
}

/// Lists the direct children of `dir`, sorted by file name.
///
/// Names are compared as raw OS strings, which is byte order on Unix. The
/// order is case-sensitive and independent of the order the filesystem
/// returns entries in.
///
/// # Errors
///
/// Returns an error if `dir` cannot be read, including when it does not
/// exist.
pub fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>, walkdir::Error> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.map(walkdir::DirEntry::into_path))
        .collect()
}

/// The final path component as text.
pub(crate) fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
