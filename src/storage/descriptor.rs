use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::domain::Descriptor;

/// The file name that marks a directory as a component.
pub const DESCRIPTOR_FILE: &str = "descriptor.json";

/// Reads and parses a descriptor file.
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or does not
/// contain a valid descriptor.
#[instrument(level = "debug")]
pub fn load(path: &Path) -> Result<Descriptor, LoadError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|source| {
        if source.is_io() {
            LoadError::Io {
                path: path.to_path_buf(),
                source: source.into(),
            }
        } else {
            LoadError::Malformed {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Errors that can occur when loading a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The descriptor file was not found.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The descriptor file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// The descriptor path.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// The content is not a valid descriptor.
    ///
    /// This covers syntax errors, missing required fields, and fields of the
    /// wrong type.
    #[error("malformed descriptor {}", path.display())]
    Malformed {
        /// The descriptor path.
        path: PathBuf,
        /// The parse error, naming the offending field where possible.
        source: serde_json::Error,
    },
}
