use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use tracing::instrument;

use crate::render::tree::{walk, WalkError};

/// A fully rendered documentation page.
///
/// The page is assembled in memory before anything is written, so a failure
/// part-way through a library never leaves a truncated file behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    lines: Vec<String>,
}

impl Page {
    /// Renders the page for the library at `dir`.
    ///
    /// The page opens with a front matter block carrying `id` and `title`,
    /// followed by the walk of `dir` at depth zero.
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the library cannot be walked.
    #[instrument(level = "debug", skip(dir), fields(dir = %dir.display()))]
    pub fn build(dir: &Path, id: &str, title: &str) -> Result<Self, WalkError> {
        let mut lines = front_matter(id, title);
        lines.extend(walk(0, dir)?);
        Ok(Self { lines })
    }

    /// The page elements, in output order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Writes every element followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        for line in &self.lines {
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }
        writer.flush()
    }

    /// The exact bytes [`Page::write`] produces.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for line in &self.lines {
            bytes.extend_from_slice(line.as_bytes());
            bytes.push(b'\n');
        }
        bytes
    }

    /// Writes the page to `file_path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to.
    pub fn save_to_path(&self, file_path: &Path) -> io::Result<()> {
        let file = File::create(file_path)?;
        let mut writer = BufWriter::new(file);
        self.write(&mut writer)
    }
}

fn front_matter(id: &str, title: &str) -> Vec<String> {
    vec![
        "---".to_string(),
        format!("id: {id}"),
        format!("title: {title}"),
        "---".to_string(),
    ]
}
