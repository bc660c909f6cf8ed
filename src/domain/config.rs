use std::path::Path;

use serde::Deserialize;

/// Configuration for documentation generation.
///
/// Every field defaults to the conventional layout of a component library
/// tree, so an absent configuration file is the same as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "Versions")]
pub struct Config {
    /// Top-level directory names that are never turned into pages.
    ///
    /// Only the direct children of the input root are filtered. Nested
    /// directories with these names are rendered like any other.
    ignored_names: Vec<String>,

    /// Top-level name prefixes that are never turned into pages.
    ignored_prefixes: Vec<String>,

    /// Appended to the sanitized library name to form the page file stem.
    ///
    /// For example, with `_comp` the library `Foo Bar` becomes
    /// `Foo_Bar_comp.md`.
    page_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ignored_names: default_ignored_names(),
            ignored_prefixes: default_ignored_prefixes(),
            page_suffix: default_page_suffix(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Whether a top-level directory with this name is skipped.
    #[must_use]
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignored_names.iter().any(|ignored| ignored == name)
            || self
                .ignored_prefixes
                .iter()
                .any(|prefix| name.starts_with(prefix.as_str()))
    }

    /// Returns the suffix appended to page file stems.
    #[must_use]
    pub fn page_suffix(&self) -> &str {
        &self.page_suffix
    }
}

fn default_ignored_names() -> Vec<String> {
    vec!["Subflows".to_string()]
}

fn default_ignored_prefixes() -> Vec<String> {
    vec![".DS_Store".to_string()]
}

fn default_page_suffix() -> String {
    "_comp".to_string()
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format without breaking
/// existing files.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_ignored_names")]
        ignored_names: Vec<String>,

        #[serde(default = "default_ignored_prefixes")]
        ignored_prefixes: Vec<String>,

        #[serde(default = "default_page_suffix")]
        page_suffix: String,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                ignored_names,
                ignored_prefixes,
                page_suffix,
            } => Self {
                ignored_names,
                ignored_prefixes,
                page_suffix,
            },
        }
    }
}
