//! Batch generation of one page per library
//!
//! The [`Generator`] discovers the libraries under an input root and renders
//! each one to `<output>/<Library_Name><suffix>.md`. Libraries are processed
//! one at a time, in sorted order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::instrument;

use crate::{
    domain::Config,
    render::{Page, WalkError},
    storage::{discover, DiscoverError, Library},
};

/// Renders every library under an input root into an output directory.
#[derive(Debug, Clone)]
pub struct Generator {
    output: PathBuf,
    config: Config,
    mode: Mode,
    keep_going: bool,
}

/// What the generator does with each rendered page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Write the page, replacing any existing file.
    #[default]
    Write,
    /// Compare the page with the existing file and write nothing.
    Check,
}

impl Generator {
    /// Creates a generator writing into `output` with the default
    /// configuration.
    #[must_use]
    pub fn new(output: PathBuf) -> Self {
        Self {
            output,
            config: Config::default(),
            mode: Mode::default(),
            keep_going: false,
        }
    }

    /// Sets the configuration.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Sets the mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether a failing library should stop the whole run (the default) or
    /// be recorded while the remaining libraries are still processed.
    #[must_use]
    pub const fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }

    /// Generates a page for every library under `input`.
    ///
    /// # Errors
    ///
    /// Fails if `input` is not a readable directory, or if the output
    /// directory cannot be created. Unless [`Generator::keep_going`] is set,
    /// also fails on the first library that cannot be generated. Pages
    /// written before that point are kept.
    #[instrument(level = "info", skip(self, input), fields(input = %input.display()))]
    pub fn run(&self, input: &Path) -> Result<Report, GenerateError> {
        let libraries = discover(input, &self.config)?;
        tracing::info!("Found {} libraries", libraries.len());

        if self.mode == Mode::Write {
            fs::create_dir_all(&self.output).map_err(|source| GenerateError::CreateOutput {
                path: self.output.clone(),
                source,
            })?;
        }

        let mut report = Report::default();
        for library in &libraries {
            match self.generate(library) {
                Ok(outcome) => report.pages.push(outcome),
                Err(error) if self.keep_going => {
                    tracing::warn!("Failed to generate {}: {error}", library.name());
                    report.failures.push(Failure {
                        library: library.name().to_string(),
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }

        Ok(report)
    }

    /// Generates the page for a single library.
    ///
    /// # Errors
    ///
    /// Fails if the library cannot be walked, or if the page cannot be
    /// written (or, in check mode, the existing page cannot be read).
    #[instrument(level = "debug", skip(self, library), fields(library = library.name()))]
    pub fn generate(&self, library: &Library) -> Result<PageOutcome, GenerateError> {
        let file_name = library.file_name(self.config.page_suffix());
        let path = self.output.join(&file_name);

        let page = Page::build(library.path(), &file_name, &library.title()).map_err(|source| {
            GenerateError::Walk {
                library: library.name().to_string(),
                source,
            }
        })?;

        let status = match self.mode {
            Mode::Write => {
                page.save_to_path(&path)
                    .map_err(|source| GenerateError::Write {
                        path: path.clone(),
                        source,
                    })?;
                tracing::info!("Wrote {}", path.display());
                Status::Written
            }
            Mode::Check => compare(&page, &path)?,
        };

        Ok(PageOutcome {
            library: library.name().to_string(),
            path,
            status,
        })
    }
}

fn compare(page: &Page, path: &Path) -> Result<Status, GenerateError> {
    let existing = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("{} does not exist yet", path.display());
            return Ok(Status::Stale);
        }
        Err(source) => {
            return Err(GenerateError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if existing == page.to_bytes() {
        tracing::debug!("{} is up to date", path.display());
        Ok(Status::Unchanged)
    } else {
        Ok(Status::Stale)
    }
}

/// The result of a generation run.
#[derive(Debug, Default)]
pub struct Report {
    /// One entry per successfully rendered library, in processing order.
    pub pages: Vec<PageOutcome>,
    /// Libraries that failed. Only populated in keep-going mode.
    pub failures: Vec<Failure>,
}

impl Report {
    /// Pages whose file is missing or differs from the rendered output.
    pub fn stale(&self) -> impl Iterator<Item = &PageOutcome> {
        self.pages
            .iter()
            .filter(|page| page.status == Status::Stale)
    }

    /// Whether every library rendered and no page is stale.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.stale().next().is_none()
    }

    /// Turns recorded failures into an error.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Failed`] if any library failed.
    pub fn ensure_complete(&self) -> Result<(), GenerateError> {
        match self.failures.len() {
            0 => Ok(()),
            count => Err(GenerateError::Failed { count }),
        }
    }
}

/// The outcome for one library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOutcome {
    /// The library name.
    pub library: String,
    /// The page file.
    pub path: PathBuf,
    /// What happened to the page file.
    pub status: Status,
}

/// What happened to a page file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The page was written.
    Written,
    /// Check mode: the existing file matches.
    Unchanged,
    /// Check mode: the file is missing or differs.
    Stale,
}

/// A library that could not be generated.
#[derive(Debug)]
pub struct Failure {
    /// The library name.
    pub library: String,
    /// Why it failed.
    pub error: GenerateError,
}

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The input root could not be listed.
    #[error(transparent)]
    Discover(#[from] DiscoverError),

    /// The output directory could not be created.
    #[error("failed to create output directory {}", path.display())]
    CreateOutput {
        /// The output directory.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A library could not be walked.
    #[error("failed to generate library '{library}'")]
    Walk {
        /// The library name.
        library: String,
        /// The underlying walk error.
        source: WalkError,
    },

    /// A page could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// The page file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// An existing page could not be read for comparison.
    #[error("failed to read {}", path.display())]
    Read {
        /// The page file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Keep-going mode: one or more libraries failed.
    #[error("{count} libraries failed")]
    Failed {
        /// How many libraries failed.
        count: usize,
    },
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::storage::{LoadError, DESCRIPTOR_FILE};

    fn component(path: &Path, descriptor: &str) {
        fs::create_dir_all(path).unwrap();
        fs::write(path.join(DESCRIPTOR_FILE), descriptor).unwrap();
    }

    /// An input root with `Foo/Bar` and a `Subflows` library that must be
    /// skipped.
    fn sample_input() -> TempDir {
        let input = TempDir::new().unwrap();
        component(
            &input.path().join("Foo").join("Bar"),
            r#"{"description":"Bar does X","properties":[{"label":"P1","description":"d","type":"string"}]}"#,
        );
        component(
            &input.path().join("Subflows").join("Flow"),
            r#"{"description":"never rendered"}"#,
        );
        input
    }

    #[test]
    fn end_to_end_page() {
        let input = sample_input();
        let output = TempDir::new().unwrap();

        let report = Generator::new(output.path().to_path_buf())
            .run(input.path())
            .unwrap();

        assert_eq!(report.pages.len(), 1);
        assert_eq!(report.pages[0].status, Status::Written);

        let text = fs::read_to_string(output.path().join("Foo_comp.md")).unwrap();
        let expected = [
            "---",
            "id: Foo_comp.md",
            "title: Foo Components",
            "---",
            "## Bar",
            "",
            "Bar does X.",
            "",
            "### Properties",
            "",
            "<table>",
            "<thead>",
            "<tr class=\"header\">",
            "<th>Name</th>",
            "<th>Description</th>",
            "<th>Mandatory</th>",
            "<th>Type</th>",
            "<th>Min</th>",
            "<th>Max</th>",
            "<th>Default</th>",
            "<th>Choices</th>",
            "</tr>",
            "</thead>",
            "<tbody>",
            "<tr class=\"even\">",
            "<th>P1</th>",
            "<th>d</th>",
            "<th>no</th>",
            "<th>string</th>",
            "<th></th>",
            "<th></th>",
            "<th></th>",
            "<th></th>",
            "</tr>",
            "</tbody>",
            "</table>",
            "",
            "",
        ]
        .join("\n");
        assert_eq!(text, expected);
    }

    #[test]
    fn subflows_never_visited() {
        let input = sample_input();
        // A broken descriptor would abort the run if Subflows were walked.
        fs::write(
            input.path().join("Subflows").join("Flow").join(DESCRIPTOR_FILE),
            "{ broken",
        )
        .unwrap();
        let output = TempDir::new().unwrap();

        Generator::new(output.path().to_path_buf())
            .run(input.path())
            .unwrap();

        assert!(!output.path().join("Subflows_comp.md").exists());
    }

    #[test]
    fn generation_is_idempotent() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let generator = Generator::new(output.path().to_path_buf());
        let page = output.path().join("Foo_comp.md");

        generator.run(input.path()).unwrap();
        let first = fs::read(&page).unwrap();
        generator.run(input.path()).unwrap();
        let second = fs::read(&page).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn output_directory_is_created() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let nested = output.path().join("docs").join("components");

        Generator::new(nested.clone()).run(input.path()).unwrap();

        assert!(nested.join("Foo_comp.md").is_file());
    }

    #[test]
    fn library_names_are_sanitized() {
        let input = TempDir::new().unwrap();
        component(
            &input.path().join("Stream Processing").join("Filter"),
            r#"{"description":"Filters."}"#,
        );
        let output = TempDir::new().unwrap();

        Generator::new(output.path().to_path_buf())
            .run(input.path())
            .unwrap();

        let text = fs::read_to_string(output.path().join("Stream_Processing_comp.md")).unwrap();
        assert!(text.starts_with(
            "---\nid: Stream_Processing_comp.md\ntitle: Stream Processing Components\n---\n"
        ));
    }

    #[test]
    fn missing_input_fails_before_any_output() {
        let output = TempDir::new().unwrap();
        let target = output.path().join("out");

        let error = Generator::new(target.clone())
            .run(&output.path().join("missing"))
            .unwrap_err();

        assert!(matches!(
            error,
            GenerateError::Discover(DiscoverError::NoInput(_))
        ));
        assert!(!target.exists());
    }

    #[test]
    fn failure_aborts_the_batch_by_default() {
        let input = TempDir::new().unwrap();
        component(&input.path().join("A").join("Good"), r#"{"description":"a"}"#);
        component(&input.path().join("B").join("Bad"), r#"{"links":{}}"#);
        component(&input.path().join("C").join("Good"), r#"{"description":"c"}"#);
        let output = TempDir::new().unwrap();

        let error = Generator::new(output.path().to_path_buf())
            .run(input.path())
            .unwrap_err();

        let GenerateError::Walk { library, source } = error else {
            panic!("expected a walk error");
        };
        assert_eq!(library, "B");
        assert!(matches!(source, WalkError::Load(LoadError::Malformed { .. })));
        assert!(output.path().join("A_comp.md").exists());
        assert!(!output.path().join("B_comp.md").exists());
        assert!(!output.path().join("C_comp.md").exists());
    }

    #[test]
    fn keep_going_records_failures() {
        let input = TempDir::new().unwrap();
        component(&input.path().join("A").join("Good"), r#"{"description":"a"}"#);
        component(&input.path().join("B").join("Bad"), r#"{"links":{}}"#);
        component(&input.path().join("C").join("Good"), r#"{"description":"c"}"#);
        let output = TempDir::new().unwrap();

        let report = Generator::new(output.path().to_path_buf())
            .keep_going(true)
            .run(input.path())
            .unwrap();

        let generated: Vec<_> = report.pages.iter().map(|p| p.library.as_str()).collect();
        assert_eq!(generated, ["A", "C"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].library, "B");
        assert!(!report.is_clean());
        assert!(!output.path().join("B_comp.md").exists());
    }

    #[test]
    fn keep_going_failures_become_an_error() {
        let input = TempDir::new().unwrap();
        component(&input.path().join("A").join("Bad"), r#"{"links":{}}"#);
        component(&input.path().join("B").join("Bad"), "{ broken");
        component(&input.path().join("C").join("Good"), r#"{"description":"c"}"#);
        let output = TempDir::new().unwrap();

        let report = Generator::new(output.path().to_path_buf())
            .keep_going(true)
            .run(input.path())
            .unwrap();

        let error = report.ensure_complete().unwrap_err();
        assert!(matches!(error, GenerateError::Failed { count: 2 }));
        assert_eq!(error.to_string(), "2 libraries failed");
    }

    #[test]
    fn complete_report_has_no_error() {
        let input = sample_input();
        let output = TempDir::new().unwrap();

        let report = Generator::new(output.path().to_path_buf())
            .keep_going(true)
            .run(input.path())
            .unwrap();

        assert!(report.ensure_complete().is_ok());
    }

    #[test]
    fn check_mode_detects_stale_pages() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let checker = Generator::new(output.path().to_path_buf()).with_mode(Mode::Check);

        let report = checker.run(input.path()).unwrap();
        assert_eq!(report.pages[0].status, Status::Stale);
        assert!(!output.path().join("Foo_comp.md").exists());

        Generator::new(output.path().to_path_buf())
            .run(input.path())
            .unwrap();
        let report = checker.run(input.path()).unwrap();
        assert_eq!(report.pages[0].status, Status::Unchanged);
        assert!(report.is_clean());

        component(
            &input.path().join("Foo").join("Baz"),
            r#"{"description":"new"}"#,
        );
        let report = checker.run(input.path()).unwrap();
        assert_eq!(report.stale().count(), 1);
    }

    #[test]
    fn custom_page_suffix() {
        let input = sample_input();
        let output = TempDir::new().unwrap();
        let config: Config = toml::from_str("_version = \"1\"\npage_suffix = \"_components\"").unwrap();

        Generator::new(output.path().to_path_buf())
            .with_config(config)
            .run(input.path())
            .unwrap();

        let text = fs::read_to_string(output.path().join("Foo_components.md")).unwrap();
        assert!(text.contains("id: Foo_components.md\n"));
    }
}
