use std::{path::PathBuf, process};

mod terminal;

use clap::ArgAction;
use compdoc::{Config, Generator, Mode, Report, Status};
use terminal::Colorize;
use tracing::instrument;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Continue with the remaining libraries when one fails
    #[arg(long)]
    keep_going: bool,

    /// Compare pages with the existing files instead of writing them
    ///
    /// Exits with a non-zero status if any page is missing or out of date.
    #[arg(long)]
    check: bool,

    /// Directory containing one subdirectory per component library
    input: PathBuf,

    /// Directory the generated pages are written to
    output: PathBuf,

    /// Site navigation file (accepted for compatibility, not read)
    sidebars: PathBuf,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);
        self.generate()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }

    #[instrument(level = "debug", skip(self))]
    fn generate(self) -> anyhow::Result<()> {
        let config = self
            .config
            .as_deref()
            .map(Config::load)
            .transpose()
            .map_err(anyhow::Error::msg)?
            .unwrap_or_default();
        tracing::debug!("Ignoring sidebars file {}", self.sidebars.display());

        let mode = if self.check { Mode::Check } else { Mode::Write };
        let report = Generator::new(self.output)
            .with_config(config)
            .with_mode(mode)
            .keep_going(self.keep_going)
            .run(&self.input)?;

        Self::print_summary(&report, mode);
        report.ensure_complete()?;

        if !report.is_clean() {
            process::exit(1);
        }

        Ok(())
    }

    fn print_summary(report: &Report, mode: Mode) {
        let count = |status| {
            report
                .pages
                .iter()
                .filter(|page| page.status == status)
                .count()
        };

        match mode {
            Mode::Write => {
                let written = count(Status::Written);
                println!("{}", format!("Wrote {written} pages").success());
            }
            Mode::Check => {
                let unchanged = count(Status::Unchanged);
                println!("{}", format!("{unchanged} pages up to date").success());
                for page in report.stale() {
                    println!(
                        "{} {}",
                        "stale:".warning(),
                        page.path.display().to_string().dim()
                    );
                }
            }
        }

        for failure in &report.failures {
            let chain: Vec<_> = anyhow::Chain::new(&failure.error)
                .map(ToString::to_string)
                .collect();
            eprintln!(
                "{} {}: {}",
                "failed:".warning(),
                failure.library,
                chain.join(": ")
            );
        }
    }
}
