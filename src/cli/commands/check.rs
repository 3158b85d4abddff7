//! The requirements check.
//!
//! Probes the runtime once, builds the runtime requirement set, adds the
//! project set when a project directory applies, and renders the report.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::load_settings;
use crate::error::Result;
use crate::probe::{PhpProbe, RuntimeProbe, SnapshotProbe};
use crate::project::{is_project_root, ProjectLayout};
use crate::requirements::{project_requirements, runtime_requirements, RequirementCollection};
use crate::ui::{ColorSupport, Reporter, DEFAULT_LINE_WIDTH};

use super::dispatcher::{Command, CommandResult};

/// Options resolved from flags, environment and settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Project to check in addition to the runtime.
    pub project_dir: Option<PathBuf>,
    /// One line per check instead of glyphs.
    pub verbose: bool,
    /// Emit ANSI colors.
    pub colors: bool,
    /// Wrap column for help blocks.
    pub line_width: usize,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            project_dir: None,
            verbose: false,
            colors: false,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

/// The check command implementation.
pub struct CheckCommand {
    options: CheckOptions,
    probe: Box<dyn RuntimeProbe>,
}

impl CheckCommand {
    /// Create a check command with an explicit probe.
    pub fn new(options: CheckOptions, probe: Box<dyn RuntimeProbe>) -> Self {
        Self { options, probe }
    }

    /// Resolve options and the probe from the command line, running from `cwd`.
    ///
    /// `support` answers for `--color auto`.
    ///
    /// # Errors
    ///
    /// Fails when an explicit settings file is missing or any settings
    /// file is invalid.
    pub fn from_cli(cli: &Cli, cwd: &Path, support: &ColorSupport) -> Result<Self> {
        let settings = load_settings(cwd, cli.config.as_deref())?;

        let project_dir = match &cli.dir {
            Some(dir) => Some(cwd.join(dir)),
            None if is_project_root(cwd) => Some(cwd.to_path_buf()),
            None => None,
        };

        let probe: Box<dyn RuntimeProbe> = match &cli.runtime {
            Some(snapshot) => Box::new(SnapshotProbe::new(cwd.join(snapshot))),
            None => {
                let binary = settings.php_binary(cli.php.as_deref());
                Box::new(PhpProbe::new(binary).in_dir(probe_dir(project_dir.as_deref(), cwd)))
            }
        };

        let colors = if cli.no_color {
            false
        } else {
            cli.color
                .unwrap_or(settings.color)
                .resolve(|| support.stdout())
        };

        let options = CheckOptions {
            project_dir,
            verbose: cli.is_verbose(),
            colors,
            line_width: settings.line_width,
        };
        tracing::debug!(?options, "resolved check options");

        Ok(Self::new(options, probe))
    }

    /// The resolved options.
    pub fn options(&self) -> &CheckOptions {
        &self.options
    }

    /// Probe the runtime and build every applicable requirement.
    pub fn collect(&self) -> Result<(RequirementCollection, Option<PathBuf>)> {
        let info = self.probe.probe()?;
        let mut requirements = runtime_requirements(&info)?;

        if let Some(dir) = &self.options.project_dir {
            let layout = ProjectLayout::discover(dir);
            tracing::debug!(root = %layout.root.display(), "checking project");
            requirements.add_collection(&project_requirements(&info, &layout));
        }

        Ok((requirements, info.ini_path))
    }
}

/// Directory PHP runs from: the project when it exists, else `cwd`.
fn probe_dir<'a>(project_dir: Option<&'a Path>, cwd: &'a Path) -> &'a Path {
    match project_dir {
        Some(dir) if dir.is_dir() => dir,
        Some(dir) => {
            tracing::debug!(dir = %dir.display(), "project directory missing, probing from cwd");
            cwd
        }
        None => cwd,
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let (requirements, ini_path) = self.collect()?;

        let reporter = Reporter::new(self.options.colors, self.options.verbose)
            .with_line_width(self.options.line_width);
        let outcome = reporter.render(out, &requirements, ini_path.as_deref())?;

        if outcome.passed() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(outcome.exit_code()))
        }
    }
}
