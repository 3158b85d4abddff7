//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgAction, Parser};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::ui::ColorChoice;

/// Check that this machine can run Symfony projects.
#[derive(Debug, Parser)]
#[command(name = "reqcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory to check in addition to the runtime
    /// (defaults to the current directory when it holds a composer.json)
    pub dir: Option<PathBuf>,

    /// Show one line per check instead of a glyph (-v, -vv and -vvv are equivalent)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// PHP binary to probe
    #[arg(long, env = "REQCHECK_PHP", value_name = "BIN")]
    pub php: Option<String>,

    /// Read a JSON runtime snapshot instead of running PHP
    #[arg(long, value_name = "FILE")]
    pub runtime: Option<PathBuf>,

    /// Path to settings file (overrides default .reqcheck.yml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,

    /// When to use colors
    #[arg(long, value_enum, value_name = "WHEN")]
    pub color: Option<ColorChoice>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Whether per-check lines were requested.
    pub fn is_verbose(&self) -> bool {
        self.verbose > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_directory_and_verbosity() {
        let cli = Cli::try_parse_from(["reqcheck", "-vv", "/srv/app"]).unwrap();
        assert_eq!(cli.dir, Some(PathBuf::from("/srv/app")));
        assert_eq!(cli.verbose, 2);
        assert!(cli.is_verbose());
    }

    #[test]
    fn verbosity_levels_are_equivalent() {
        for flag in ["-v", "-vv", "-vvv", "--verbose"] {
            let cli = Cli::try_parse_from(["reqcheck", flag]).unwrap();
            assert!(cli.is_verbose(), "{flag}");
        }
        let cli = Cli::try_parse_from(["reqcheck"]).unwrap();
        assert!(!cli.is_verbose());
    }

    #[test]
    fn parses_color_choice() {
        let cli = Cli::try_parse_from(["reqcheck", "--color", "always"]).unwrap();
        assert_eq!(cli.color, Some(ColorChoice::Always));
        assert!(Cli::try_parse_from(["reqcheck", "--color", "sometimes"]).is_err());
    }

    #[test]
    fn no_color_conflicts_with_color() {
        let err = Cli::try_parse_from(["reqcheck", "--no-color", "--color", "always"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_runtime_snapshot() {
        let cli = Cli::try_parse_from(["reqcheck", "--runtime", "php.json", "--no-color"]).unwrap();
        assert_eq!(cli.runtime, Some(PathBuf::from("php.json")));
        assert!(cli.no_color);
    }

    #[test]
    fn parses_completions() {
        let cli = Cli::try_parse_from(["reqcheck", "--completions", "bash"]).unwrap();
        assert_eq!(cli.completions, Some(Shell::Bash));
    }
}
