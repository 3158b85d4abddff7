//! Terminal rendering of a requirement collection.
//!
//! The report lists every mandatory requirement, then every recommendation,
//! as one glyph each (`.`, `E`, `W`) or, in verbose mode, one labeled line
//! each. A summary block and checklists of the failures follow. Only failed
//! mandatory requirements affect the exit code.

use std::io::{self, Write};
use std::path::Path;

use crate::requirements::{Requirement, RequirementCollection};

use super::theme::ReportTheme;
use super::wrap::wordwrap;

/// Default wrap column for help blocks.
pub const DEFAULT_LINE_WIDTH: usize = 70;

const REPORT_TITLE: &str = "Symfony Requirements Checker";

/// Outcome of a rendered report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOutcome {
    /// Wrapped help blocks of failed mandatory requirements.
    pub errors: Vec<String>,
    /// Wrapped help blocks of failed recommendations.
    pub warnings: Vec<String>,
}

impl ReportOutcome {
    /// Whether every mandatory requirement was met.
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Process exit code: 0 when every mandatory requirement was met, else 1.
    pub fn exit_code(&self) -> i32 {
        if self.passed() {
            0
        } else {
            1
        }
    }
}

/// Renders requirement reports.
#[derive(Debug, Clone)]
pub struct Reporter {
    theme: ReportTheme,
    verbose: bool,
    line_width: usize,
}

impl Reporter {
    /// Create a reporter. `colors` is the already resolved color capability.
    pub fn new(colors: bool, verbose: bool) -> Self {
        Self {
            theme: ReportTheme::for_colors(colors),
            verbose,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    /// Set the wrap column for help blocks.
    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Format the help block of a failed requirement, or `None` when it passed.
    pub fn error_message(&self, requirement: &Requirement) -> Option<String> {
        if requirement.is_fulfilled() {
            return None;
        }

        let test = wordwrap(
            requirement.test_message(),
            self.line_width.saturating_sub(3),
            "\n   ",
        );
        let help = wordwrap(
            requirement.help_text(),
            self.line_width.saturating_sub(5),
            "\n   > ",
        );
        Some(format!("{}\n   > {}\n", test, help))
    }

    /// Render the full report for `requirements` to `out`.
    ///
    /// `ini_path` is the configuration file the runtime loaded, if any.
    pub fn render(
        &self,
        out: &mut dyn Write,
        requirements: &RequirementCollection,
        ini_path: Option<&Path>,
    ) -> io::Result<ReportOutcome> {
        let t = &self.theme;
        let mut outcome = ReportOutcome::default();

        self.title(out, REPORT_TITLE, &t.title)?;

        writeln!(out, "> PHP is using the following php.ini file:")?;
        match ini_path {
            Some(path) => write!(out, "{}", t.green.apply_to(path.display()))?,
            None => write!(
                out,
                "{}",
                t.yellow
                    .apply_to("WARNING: No configuration file (php.ini) used by PHP!")
            )?,
        }
        write!(out, "\n\n")?;

        write!(out, "> Checking Symfony requirements:\n\n")?;

        for req in requirements.requirements() {
            match self.error_message(req) {
                Some(message) => {
                    self.item(out, req, "[ERROR] ", "E", &t.red)?;
                    outcome.errors.push(message);
                }
                None => self.item(out, req, "[OK] ", ".", &t.green)?,
            }
        }

        for req in requirements.recommendations() {
            match self.error_message(req) {
                Some(message) => {
                    self.item(out, req, "[WARN] ", "W", &t.yellow)?;
                    outcome.warnings.push(message);
                }
                None => self.item(out, req, "[OK] ", ".", &t.green)?,
            }
        }

        if outcome.passed() {
            self.block(out, &t.success, "OK", "Your system is ready to run Symfony projects")?;
        } else {
            self.block(out, &t.error, "ERROR", "Your system is not ready to run Symfony projects")?;
            self.title(out, "Fix the following mandatory requirements", &t.red)?;
            for message in &outcome.errors {
                writeln!(out, " * {}", message)?;
            }
        }

        if !outcome.warnings.is_empty() {
            self.title(out, "Optional recommendations to improve your setup", &t.yellow)?;
            for message in &outcome.warnings {
                writeln!(out, " * {}", message)?;
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "{}  The command console can use a different php.ini file",
            t.title.apply_to("Note")
        )?;
        writeln!(
            out,
            "{}  than the one used by your web server.",
            t.title.apply_to("~~~~")
        )?;
        writeln!(out, "      Please check that both the console and the web server")?;
        writeln!(out, "      are using the same PHP version and configuration.")?;
        writeln!(out)?;

        tracing::debug!(
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            "report rendered"
        );
        Ok(outcome)
    }

    fn item(
        &self,
        out: &mut dyn Write,
        req: &Requirement,
        label: &str,
        glyph: &str,
        style: &console::Style,
    ) -> io::Result<()> {
        if self.verbose {
            writeln!(out, "{}{}", style.apply_to(label), req.test_message())
        } else {
            write!(out, "{}", style.apply_to(glyph))
        }
    }

    fn title(&self, out: &mut dyn Write, title: &str, style: &console::Style) -> io::Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", style.apply_to(title))?;
        writeln!(out, "{}", style.apply_to("~".repeat(title.chars().count())))?;
        writeln!(out)
    }

    fn block(
        &self,
        out: &mut dyn Write,
        style: &console::Style,
        title: &str,
        message: &str,
    ) -> io::Result<()> {
        let message = format!(" {} ", message.trim());
        let width = message.chars().count();
        let heading = format!(" [{}]", title);

        write!(out, "\n\n")?;
        writeln!(out, "{}", style.apply_to(" ".repeat(width)))?;
        writeln!(out, "{}", style.apply_to(format!("{:<width$}", heading, width = width)))?;
        writeln!(out, "{}", style.apply_to(&message))?;
        writeln!(out, "{}", style.apply_to(" ".repeat(width)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(reporter: &Reporter, reqs: &RequirementCollection) -> (String, ReportOutcome) {
        let mut buf = Vec::new();
        let outcome = reporter
            .render(&mut buf, reqs, Some(Path::new("/etc/php/8.3/cli/php.ini")))
            .unwrap();
        (String::from_utf8(buf).unwrap(), outcome)
    }

    fn mixed() -> RequirementCollection {
        let mut reqs = RequirementCollection::new();
        reqs.add_requirement(true, "json_encode() must be available", "Install JSON.", None);
        reqs.add_requirement(
            false,
            "iconv() must be available",
            "Install and enable the <strong>iconv</strong> extension.",
            None,
        );
        reqs.add_recommendation(
            false,
            "intl extension should be available",
            "Install and enable the <strong>intl</strong> extension (used for validators).",
            None,
        );
        reqs.add_recommendation(true, "PDO should be installed", "Install PDO.", None);
        reqs
    }

    #[test]
    fn terse_glyphs_in_order() {
        let (out, _) = render(&Reporter::new(false, false), &mixed());
        assert!(out.contains("> Checking Symfony requirements:\n\n.EW.\n\n"));
    }

    #[test]
    fn verbose_lines() {
        let (out, _) = render(&Reporter::new(false, true), &mixed());
        assert!(out.contains("[OK] json_encode() must be available\n"));
        assert!(out.contains("[ERROR] iconv() must be available\n"));
        assert!(out.contains("[WARN] intl extension should be available\n"));
        assert!(out.contains("[OK] PDO should be installed\n"));
    }

    #[test]
    fn failed_mandatory_and_optional() {
        let (out, outcome) = render(&Reporter::new(false, false), &mixed());

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(out.contains(" [ERROR]"));
        assert!(out.contains(" Your system is not ready to run Symfony projects "));
        let heading = "Fix the following mandatory requirements";
        assert!(out.contains(&format!("{}\n{}\n", heading, "~".repeat(heading.len()))));
        assert!(out.contains(" * iconv() must be available\n   > Install and enable the iconv extension.\n"));
        assert!(out.contains("Optional recommendations to improve your setup\n"));
        assert!(out.contains(" * intl extension should be available\n"));
        assert_eq!(out.matches(" * ").count(), 2);
    }

    #[test]
    fn all_passing() {
        let mut reqs = RequirementCollection::new();
        reqs.add_requirement(true, "a", "help", None);
        reqs.add_recommendation(true, "b", "help", None);

        let (out, outcome) = render(&Reporter::new(false, false), &reqs);
        assert_eq!(outcome.exit_code(), 0);
        assert!(outcome.passed());
        assert!(out.contains(" [OK]"));
        assert!(out.contains(" Your system is ready to run Symfony projects "));
        assert!(!out.contains("Fix the following"));
        assert!(!out.contains("Optional recommendations"));
    }

    #[test]
    fn failed_recommendation_does_not_fail_the_run() {
        let mut reqs = RequirementCollection::new();
        reqs.add_requirement(true, "a", "help", None);
        reqs.add_recommendation(false, "b", "help b", None);

        let (out, outcome) = render(&Reporter::new(false, false), &reqs);
        assert_eq!(outcome.exit_code(), 0);
        assert!(out.contains("Your system is ready"));
        assert!(out.contains("Optional recommendations to improve your setup"));
    }

    #[test]
    fn summary_block_is_padded() {
        let mut reqs = RequirementCollection::new();
        reqs.add_requirement(true, "a", "help", None);
        let (out, _) = render(&Reporter::new(false, false), &reqs);

        let message = " Your system is ready to run Symfony projects ";
        let blank = " ".repeat(message.len());
        let heading = format!("{:<width$}", " [OK]", width = message.len());
        assert!(out.contains(&format!("\n\n{}\n{}\n{}\n{}\n", blank, heading, message, blank)));
    }

    #[test]
    fn ini_path_line() {
        let (out, _) = render(&Reporter::new(false, false), &mixed());
        assert!(out.contains("> PHP is using the following php.ini file:\n/etc/php/8.3/cli/php.ini\n\n"));

        let mut buf = Vec::new();
        Reporter::new(false, false)
            .render(&mut buf, &mixed(), None)
            .unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("WARNING: No configuration file (php.ini) used by PHP!"));
    }

    #[test]
    fn title_and_note() {
        let (out, _) = render(&Reporter::new(false, false), &mixed());
        let banner = format!("\n{}\n{}\n\n", REPORT_TITLE, "~".repeat(REPORT_TITLE.len()));
        assert!(out.starts_with(&banner));
        assert!(out.contains("Note  The command console can use a different php.ini file\n"));
        assert!(out.contains("~~~~  than the one used by your web server.\n"));
        assert!(out.ends_with("      are using the same PHP version and configuration.\n\n"));
    }

    #[test]
    fn error_message_wraps_with_prefixes() {
        let reporter = Reporter::new(false, false).with_line_width(30);
        let req = Requirement::mandatory(
            false,
            "xdebug.max_nesting_level should be above 100 in php.ini",
            "Set <strong>xdebug.max_nesting_level</strong> to e.g. 250 in php.ini.",
        );

        let message = reporter.error_message(&req).unwrap();
        assert_eq!(
            message,
            "xdebug.max_nesting_level\n   should be above 100 in\n   php.ini\n   > Set\n   > xdebug.max_nesting_level\n   > to e.g. 250 in php.ini.\n"
        );
    }

    #[test]
    fn fulfilled_requirement_has_no_error_message() {
        let reporter = Reporter::new(false, false);
        let req = Requirement::mandatory(true, "ok", "help");
        assert_eq!(reporter.error_message(&req), None);
    }

    #[test]
    fn colored_output_contains_ansi() {
        let (out, _) = render(&Reporter::new(true, false), &mixed());
        assert!(out.contains("\u{1b}[31mE"));
        assert!(out.contains("\u{1b}[33mW"));
    }

    #[test]
    fn plain_output_has_no_ansi() {
        let (out, _) = render(&Reporter::new(false, true), &mixed());
        assert!(!out.contains('\u{1b}'));
    }

    #[test]
    fn empty_collection_passes() {
        let (out, outcome) = render(&Reporter::new(false, false), &RequirementCollection::new());
        assert_eq!(outcome.exit_code(), 0);
        assert!(out.contains("> Checking Symfony requirements:\n\n\n\n"));
    }
}
