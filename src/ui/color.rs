//! Terminal color capability detection.
//!
//! Detection tries a fixed list of hints and the first conclusive one wins:
//!
//! 1. `NO_COLOR` set: no colors
//! 2. `TERM_PROGRAM=Hyper`: colors
//! 3. On Windows: virtual terminal support, `ANSICON`, `ConEmuANSI=ON` or
//!    `TERM=xterm`
//! 4. Whether stdout is a terminal
//!
//! [`ColorSupport`] runs detection for the real stdout once and keeps the
//! answer.

use std::sync::OnceLock;

/// Facts about the output stream that detection needs besides the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamInfo {
    /// Running on Windows.
    pub windows: bool,
    /// The Windows console accepts ANSI sequences.
    pub vt_support: bool,
    /// The stream is attached to a terminal.
    pub is_terminal: bool,
}

impl StreamInfo {
    /// Inspect the process's stdout.
    pub fn stdout() -> Self {
        let term = console::Term::stdout();
        Self {
            windows: cfg!(windows),
            vt_support: cfg!(windows) && term.features().colors_supported(),
            is_terminal: term.is_term(),
        }
    }
}

/// Decide whether colors should be used, reading variables through `env`.
pub fn detect_color_support(env: impl Fn(&str) -> Option<String>, stream: StreamInfo) -> bool {
    if env("NO_COLOR").is_some_and(|v| !v.is_empty()) {
        return false;
    }

    if env("TERM_PROGRAM").as_deref() == Some("Hyper") {
        return true;
    }

    if stream.windows {
        return stream.vt_support
            || env("ANSICON").is_some()
            || env("ConEmuANSI").as_deref() == Some("ON")
            || env("TERM").as_deref() == Some("xterm");
    }

    stream.is_terminal
}

/// Lazily detected color capability.
#[derive(Debug, Default)]
pub struct ColorSupport {
    detected: OnceLock<bool>,
}

impl ColorSupport {
    /// Create an undetected capability.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the process's stdout supports colors, detected on first call.
    pub fn stdout(&self) -> bool {
        self.get_or_detect(|| {
            detect_color_support(|key| std::env::var(key).ok(), StreamInfo::stdout())
        })
    }

    /// The cached answer, running `detect` only when nothing is cached yet.
    pub fn get_or_detect(&self, detect: impl FnOnce() -> bool) -> bool {
        *self.detected.get_or_init(|| {
            let supported = detect();
            tracing::debug!(supported, "detected color support");
            supported
        })
    }
}

/// How the user asked colors to be handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize, serde::Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Use colors when the terminal supports them.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorChoice {
    /// Resolve the choice against the detected capability.
    pub fn resolve(self, detect: impl FnOnce() -> bool) -> bool {
        match self {
            Self::Auto => detect(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn unix(is_terminal: bool) -> StreamInfo {
        StreamInfo {
            windows: false,
            vt_support: false,
            is_terminal,
        }
    }

    fn windows() -> StreamInfo {
        StreamInfo {
            windows: true,
            vt_support: false,
            is_terminal: true,
        }
    }

    #[test]
    fn terminal_enables_colors() {
        assert!(detect_color_support(env(&[]), unix(true)));
        assert!(!detect_color_support(env(&[]), unix(false)));
    }

    #[test]
    fn no_color_wins_over_everything() {
        assert!(!detect_color_support(
            env(&[("NO_COLOR", "1"), ("TERM_PROGRAM", "Hyper")]),
            unix(true)
        ));
    }

    #[test]
    fn empty_no_color_is_ignored() {
        assert!(detect_color_support(env(&[("NO_COLOR", "")]), unix(true)));
    }

    #[test]
    fn hyper_enables_colors_without_terminal() {
        assert!(detect_color_support(
            env(&[("TERM_PROGRAM", "Hyper")]),
            unix(false)
        ));
    }

    #[test]
    fn windows_needs_a_hint() {
        assert!(!detect_color_support(env(&[]), windows()));
        assert!(detect_color_support(env(&[("ANSICON", "")]), windows()));
        assert!(detect_color_support(env(&[("ConEmuANSI", "ON")]), windows()));
        assert!(!detect_color_support(env(&[("ConEmuANSI", "OFF")]), windows()));
        assert!(detect_color_support(env(&[("TERM", "xterm")]), windows()));
    }

    #[test]
    fn windows_vt_support() {
        let stream = StreamInfo {
            vt_support: true,
            ..windows()
        };
        assert!(detect_color_support(env(&[]), stream));
    }

    #[test]
    fn detection_runs_once() {
        let support = ColorSupport::new();
        assert!(support.get_or_detect(|| true));
        assert!(support.get_or_detect(|| false));
    }

    #[test]
    fn each_value_detects_independently() {
        assert!(!ColorSupport::new().get_or_detect(|| false));
        let support = ColorSupport::new();
        assert_eq!(support.stdout(), support.stdout());
    }

    #[test]
    fn choice_resolution() {
        assert!(ColorChoice::Always.resolve(|| false));
        assert!(!ColorChoice::Never.resolve(|| true));
        assert!(ColorChoice::Auto.resolve(|| true));
        assert!(!ColorChoice::Auto.resolve(|| false));
    }

    #[test]
    fn choice_parses_from_yaml() {
        let choice: ColorChoice = serde_yaml::from_str("never").unwrap();
        assert_eq!(choice, ColorChoice::Never);
    }
}
