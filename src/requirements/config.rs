//! Requirements derived from runtime configuration values.
//!
//! A [`ConfigCheck`] names a configuration key and an [`Evaluation`] rule.
//! Evaluating it against a [`ConfigSource`] yields a plain
//! [`Requirement`]; the key and rule are not kept afterwards.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use reqcheck::requirements::{ConfigCheck, IniValue};
//!
//! let mut ini = HashMap::new();
//! ini.insert("short_open_tag".to_string(), "1".to_string());
//!
//! let req = ConfigCheck::expect("short_open_tag", false)
//!     .evaluate(&ini, true)
//!     .unwrap();
//! assert!(!req.is_fulfilled());
//! assert_eq!(req.test_message(), "short_open_tag should be disabled in php.ini");
//!
//! let req = ConfigCheck::predicate("memory_limit", |v: &IniValue| v.as_int() != 0)
//!     .test_message("memory_limit must be set")
//!     .help_html("Set <strong>memory_limit</strong>.")
//!     .evaluate(&ini, false)
//!     .unwrap();
//! assert!(!req.is_fulfilled());
//! ```

use std::collections::HashMap;
use std::fmt;

use crate::error::{ReqcheckError, Result};

use super::requirement::Requirement;

/// A configuration value as observed in the runtime.
///
/// `Absent` stands for a key the runtime does not know at all, which is
/// distinct from a key set to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IniValue {
    /// The key is not registered in the runtime.
    #[default]
    Absent,
    /// The raw string value of the key.
    Value(String),
}

impl IniValue {
    /// Whether the key is unknown to the runtime.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The raw value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Value(v) => Some(v),
        }
    }

    /// Loose boolean reading of the value.
    ///
    /// Absent, empty, `"0"` and the usual spellings of "off" are false;
    /// anything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::Value(v) => {
                let v = v.trim();
                !(v.is_empty()
                    || v == "0"
                    || v.eq_ignore_ascii_case("off")
                    || v.eq_ignore_ascii_case("false")
                    || v.eq_ignore_ascii_case("no")
                    || v.eq_ignore_ascii_case("none"))
            }
        }
    }

    /// Loose integer reading of the value: the leading (optionally signed)
    /// digits, or 0 when there are none.
    pub fn as_int(&self) -> i64 {
        self.as_str().map(leading_int).unwrap_or(0)
    }

    /// Loose equality against a boolean target.
    pub fn loosely_equals(&self, target: bool) -> bool {
        self.is_truthy() == target
    }
}

impl From<Option<String>> for IniValue {
    fn from(value: Option<String>) -> Self {
        value.map(Self::Value).unwrap_or(Self::Absent)
    }
}

/// Parse the leading integer of `s` the way a lenient cast would.
pub(crate) fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return 0;
    }
    // only overflow can fail here
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    if negative {
        -value
    } else {
        value
    }
}

/// A source of runtime configuration values.
pub trait ConfigSource {
    /// Look up the current value of `key`.
    fn ini_get(&self, key: &str) -> IniValue;
}

impl ConfigSource for HashMap<String, String> {
    fn ini_get(&self, key: &str) -> IniValue {
        self.get(key).cloned().into()
    }
}

/// How a configuration value is judged.
pub enum Evaluation<'a> {
    /// The value must loosely equal this boolean.
    Expect(bool),
    /// The value must satisfy this predicate.
    Predicate(Box<dyn Fn(&IniValue) -> bool + 'a>),
}

impl<'a> Evaluation<'a> {
    /// Wrap a closure as a predicate rule.
    pub fn predicate(f: impl Fn(&IniValue) -> bool + 'a) -> Self {
        Self::Predicate(Box::new(f))
    }

    /// Apply the rule to an observed value.
    pub fn evaluate(&self, value: &IniValue) -> bool {
        match self {
            Self::Expect(target) => value.loosely_equals(*target),
            Self::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for Evaluation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expect(target) => f.debug_tuple("Expect").field(target).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// Declaration of a requirement on a configuration value.
#[derive(Debug)]
pub struct ConfigCheck<'a> {
    name: String,
    evaluation: Evaluation<'a>,
    approve_absence: bool,
    test_message: Option<String>,
    help_html: Option<String>,
    help_text: Option<String>,
}

impl<'a> ConfigCheck<'a> {
    /// Create a check with the given rule.
    pub fn new(name: impl Into<String>, evaluation: Evaluation<'a>) -> Self {
        Self {
            name: name.into(),
            evaluation,
            approve_absence: false,
            test_message: None,
            help_html: None,
            help_text: None,
        }
    }

    /// Require the value to be enabled (`true`) or disabled (`false`).
    pub fn expect(name: impl Into<String>, target: bool) -> Self {
        Self::new(name, Evaluation::Expect(target))
    }

    /// Require the value to satisfy `f`. Test message and help text are mandatory.
    pub fn predicate(name: impl Into<String>, f: impl Fn(&IniValue) -> bool + 'a) -> Self {
        Self::new(name, Evaluation::predicate(f))
    }

    /// Treat a key unknown to the runtime as fulfilling the check.
    ///
    /// Useful for settings removed in later runtime versions or belonging
    /// to an extension that is not installed.
    pub fn approve_absence(mut self) -> Self {
        self.approve_absence = true;
        self
    }

    /// Set the test message.
    pub fn test_message(mut self, message: impl Into<String>) -> Self {
        self.test_message = Some(message.into());
        self
    }

    /// Set the help text with markup.
    pub fn help_html(mut self, help: impl Into<String>) -> Self {
        self.help_html = Some(help.into());
        self
    }

    /// Set the plain help text instead of deriving it from the markup.
    pub fn help_text(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    /// The configuration key this check reads.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Read the value from `source` and turn the declaration into a requirement.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfigRequirement` when a predicate rule lacks a test
    /// message or help text.
    pub fn evaluate(self, source: &dyn ConfigSource, optional: bool) -> Result<Requirement> {
        let value = source.ini_get(&self.name);

        let (test_message, help_html) = match &self.evaluation {
            Evaluation::Predicate(_) => match (self.test_message, self.help_html) {
                (Some(test), Some(help)) => (test, help),
                _ => {
                    return Err(ReqcheckError::InvalidConfigRequirement { name: self.name });
                }
            },
            Evaluation::Expect(target) => {
                let test = self.test_message.unwrap_or_else(|| {
                    format!(
                        "{} {} be {} in php.ini",
                        self.name,
                        if optional { "should" } else { "must" },
                        if *target { "enabled" } else { "disabled" }
                    )
                });
                let help = self.help_html.unwrap_or_else(|| {
                    format!(
                        r##"Set <strong>{}</strong> to <strong>{}</strong> in php.ini<a href="#phpini">*</a>."##,
                        self.name,
                        if *target { "on" } else { "off" }
                    )
                });
                (test, help)
            }
        };

        let fulfilled =
            self.evaluation.evaluate(&value) || (self.approve_absence && value.is_absent());
        tracing::debug!(key = %self.name, ?value, fulfilled, "evaluated config check");

        Ok(Requirement::new(
            fulfilled,
            test_message,
            help_html,
            self.help_text,
            optional,
        ))
    }
}
