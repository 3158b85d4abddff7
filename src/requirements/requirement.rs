//! A single pass/fail requirement.
//!
//! A `Requirement` is fixed at construction: whether it is fulfilled,
//! what was checked, how to fix it, and whether failing it is fatal.

/// A single checked condition with its remediation help.
///
/// Mandatory requirements fail the run; optional ones (recommendations)
/// only produce warnings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    fulfilled: bool,
    test_message: String,
    help_html: String,
    help_text: String,
    optional: bool,
}

impl Requirement {
    /// Create a requirement.
    ///
    /// When `help_text` is `None` it is derived from `help_html` by
    /// stripping markup tags.
    pub fn new(
        fulfilled: bool,
        test_message: impl Into<String>,
        help_html: impl Into<String>,
        help_text: Option<String>,
        optional: bool,
    ) -> Self {
        let help_html = help_html.into();
        let help_text = help_text.unwrap_or_else(|| strip_tags(&help_html));
        Self {
            fulfilled,
            test_message: test_message.into(),
            help_html,
            help_text,
            optional,
        }
    }

    /// Create a mandatory requirement with help text derived from the markup.
    pub fn mandatory(
        fulfilled: bool,
        test_message: impl Into<String>,
        help_html: impl Into<String>,
    ) -> Self {
        Self::new(fulfilled, test_message, help_html, None, false)
    }

    /// Create an optional recommendation with help text derived from the markup.
    pub fn recommendation(
        fulfilled: bool,
        test_message: impl Into<String>,
        help_html: impl Into<String>,
    ) -> Self {
        Self::new(fulfilled, test_message, help_html, None, true)
    }

    /// Whether the checked condition holds.
    pub fn is_fulfilled(&self) -> bool {
        self.fulfilled
    }

    /// Short description of what was checked.
    pub fn test_message(&self) -> &str {
        &self.test_message
    }

    /// Remediation help, possibly containing markup.
    pub fn help_html(&self) -> &str {
        &self.help_html
    }

    /// Remediation help as plain text.
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    /// Whether this is a recommendation rather than a mandatory requirement.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Remove markup tags from `html`, keeping the text between them.
///
/// Everything from a `<` up to the matching `>` is dropped, including an
/// unterminated tag at the end of the input. A `<` followed by whitespace
/// (or ending the input) is plain text.
pub fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut quote: Option<char> = None;
    let mut chars = html.chars().peekable();

    while let Some(c) = chars.next() {
        if in_tag {
            match (quote, c) {
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '>') => in_tag = false,
                (None, _) => {}
            }
        } else if c == '<' && chars.peek().is_some_and(|next| !next.is_whitespace()) {
            in_tag = true;
        } else {
            text.push(c);
        }
    }

    text
}
