//! Report styling.

use console::Style;

/// Styles used by the requirements report.
#[derive(Debug, Clone)]
pub struct ReportTheme {
    /// Failed mandatory requirements (red).
    pub red: Style,
    /// Passed checks and the loaded ini path (green).
    pub green: Style,
    /// Failed recommendations and warnings (yellow).
    pub yellow: Style,
    /// Failure summary block (white on red).
    pub error: Style,
    /// Success summary block (white on green).
    pub success: Style,
    /// Titles (blue).
    pub title: Style,
}

impl Default for ReportTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportTheme {
    /// Create the colored theme.
    ///
    /// Styling is forced on; callers decide beforehand whether colors apply.
    pub fn new() -> Self {
        let base = Style::new().force_styling(true);
        Self {
            red: base.clone().red(),
            green: base.clone().green(),
            yellow: base.clone().yellow(),
            error: base.clone().white().on_red(),
            success: base.clone().white().on_green(),
            title: base.blue(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        let base = Style::new().force_styling(false);
        Self {
            red: base.clone(),
            green: base.clone(),
            yellow: base.clone(),
            error: base.clone(),
            success: base.clone(),
            title: base,
        }
    }

    /// Pick the colored or plain theme.
    pub fn for_colors(colors: bool) -> Self {
        if colors {
            Self::new()
        } else {
            Self::plain()
        }
    }
}
