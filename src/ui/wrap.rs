//! Word wrapping with a continuation prefix.

use console::measure_text_width;

/// Wrap `text` at `width` columns, joining lines with `line_break`.
///
/// Lines break at spaces only; a word longer than `width` stays whole on
/// its own line. Newlines already in `text` are kept as breaks and also
/// receive `line_break`, so continuation prefixes line up.
///
/// # Example
///
/// ```
/// use reqcheck::ui::wordwrap;
///
/// assert_eq!(
///     wordwrap("The quick brown fox", 10, "\n   > "),
///     "The quick\n   > brown fox"
/// );
/// ```
pub fn wordwrap(text: &str, width: usize, line_break: &str) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(text.len());

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push_str(line_break);
        }
        wrap_line(line.trim_end_matches('\r'), width, line_break, &mut out);
    }

    out
}

fn wrap_line(line: &str, width: usize, line_break: &str, out: &mut String) {
    let mut column = 0;

    for (i, word) in line.split(' ').enumerate() {
        let word_width = measure_text_width(word);

        if i == 0 {
            column = word_width;
        } else if column + 1 + word_width > width {
            out.push_str(line_break);
            column = word_width;
        } else {
            out.push(' ');
            column += 1 + word_width;
        }

        out.push_str(word);
    }
}
