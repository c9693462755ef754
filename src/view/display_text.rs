//! Turning raw line text into something safe to put on a terminal row
//!
//! Log files carry tabs, escape sequences and other control bytes. Writing
//! them verbatim would move the terminal cursor or change colors, so every
//! line goes through [`escape`] before the horizontal offset and width cut
//! are applied.

use unicode_width::UnicodeWidthChar;

/// Display width of a single character; control and zero-width characters
/// take no columns
#[inline]
pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Replace characters a terminal would interpret.
///
/// Tabs expand to the next multiple of `tab_width`. ASCII control
/// characters become caret notation (`^[` for ESC, `^?` for DEL) and C1
/// controls become U+FFFD.
pub fn escape(text: &str, tab_width: usize) -> String {
    let tab_width = tab_width.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0;

    for c in text.chars() {
        match c {
            '\t' => {
                let spaces = tab_width - column % tab_width;
                out.extend(std::iter::repeat(' ').take(spaces));
                column += spaces;
            }
            '\u{0}'..='\u{1f}' | '\u{7f}' => {
                out.push('^');
                out.push(char::from(c as u8 ^ 0x40));
                column += 2;
            }
            '\u{80}'..='\u{9f}' => {
                out.push(char::REPLACEMENT_CHARACTER);
                column += 1;
            }
            _ => {
                out.push(c);
                column += char_width(c);
            }
        }
    }

    out
}

/// Skip `left_column` characters and keep what fits in `width` columns.
///
/// A wide character that would straddle the right edge is left out.
pub fn slice_columns(text: &str, left_column: usize, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    for c in text.chars().skip(left_column) {
        let w = char_width(c);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }

    out
}

/// Escape `text` and cut it to the visible part of a row
pub fn display_line(text: &str, left_column: usize, width: usize, tab_width: usize) -> String {
    slice_columns(&escape(text, tab_width), left_column, width)
}
