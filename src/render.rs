//! Terminal rendering of tokenized lines
//!
//! Writes a line with ANSI styling through crossterm, for terminal
//! previews and hosts without their own renderer.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{self, Attribute, ContentStyle, Print, PrintStyledContent, StyledContent};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::error::Result;
use crate::syntax::{Color, Style, Theme, Token};

/// Display columns `[start, end)` covered by a token
pub fn column_range(text: &str, token: &Token) -> (usize, usize) {
    let start = UnicodeWidthStr::width(&text[..token.start]);
    let width = UnicodeWidthStr::width(token.text(text));
    (start, start + width)
}

/// Write one styled line, clipped to `max_cols` display columns if given
///
/// Text not covered by any token is written unstyled.
pub fn render_line<W: Write>(
    out: &mut W,
    text: &str,
    tokens: &[Token],
    theme: &Theme,
    max_cols: Option<usize>,
) -> Result<()> {
    let mut col = 0;
    let mut pos = 0;

    for token in tokens {
        if token.start > pos {
            if !write_segment(out, &text[pos..token.start], Style::default(), &mut col, max_cols)? {
                return Ok(());
            }
        }
        let style = theme.style_for(token.kind);
        if !write_segment(out, token.text(text), style, &mut col, max_cols)? {
            return Ok(());
        }
        pos = token.end;
    }
    if pos < text.len() {
        write_segment(out, &text[pos..], Style::default(), &mut col, max_cols)?;
    }
    Ok(())
}

/// Returns false once the column limit has been reached
fn write_segment<W: Write>(
    out: &mut W,
    segment: &str,
    style: Style,
    col: &mut usize,
    max_cols: Option<usize>,
) -> Result<bool> {
    let remaining = max_cols.map_or(usize::MAX, |max| max.saturating_sub(*col));
    if remaining == 0 {
        return Ok(false);
    }
    let visible = truncate_to_width(segment, remaining);
    *col += UnicodeWidthStr::width(visible);

    if style.is_default() {
        queue!(out, Print(visible))?;
    } else {
        queue!(out, PrintStyledContent(StyledContent::new(content_style(style), visible)))?;
    }
    Ok(visible.len() == segment.len())
}

/// Longest prefix of `s` that fits in `max_width` columns
fn truncate_to_width(s: &str, max_width: usize) -> &str {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(1);
        if width + ch_width > max_width {
            return &s[..idx];
        }
        width += ch_width;
    }
    s
}

fn content_style(style: Style) -> ContentStyle {
    let mut content = ContentStyle::new();
    content.foreground_color = terminal_color(style.fg);
    content.background_color = terminal_color(style.bg);
    if style.bold {
        content.attributes.set(Attribute::Bold);
    }
    if style.italic {
        content.attributes.set(Attribute::Italic);
    }
    if style.underline {
        content.attributes.set(Attribute::Underlined);
    }
    if style.reverse {
        content.attributes.set(Attribute::Reverse);
    }
    content
}

fn terminal_color(color: Color) -> Option<style::Color> {
    let mapped = match color {
        Color::Default => return None,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    };
    Some(mapped)
}
