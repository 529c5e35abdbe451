//! Style types for token rendering
//!
//! Colors and text attributes an editor applies to classified tokens,
//! plus the `Theme` that maps token kinds to styles.

use std::collections::HashMap;

use super::tokens::TokenKind;
use crate::error::{HighlightError, Result};

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    /// Parse a color name such as `green` or `bright_black`
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright_black" | "gray" | "grey" => Color::BrightBlack,
            "bright_red" => Color::BrightRed,
            "bright_green" => Color::BrightGreen,
            "bright_yellow" => Color::BrightYellow,
            "bright_blue" => Color::BrightBlue,
            "bright_magenta" => Color::BrightMagenta,
            "bright_cyan" => Color::BrightCyan,
            "bright_white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Bold text
    pub bold: bool,
    /// Italic text
    pub italic: bool,
    /// Underlined text
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set italic
    pub fn with_italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Builder: set underline
    pub fn with_underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Builder: set reverse
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a style description like `"magenta bold"` or `"on_blue"`
    ///
    /// Words are a foreground color, an `on_`-prefixed background color,
    /// or one of `bold`, `italic`, `underline`, `reverse`.
    pub fn parse(desc: &str) -> Result<Self> {
        let mut style = Style::default();
        for word in desc.split_whitespace() {
            let word = word.to_lowercase();
            match word.as_str() {
                "bold" => style.bold = true,
                "italic" => style.italic = true,
                "underline" => style.underline = true,
                "reverse" => style.reverse = true,
                other => {
                    if let Some(bg) = other.strip_prefix("on_") {
                        style.bg = Color::from_name(bg)
                            .ok_or_else(|| HighlightError::InvalidStyle(desc.to_string()))?;
                    } else {
                        style.fg = Color::from_name(other)
                            .ok_or_else(|| HighlightError::InvalidStyle(desc.to_string()))?;
                    }
                }
            }
        }
        Ok(style)
    }
}

/// Mapping from token kinds to styles
///
/// Kinds without an explicit entry use `TokenKind::default_style`.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    overrides: HashMap<TokenKind, Style>,
}

impl Theme {
    /// Create a theme with only default styles
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the style for a token kind
    pub fn set(&mut self, kind: TokenKind, style: Style) {
        self.overrides.insert(kind, style);
    }

    /// Style to render a token kind with
    pub fn style_for(&self, kind: TokenKind) -> Style {
        self.overrides
            .get(&kind)
            .copied()
            .unwrap_or_else(|| kind.default_style())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_default() {
        let style = Style::default();
        assert!(style.is_default());
        assert_eq!(style.fg, Color::Default);
        assert_eq!(style.bg, Color::Default);
        assert!(!style.bold);
    }

    #[test]
    fn test_style_builders() {
        let style = Style::fg(Color::Red).with_bold().with_bg(Color::Blue);
        assert_eq!(style.fg, Color::Red);
        assert_eq!(style.bg, Color::Blue);
        assert!(style.bold);
        assert!(!style.is_default());
    }

    #[test]
    fn test_style_parse() {
        let style = Style::parse("bright_green bold on_black").unwrap();
        assert_eq!(style.fg, Color::BrightGreen);
        assert_eq!(style.bg, Color::Black);
        assert!(style.bold);
        assert!(!style.italic);

        assert!(Style::parse("").unwrap().is_default());
        assert!(matches!(Style::parse("purple"), Err(HighlightError::InvalidStyle(_))));
        assert!(matches!(Style::parse("on_nothing"), Err(HighlightError::InvalidStyle(_))));
    }

    #[test]
    fn test_theme_overrides() {
        let mut theme = Theme::new();
        assert_eq!(theme.style_for(TokenKind::Keyword), TokenKind::Keyword.default_style());

        theme.set(TokenKind::Keyword, Style::fg(Color::Red));
        assert_eq!(theme.style_for(TokenKind::Keyword), Style::fg(Color::Red));
        assert_eq!(theme.style_for(TokenKind::String), TokenKind::String.default_style());
    }
}
