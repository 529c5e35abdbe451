//! Token kinds for shell highlighting
//!
//! This module defines the classifications the rule table assigns to
//! spans of shell source, their editor-facing labels and their default
//! visual styles.

use super::style::{Color, Style};

/// Classification assigned to a span of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unclassified text (plain words, fallback characters)
    Default,
    /// Runs of whitespace
    White,
    /// Shebang line (#!/bin/sh)
    Metatag,
    /// Comment line
    Comment,
    /// Shell keywords (if, then, done, ...)
    Keyword,
    /// Well-known commands (echo, grep, ...)
    Builtin,
    /// Quote characters and quoted text
    String,
    /// Heredoc operator (<<, <<-, <<<)
    HeredocOperator,
    /// Heredoc tag word
    Heredoc,
    /// Quotes around a heredoc tag
    HeredocDelimiter,
    /// Parameter expansions ($name, ${...})
    Variable,
    /// Positional parameters ($1)
    VariablePredefined,
    /// Operator runs and expansion punctuation
    Delimiter,
    /// { and }
    Bracket,
    /// ( and )
    Parenthesis,
    /// [ and ]
    Square,
    /// Command flags (-v, --force)
    Attribute,
    /// Integer literals
    Number,
    /// Float literals
    NumberFloat,
    /// Hex literals
    NumberHex,
}

impl TokenKind {
    /// All token kinds, in declaration order
    pub const ALL: [TokenKind; 20] = [
        TokenKind::Default,
        TokenKind::White,
        TokenKind::Metatag,
        TokenKind::Comment,
        TokenKind::Keyword,
        TokenKind::Builtin,
        TokenKind::String,
        TokenKind::HeredocOperator,
        TokenKind::Heredoc,
        TokenKind::HeredocDelimiter,
        TokenKind::Variable,
        TokenKind::VariablePredefined,
        TokenKind::Delimiter,
        TokenKind::Bracket,
        TokenKind::Parenthesis,
        TokenKind::Square,
        TokenKind::Attribute,
        TokenKind::Number,
        TokenKind::NumberFloat,
        TokenKind::NumberHex,
    ];

    /// Base label of this kind, without the language postfix
    ///
    /// Labels are dotted so an editor theme can match on a prefix
    /// (`number` also covers `number.hex`).
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Default => "",
            TokenKind::White => "white",
            TokenKind::Metatag => "metatag",
            TokenKind::Comment => "comment",
            TokenKind::Keyword => "keyword",
            TokenKind::Builtin => "type.identifier",
            TokenKind::String => "string",
            TokenKind::HeredocOperator => "constants",
            TokenKind::Heredoc => "string.heredoc",
            TokenKind::HeredocDelimiter => "string.heredoc.delimiter",
            TokenKind::Variable => "variable",
            TokenKind::VariablePredefined => "variable.predefined",
            TokenKind::Delimiter => "delimiter",
            TokenKind::Bracket => "delimiter.bracket",
            TokenKind::Parenthesis => "delimiter.parenthesis",
            TokenKind::Square => "delimiter.square",
            TokenKind::Attribute => "attribute.name",
            TokenKind::Number => "number",
            TokenKind::NumberFloat => "number.float",
            TokenKind::NumberHex => "number.hex",
        }
    }

    /// Parse a token kind from its base label (for TOML loading)
    ///
    /// The default kind is spelled `default` here since its label is empty.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "default" {
            return Some(TokenKind::Default);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|kind| *kind != TokenKind::Default && kind.name() == name)
    }

    /// Full label with a language postfix appended (`keyword.shell`)
    pub fn label(&self, postfix: &str) -> String {
        match self {
            TokenKind::Default => String::new(),
            _ => format!("{}{}", self.name(), postfix),
        }
    }

    /// Get the default style for this token kind
    pub fn default_style(&self) -> Style {
        match self {
            TokenKind::Default | TokenKind::White => Style::default(),
            TokenKind::Metatag => Style::fg(Color::BrightMagenta),
            TokenKind::Comment => Style::fg(Color::BrightBlack).with_italic(),
            TokenKind::Keyword => Style::fg(Color::Magenta).with_bold(),
            TokenKind::Builtin => Style::fg(Color::Yellow),
            TokenKind::String => Style::fg(Color::Green),
            TokenKind::HeredocOperator => Style::fg(Color::BrightRed),
            TokenKind::Heredoc => Style::fg(Color::Green).with_bold(),
            TokenKind::HeredocDelimiter => Style::fg(Color::Green),
            TokenKind::Variable => Style::fg(Color::Cyan),
            TokenKind::VariablePredefined => Style::fg(Color::BrightCyan),
            TokenKind::Delimiter => Style::fg(Color::BrightWhite),
            TokenKind::Bracket | TokenKind::Parenthesis | TokenKind::Square => {
                Style::fg(Color::White)
            }
            TokenKind::Attribute => Style::fg(Color::BrightBlue),
            TokenKind::Number | TokenKind::NumberFloat | TokenKind::NumberHex => {
                Style::fg(Color::BrightYellow)
            }
        }
    }
}

/// A classified span of a single line
///
/// Offsets are byte offsets into the line text and always fall on
/// character boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Byte offset where this token starts (inclusive)
    pub start: usize,
    /// Byte offset where this token ends (exclusive)
    pub end: usize,
    /// Classification of the covered text
    pub kind: TokenKind,
}

impl Token {
    /// Create a new token
    pub fn new(start: usize, end: usize, kind: TokenKind) -> Self {
        Self { start, end, kind }
    }

    /// The text this token covers within `line`
    pub fn text<'a>(&self, line: &'a str) -> &'a str {
        &line[self.start..self.end]
    }

    /// Get the length of this token in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if token is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        assert!(!TokenKind::Comment.default_style().is_default());
        assert!(!TokenKind::Keyword.default_style().is_default());
        assert!(!TokenKind::Variable.default_style().is_default());
        assert!(TokenKind::Default.default_style().is_default());
        assert!(TokenKind::White.default_style().is_default());
    }

    #[test]
    fn test_from_name_roundtrip() {
        for kind in TokenKind::ALL {
            if kind == TokenKind::Default {
                continue;
            }
            assert_eq!(TokenKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TokenKind::from_name("default"), Some(TokenKind::Default));
    }

    #[test]
    fn test_from_name_invalid() {
        assert_eq!(TokenKind::from_name("Keyword"), None);
        assert_eq!(TokenKind::from_name(""), None);
        assert_eq!(TokenKind::from_name("number.octal"), None);
    }

    #[test]
    fn test_label_postfix() {
        assert_eq!(TokenKind::Keyword.label(".shell"), "keyword.shell");
        assert_eq!(TokenKind::NumberHex.label(".shell"), "number.hex.shell");
        assert_eq!(TokenKind::Default.label(".shell"), "");
    }

    #[test]
    fn test_token_text() {
        let line = "echo hi";
        let token = Token::new(5, 7, TokenKind::Default);
        assert_eq!(token.text(line), "hi");
        assert_eq!(token.len(), 2);
        assert!(!token.is_empty());
    }
}
