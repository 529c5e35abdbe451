//! Editing-behavior metadata
//!
//! Static data an editor uses for comment toggling, bracket matching and
//! auto-closing. None of it affects tokenizing.

use std::collections::HashSet;

use crate::error::{HighlightError, Result};

/// An (open, close) character pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharPair {
    pub open: char,
    pub close: char,
}

impl CharPair {
    pub const fn new(open: char, close: char) -> Self {
        Self { open, close }
    }
}

/// Comment, bracket and auto-pair configuration for a language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Line comment marker
    pub line_comment: String,
    /// Pairs used for bracket matching
    pub brackets: Vec<CharPair>,
    /// Pairs whose closer is inserted when the opener is typed
    pub auto_closing_pairs: Vec<CharPair>,
    /// Pairs that wrap a selection when the opener is typed
    pub surrounding_pairs: Vec<CharPair>,
}

const SHELL_BRACKETS: [CharPair; 3] = [
    CharPair::new('{', '}'),
    CharPair::new('[', ']'),
    CharPair::new('(', ')'),
];

const SHELL_PAIRS: [CharPair; 6] = [
    CharPair::new('{', '}'),
    CharPair::new('[', ']'),
    CharPair::new('(', ')'),
    CharPair::new('"', '"'),
    CharPair::new('\'', '\''),
    CharPair::new('`', '`'),
];

/// Editor configuration for shell scripts
pub fn shell_editor_config() -> EditorConfig {
    EditorConfig {
        line_comment: "#".to_string(),
        brackets: SHELL_BRACKETS.to_vec(),
        auto_closing_pairs: SHELL_PAIRS.to_vec(),
        surrounding_pairs: SHELL_PAIRS.to_vec(),
    }
}

impl EditorConfig {
    /// Check the configuration is unambiguous
    ///
    /// Brackets must have distinct open and close characters and no two
    /// brackets may share a closer. No list may contain the same opener twice.
    pub fn validate(&self) -> Result<()> {
        if self.line_comment.trim().is_empty() {
            return Err(HighlightError::InvalidPair("empty line comment marker".to_string()));
        }
        let mut closers = HashSet::new();
        for pair in &self.brackets {
            if pair.open == pair.close {
                return Err(HighlightError::InvalidPair(format!(
                    "bracket '{}' opens and closes with the same character",
                    pair.open
                )));
            }
            if !closers.insert(pair.close) {
                return Err(HighlightError::InvalidPair(format!(
                    "duplicate closer '{}' in brackets",
                    pair.close
                )));
            }
        }
        for (name, pairs) in [
            ("brackets", &self.brackets),
            ("auto-closing pairs", &self.auto_closing_pairs),
            ("surrounding pairs", &self.surrounding_pairs),
        ] {
            let mut seen = HashSet::new();
            for pair in pairs {
                if !seen.insert(pair.open) {
                    return Err(HighlightError::InvalidPair(format!(
                        "duplicate opener '{}' in {}",
                        pair.open, name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Closer to auto-insert after typing `open`
    pub fn auto_close_for(&self, open: char) -> Option<char> {
        closing_for(&self.auto_closing_pairs, open)
    }

    /// Closer to wrap a selection with after typing `open`
    pub fn surround_close_for(&self, open: char) -> Option<char> {
        closing_for(&self.surrounding_pairs, open)
    }

    /// Counterpart of a bracket character, in either direction
    pub fn matching_bracket(&self, ch: char) -> Option<char> {
        self.brackets.iter().find_map(|pair| {
            if pair.open == ch {
                Some(pair.close)
            } else if pair.close == ch {
                Some(pair.open)
            } else {
                None
            }
        })
    }

    /// Comment or uncomment a line
    ///
    /// The marker goes after the indentation. An existing marker is
    /// removed together with one following space.
    pub fn toggle_line_comment(&self, line: &str) -> String {
        let marker = self.line_comment.as_str();
        let body_start = line.len() - line.trim_start().len();
        let (indent, body) = line.split_at(body_start);

        match body.strip_prefix(marker) {
            Some(rest) => {
                let rest = rest.strip_prefix(' ').unwrap_or(rest);
                format!("{}{}", indent, rest)
            }
            None => format!("{}{} {}", indent, marker, body),
        }
    }
}

fn closing_for(pairs: &[CharPair], open: char) -> Option<char> {
    pairs.iter().find(|pair| pair.open == open).map(|pair| pair.close)
}
