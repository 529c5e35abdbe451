//! Syntax highlighting module
//!
//! This module provides the shell tokenizer rule table and the pieces
//! around it:
//! - Token kinds, styles and themes
//! - Rule lists per state and the state stack carried between lines
//! - Editing metadata (comments, brackets, auto-closing pairs)
//! - Language detection and per-document caching

mod style;
mod tokens;
mod state;
mod rules;
mod language;
mod editor_config;
mod manager;
mod builtin;

pub use style::{Color, Style, Theme};
pub use tokens::{Token, TokenKind};
pub use state::{LineState, State, Transition};
pub use rules::{Classify, Rule, RuleMatch, TagAction};
pub use language::{BracketDef, LanguageDefinition, LineTokens};
pub use editor_config::{shell_editor_config, CharPair, EditorConfig};
pub use manager::{HighlightCache, SyntaxManager};
pub use builtin::{all_languages, shell_language, shell_language_with, BUILTINS, KEYWORDS, SHELL};
