//! shell-highlight - syntax highlighting rules for shell scripts
//!
//! Tokenizes shell source one line at a time into classified spans and
//! carries a state stack from line to line, so quoted strings, parameter
//! expansions and heredocs highlight correctly across lines.
//!
//! ```
//! use shell_highlight::{LineState, TokenKind, SHELL};
//!
//! let line = "echo $HOME";
//! let result = SHELL.tokenize_line(line, &LineState::root());
//! assert_eq!(result.tokens[0].kind, TokenKind::Builtin);
//! assert!(result.end_state.is_root());
//! ```

pub mod config;
pub mod error;
pub mod render;
pub mod syntax;

pub use config::HighlightConfig;
pub use error::{HighlightError, Result};
pub use syntax::{
    shell_editor_config, shell_language, EditorConfig, LanguageDefinition, LineState, LineTokens,
    State, SyntaxManager, Token, TokenKind, SHELL,
};
