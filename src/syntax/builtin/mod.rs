//! Built-in language definitions
//!
//! The shell table is built once and shared; every tokenizing call only
//! reads it.

mod shell;

use lazy_static::lazy_static;

use super::language::LanguageDefinition;
use crate::config::HighlightConfig;
use crate::error::Result;

pub use shell::{shell_language, BUILTINS, KEYWORDS};

lazy_static! {
    /// Shared shell rule table with the default word sets
    pub static ref SHELL: LanguageDefinition =
        shell_language().expect("built-in shell rules are valid patterns");
}

/// Build the shell table with the extra words from a configuration
pub fn shell_language_with(config: &HighlightConfig) -> Result<LanguageDefinition> {
    let mut lang = shell_language()?;
    lang.add_keywords(config.extra_keywords.iter().map(String::as_str));
    lang.add_builtins(config.extra_builtins.iter().map(String::as_str));
    Ok(lang)
}

/// Get all built-in language definitions
pub fn all_languages() -> Result<Vec<LanguageDefinition>> {
    Ok(vec![shell_language()?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::tokens::TokenKind;

    #[test]
    fn test_shared_table() {
        assert_eq!(SHELL.name, "Shell");
        assert_eq!(SHELL.token_postfix, ".shell");
        assert_eq!(SHELL.classify_identifier("echo"), TokenKind::Builtin);
    }

    #[test]
    fn test_config_extends_word_sets() {
        let config = HighlightConfig {
            extra_keywords: vec!["case".to_string()],
            extra_builtins: vec!["Docker".to_string()],
            ..Default::default()
        };
        let lang = shell_language_with(&config).unwrap();
        assert_eq!(lang.classify_identifier("case"), TokenKind::Keyword);
        assert_eq!(lang.classify_identifier("docker"), TokenKind::Builtin);
        assert_eq!(SHELL.classify_identifier("case"), TokenKind::Default);
    }

    #[test]
    fn test_all_languages() {
        let languages = all_languages().unwrap();
        assert_eq!(languages.len(), 1);
        assert!(languages[0].extensions.iter().any(|e| e == "sh"));
    }
}
