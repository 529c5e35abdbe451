//! Configuration file support
//!
//! Loads settings from ~/.shell-highlight.toml (or
//! %USERPROFILE%\.shell-highlight.toml on Windows)
//!
//! Example:
//! ```toml
//! [highlight]
//! enabled = true
//! extra_keywords = ["case", "select"]
//! extra_builtins = ["docker"]
//!
//! [styles]
//! keyword = "magenta bold"
//! "string.heredoc" = "green italic"
//! ```

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use toml::{Table, Value};
use tracing::warn;

use crate::error::{HighlightError, Result};
use crate::syntax::{Style, Theme, TokenKind};

/// Configuration settings
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightConfig {
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
    /// Words added to the keyword set
    pub extra_keywords: Vec<String>,
    /// Words added to the builtin command set
    pub extra_builtins: Vec<String>,
    /// Style overrides per token kind
    pub styles: HashMap<TokenKind, Style>,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            extra_keywords: Vec::new(),
            extra_builtins: Vec::new(),
            styles: HashMap::new(),
        }
    }
}

impl HighlightConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(".shell-highlight.toml"))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(".shell-highlight.toml"))
        }
    }

    /// Load configuration from a file
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::from_toml_str(&contents),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load configuration from the default location
    pub fn load_default() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: Table = contents.parse()?;
        let mut config = Self::default();
        config.apply(&table)?;
        Ok(config)
    }

    /// Apply settings from a parsed TOML table
    fn apply(&mut self, table: &Table) -> Result<()> {
        for (key, value) in table {
            match key.as_str() {
                "highlight" => self.apply_highlight(expect_table(key, value)?)?,
                "styles" => self.apply_styles(expect_table(key, value)?)?,
                _ => warn!("Ignoring unknown configuration section '{}'", key),
            }
        }
        Ok(())
    }

    fn apply_highlight(&mut self, table: &Table) -> Result<()> {
        for (key, value) in table {
            match key.as_str() {
                "enabled" => {
                    self.enabled = value.as_bool().ok_or_else(|| type_error(key, "a boolean"))?;
                }
                "extra_keywords" => self.extra_keywords = string_list(key, value)?,
                "extra_builtins" => self.extra_builtins = string_list(key, value)?,
                _ => warn!("Ignoring unknown highlight setting '{}'", key),
            }
        }
        Ok(())
    }

    fn apply_styles(&mut self, table: &Table) -> Result<()> {
        for (key, value) in table {
            let kind = TokenKind::from_name(key)
                .ok_or_else(|| HighlightError::UnknownTokenKind(key.clone()))?;
            let desc = value.as_str().ok_or_else(|| type_error(key, "a string"))?;
            self.styles.insert(kind, Style::parse(desc)?);
        }
        Ok(())
    }

    /// Build the theme described by the style overrides
    pub fn theme(&self) -> Theme {
        let mut theme = Theme::new();
        for (kind, style) in &self.styles {
            theme.set(*kind, *style);
        }
        theme
    }

    /// Render the word-list settings back to TOML
    ///
    /// Styles are not written back; they are kept as the user wrote them.
    pub fn to_toml_string(&self) -> Result<String> {
        let words =
            |list: &[String]| Value::Array(list.iter().cloned().map(Value::String).collect());

        let mut highlight = Table::new();
        highlight.insert("enabled".to_string(), Value::Boolean(self.enabled));
        highlight.insert("extra_keywords".to_string(), words(self.extra_keywords.as_slice()));
        highlight.insert("extra_builtins".to_string(), words(self.extra_builtins.as_slice()));

        let mut root = Table::new();
        root.insert("highlight".to_string(), Value::Table(highlight));
        toml::to_string(&root).map_err(|e| HighlightError::Message(e.to_string()))
    }
}

fn expect_table<'a>(key: &str, value: &'a Value) -> Result<&'a Table> {
    value.as_table().ok_or_else(|| type_error(key, "a table"))
}

fn string_list(key: &str, value: &Value) -> Result<Vec<String>> {
    let items = value.as_array().ok_or_else(|| type_error(key, "an array of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| type_error(key, "an array of strings"))
        })
        .collect()
}

fn type_error(key: &str, expected: &str) -> HighlightError {
    HighlightError::Message(format!("Setting '{}' must be {}", key, expected))
}
