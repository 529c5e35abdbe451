//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that coordinates language
//! detection, highlighting, and per-document caching of line states.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::builtin;
use super::language::LanguageDefinition;
use super::state::LineState;
use super::tokens::Token;
use crate::config::HighlightConfig;
use crate::error::Result;

/// Per-document highlighting cache
#[derive(Debug, Default)]
pub struct HighlightCache {
    /// Language for this document (None if no highlighting)
    pub language: Option<String>,
    /// State at the end of each line
    line_states: Vec<LineState>,
    /// Cached tokens per line (None = not computed or edited)
    line_tokens: Vec<Option<Vec<Token>>>,
    /// First line that needs recomputation
    invalid_from: usize,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language for this document
    pub fn set_language(&mut self, language: Option<String>) {
        self.language = language;
        self.invalidate_all();
    }

    /// Mark a line as edited
    ///
    /// Later lines keep their tokens until re-tokenizing shows that the
    /// state flowing into them changed.
    pub fn invalidate_from(&mut self, line: usize) {
        self.invalid_from = self.invalid_from.min(line);
        if let Some(tokens) = self.line_tokens.get_mut(line) {
            *tokens = None;
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.invalid_from = 0;
        self.line_states.clear();
        self.line_tokens.clear();
    }

    /// End state of a line, if it has been computed
    pub fn line_state(&self, line: usize) -> Option<&LineState> {
        if line < self.invalid_from {
            self.line_states.get(line)
        } else {
            None
        }
    }

    /// Make the cache match a document of `line_count` lines
    ///
    /// A change in line count means lines shifted, so nothing from the
    /// first invalid line onwards can be trusted.
    fn fit(&mut self, line_count: usize) {
        if self.line_tokens.len() != line_count {
            let keep = self.invalid_from.min(line_count);
            self.line_states.truncate(keep);
            self.line_tokens.truncate(keep);
            self.line_states.resize(line_count, LineState::default());
            self.line_tokens.resize(line_count, None);
            self.invalid_from = keep;
        }
    }

    /// Re-tokenize invalid lines and return tokens for every line
    fn refresh(&mut self, lang: &LanguageDefinition, lines: &[&str]) -> Vec<Vec<Token>> {
        self.fit(lines.len());

        let start = self.invalid_from.min(lines.len());
        let mut state = match start {
            0 => LineState::root(),
            n => self.line_states[n - 1].clone(),
        };

        let mut retokenized = 0;
        for (idx, line) in lines.iter().enumerate().skip(start) {
            let result = lang.tokenize_line(line, &state);
            let converged = result.end_state == self.line_states[idx];
            state = result.end_state;
            self.line_states[idx] = state.clone();
            self.line_tokens[idx] = Some(result.tokens);
            retokenized += 1;

            if converged && self.line_tokens[idx + 1..].iter().all(Option::is_some) {
                break;
            }
        }
        self.invalid_from = lines.len();
        debug!(start, retokenized, lines = lines.len(), "refreshed highlight cache");

        self.line_tokens
            .iter()
            .map(|tokens| tokens.clone().unwrap_or_default())
            .collect()
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    /// Loaded language definitions
    languages: HashMap<String, LanguageDefinition>,
    /// Extension to language name mapping
    extension_map: HashMap<String, String>,
    /// Shebang interpreter to language name mapping
    interpreter_map: HashMap<String, String>,
    /// Per-document caches (document id -> cache)
    caches: HashMap<usize, HighlightCache>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a new syntax manager with built-in languages
    pub fn new() -> Result<Self> {
        let mut manager = Self::empty();
        for lang in builtin::all_languages()? {
            manager.add_language(lang);
        }
        Ok(manager)
    }

    /// Create a manager whose shell table includes configured words
    pub fn with_config(config: &HighlightConfig) -> Result<Self> {
        let mut manager = Self::empty();
        manager.add_language(builtin::shell_language_with(config)?);
        manager.enabled = config.enabled;
        Ok(manager)
    }

    fn empty() -> Self {
        Self {
            languages: HashMap::new(),
            extension_map: HashMap::new(),
            interpreter_map: HashMap::new(),
            caches: HashMap::new(),
            enabled: true,
        }
    }

    /// Add a language definition
    pub fn add_language(&mut self, lang: LanguageDefinition) {
        let name = lang.name.clone();
        for ext in &lang.extensions {
            self.extension_map.insert(ext.to_lowercase(), name.clone());
        }
        for interpreter in &lang.interpreters {
            self.interpreter_map.insert(interpreter.clone(), name.clone());
        }
        debug!("Registered language {}", name);
        self.languages.insert(name, lang);
    }

    /// Detect language from filename
    pub fn detect_language(&self, filename: &Path) -> Option<&str> {
        let ext = filename.extension()?.to_str()?.to_lowercase();
        self.extension_map.get(&ext).map(|s| s.as_str())
    }

    /// Detect language from a `#!` first line
    ///
    /// Handles both `#!/bin/bash` and `#!/usr/bin/env bash`.
    pub fn detect_from_shebang(&self, first_line: &str) -> Option<&str> {
        let command = first_line.strip_prefix("#!")?.trim();
        let mut words = command.split_whitespace();
        let mut program = words.next()?.rsplit('/').next()?;
        if program == "env" {
            program = words.find(|w| !w.starts_with('-'))?;
        }
        self.interpreter_map.get(program).map(|s| s.as_str())
    }

    /// Get a language definition by name
    pub fn get_language(&self, name: &str) -> Option<&LanguageDefinition> {
        self.languages.get(name)
    }

    /// Get or create a cache for a document
    pub fn get_cache(&mut self, doc: usize) -> &mut HighlightCache {
        self.caches.entry(doc).or_default()
    }

    /// Remove cache for a document (when it is closed)
    pub fn remove_cache(&mut self, doc: usize) {
        self.caches.remove(&doc);
    }

    /// Set language for a document from its filename, falling back to
    /// its first line
    pub fn set_document_language(
        &mut self,
        doc: usize,
        filename: Option<&Path>,
        first_line: Option<&str>,
    ) {
        let lang_name = filename
            .and_then(|f| self.detect_language(f))
            .or_else(|| first_line.and_then(|l| self.detect_from_shebang(l)))
            .map(|s| s.to_string());
        self.get_cache(doc).set_language(lang_name);
    }

    /// Invalidate cache from a line onwards
    pub fn invalidate_from(&mut self, doc: usize, line: usize) {
        if let Some(cache) = self.caches.get_mut(&doc) {
            debug!(doc, line, "invalidating highlight cache");
            cache.invalidate_from(line);
        }
    }

    /// Tokens for every line of a document
    ///
    /// Only lines from the first invalid one are re-tokenized, stopping
    /// once end states match the cached ones again. Returns empty token
    /// lists when highlighting is off or no language is set.
    pub fn highlight_document(&mut self, doc: usize, lines: &[&str]) -> Vec<Vec<Token>> {
        if !self.enabled {
            return vec![Vec::new(); lines.len()];
        }

        let cache = self.caches.entry(doc).or_default();
        let lang = match cache.language.as_ref().and_then(|name| self.languages.get(name)) {
            Some(lang) => lang,
            None => return vec![Vec::new(); lines.len()],
        };

        cache.refresh(lang, lines)
    }

    /// List available languages
    pub fn list_languages(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.languages.keys().map(|s| s.as_str()).collect();
        names.sort();
        names
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}
