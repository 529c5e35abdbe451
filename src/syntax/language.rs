//! Language definitions for syntax highlighting
//!
//! A `LanguageDefinition` is an immutable rule table: one ordered rule
//! list per state, the keyword/builtin sets used to classify identifiers,
//! and the bracket table.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use super::rules::{Classify, Rule, RuleMatch};
use super::state::{LineState, State, Transition};
use super::tokens::{Token, TokenKind};

/// A bracket pair and the token kind both of its characters get
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketDef {
    pub open: char,
    pub close: char,
    pub kind: TokenKind,
}

/// Result of tokenizing a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens {
    /// Tokens covering the whole line, in order
    pub tokens: Vec<Token>,
    /// State at end of line (for next line)
    pub end_state: LineState,
}

/// A complete tokenizer rule table for one language
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    /// Language name (e.g., "Shell")
    pub name: String,
    /// File extensions (e.g., ["sh", "bash"])
    pub extensions: Vec<String>,
    /// Interpreter names recognised on a shebang line
    pub interpreters: Vec<String>,
    /// Decorative suffix appended to token labels (e.g., ".shell")
    pub token_postfix: String,
    /// Lowercased keyword set
    keywords: HashSet<String>,
    /// Lowercased builtin command set
    builtins: HashSet<String>,
    brackets: Vec<BracketDef>,
    states: HashMap<State, Vec<Rule>>,
}

impl LanguageDefinition {
    /// Create a new empty language definition
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            extensions: Vec::new(),
            interpreters: Vec::new(),
            token_postfix: String::new(),
            keywords: HashSet::new(),
            builtins: HashSet::new(),
            brackets: Vec::new(),
            states: HashMap::new(),
        }
    }

    /// Add a file extension
    pub fn add_extension(&mut self, ext: &str) {
        self.extensions.push(ext.to_string());
    }

    /// Add a shebang interpreter name
    pub fn add_interpreter(&mut self, name: &str) {
        self.interpreters.push(name.to_string());
    }

    /// Set the label postfix
    pub fn set_token_postfix(&mut self, postfix: &str) {
        self.token_postfix = postfix.to_string();
    }

    /// Add words to the keyword set
    pub fn add_keywords<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        self.keywords.extend(words.into_iter().map(|w| w.to_lowercase()));
    }

    /// Add words to the builtin command set
    pub fn add_builtins<'a>(&mut self, words: impl IntoIterator<Item = &'a str>) {
        self.builtins.extend(words.into_iter().map(|w| w.to_lowercase()));
    }

    /// Add a bracket pair
    pub fn add_bracket(&mut self, open: char, close: char, kind: TokenKind) {
        self.brackets.push(BracketDef { open, close, kind });
    }

    /// Bracket pairs, in declaration order
    pub fn brackets(&self) -> &[BracketDef] {
        &self.brackets
    }

    /// Set the ordered rule list for a state
    pub fn set_rules(&mut self, state: State, rules: Vec<Rule>) {
        self.states.insert(state, rules);
    }

    /// Ordered rule list for a state (empty if the state has none)
    pub fn rules_for(&self, state: State) -> &[Rule] {
        self.states.get(&state).map(|r| r.as_slice()).unwrap_or(&[])
    }

    /// Classify an identifier: keyword, then builtin, then default
    pub fn classify_identifier(&self, word: &str) -> TokenKind {
        let word = word.to_lowercase();
        if self.keywords.contains(&word) {
            TokenKind::Keyword
        } else if self.builtins.contains(&word) {
            TokenKind::Builtin
        } else {
            TokenKind::Default
        }
    }

    /// Token kind for a bracket character
    pub fn bracket_kind(&self, ch: char) -> TokenKind {
        self.brackets
            .iter()
            .find(|b| b.open == ch || b.close == ch)
            .map(|b| b.kind)
            .unwrap_or(TokenKind::Default)
    }

    /// Full editor-facing label for a token kind
    pub fn token_label(&self, kind: TokenKind) -> String {
        kind.label(&self.token_postfix)
    }

    /// Tokenize a single line of text
    ///
    /// Takes the line text and the state from the previous line. Returns
    /// tokens covering every byte of `text` and the state for the next line.
    pub fn tokenize_line(&self, text: &str, start: &LineState) -> LineTokens {
        let mut tokens = Vec::new();
        let mut state = start.clone();
        let mut pos = 0;

        while pos < text.len() {
            let rules = self.rules_for(state.current());
            let matched = rules.iter().find_map(|rule| {
                rule.match_at(text, pos)
                    .filter(|m| rule.accepts(m, text, state.tag()))
                    .map(|m| (rule, m))
            });

            match matched {
                Some((rule, m)) => {
                    self.emit(rule, &m, text, &mut tokens);
                    pos = m.end;
                    if rule.transition != Transition::None {
                        trace!(
                            rule = %rule.name,
                            from = ?state.current(),
                            transition = ?rule.transition,
                            "state change"
                        );
                        match (rule.transition, rule.captured_tag(&m, text)) {
                            (Transition::Push(next), Some(tag)) => state.push_tagged(next, tag),
                            (transition, _) => state.apply(transition),
                        }
                    }
                }
                None => {
                    // No rule matches - consume exactly one character
                    let width = text[pos..].chars().next().map_or(1, char::len_utf8);
                    trace!(pos, state = ?state.current(), "no rule matched");
                    tokens.push(Token::new(pos, pos + width, TokenKind::Default));
                    pos += width;
                }
            }
        }

        LineTokens {
            tokens,
            end_state: state,
        }
    }

    /// Tokenize consecutive lines, threading each end state into the next
    pub fn tokenize_lines<'a>(
        &self,
        lines: impl IntoIterator<Item = &'a str>,
        start: &LineState,
    ) -> Vec<LineTokens> {
        let mut state = start.clone();
        let mut result = Vec::new();
        for line in lines {
            let line_tokens = self.tokenize_line(line, &state);
            state = line_tokens.end_state.clone();
            result.push(line_tokens);
        }
        result
    }

    fn emit(&self, rule: &Rule, m: &RuleMatch, text: &str, tokens: &mut Vec<Token>) {
        match &rule.classify {
            Classify::Fixed(kind) => tokens.push(Token::new(m.start, m.end, *kind)),
            Classify::Identifier => {
                let kind = self.classify_identifier(&text[m.start..m.end]);
                tokens.push(Token::new(m.start, m.end, kind));
            }
            Classify::Bracket => {
                let kind = text[m.start..m.end]
                    .chars()
                    .next()
                    .map_or(TokenKind::Default, |ch| self.bracket_kind(ch));
                tokens.push(Token::new(m.start, m.end, kind));
            }
            Classify::Groups(kinds) => {
                // Gaps between groups stay covered as default text
                let mut cursor = m.start;
                for (range, kind) in m.groups.iter().zip(kinds) {
                    let Some((start, end)) = *range else { continue };
                    if start >= end {
                        continue;
                    }
                    if start > cursor {
                        tokens.push(Token::new(cursor, start, TokenKind::Default));
                    }
                    tokens.push(Token::new(start, end, *kind));
                    cursor = end;
                }
                if cursor < m.end {
                    tokens.push(Token::new(cursor, m.end, TokenKind::Default));
                }
            }
        }
    }
}
