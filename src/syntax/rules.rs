//! Pattern rules for the tokenizer
//!
//! A rule pairs a regex, anchored at the tokenizer cursor, with an action:
//! how to classify the matched text and which state transition to apply.
//! Rules live in ordered lists; the first rule that matches wins.

use regex::Regex;

use super::state::{State, Transition};
use super::tokens::TokenKind;
use crate::error::{HighlightError, Result};

/// How a rule classifies the text it matched
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classify {
    /// Always the same kind
    Fixed(TokenKind),
    /// Keyword set, then builtin set, then default
    Identifier,
    /// Looked up in the language's bracket table
    Bracket,
    /// One kind per capture group; empty groups produce no token
    Groups(Vec<TokenKind>),
}

/// How a rule interacts with the tag of the state it pushes or leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagAction {
    /// No tag involved
    None,
    /// Record the text of this capture group (0-based) as the pushed state's tag
    Capture(usize),
    /// Match only when the trimmed text equals the active state's tag
    Close,
}

/// A single tokenizer rule
#[derive(Debug, Clone)]
pub struct Rule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex, anchored at the cursor
    pub pattern: Regex,
    /// Classification of the match
    pub classify: Classify,
    /// State change applied after the match
    pub transition: Transition,
    /// Only try this rule at column 0
    pub line_start: bool,
    /// Tag handling for heredoc openers and terminators
    pub tag: TagAction,
}

/// Where a rule matched, in absolute byte offsets of the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    pub start: usize,
    pub end: usize,
    /// Capture group ranges, for `Classify::Groups` rules only
    pub groups: Vec<Option<(usize, usize)>>,
}

impl Rule {
    /// Create a rule that assigns a fixed token kind
    pub fn new(name: &str, pattern: &str, kind: TokenKind) -> Result<Self> {
        Self::build(name, pattern, Classify::Fixed(kind))
    }

    /// Create a rule whose match is looked up in the keyword/builtin sets
    pub fn identifier(name: &str, pattern: &str) -> Result<Self> {
        Self::build(name, pattern, Classify::Identifier)
    }

    /// Create a rule whose match is looked up in the bracket table
    pub fn bracket(name: &str, pattern: &str) -> Result<Self> {
        Self::build(name, pattern, Classify::Bracket)
    }

    /// Create a rule that classifies each capture group separately
    pub fn groups(name: &str, pattern: &str, kinds: &[TokenKind]) -> Result<Self> {
        let rule = Self::build(name, pattern, Classify::Groups(kinds.to_vec()))?;
        let group_count = rule.pattern.captures_len() - 1;
        if group_count != kinds.len() {
            return Err(HighlightError::Message(format!(
                "Rule '{}' has {} groups but {} token kinds",
                name,
                group_count,
                kinds.len()
            )));
        }
        Ok(rule)
    }

    fn build(name: &str, pattern: &str, classify: Classify) -> Result<Self> {
        // Case-insensitive, anchored at the start of the haystack
        let anchored = format!("(?i)^(?:{})", pattern);
        let regex = Regex::new(&anchored).map_err(|source| HighlightError::InvalidPattern {
            rule: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern: regex,
            classify,
            transition: Transition::None,
            line_start: false,
            tag: TagAction::None,
        })
    }

    /// Builder: push a state after matching
    pub fn push(mut self, state: State) -> Self {
        self.transition = Transition::Push(state);
        self
    }

    /// Builder: pop one state after matching
    pub fn pop(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    /// Builder: return to root after matching
    pub fn pop_all(mut self) -> Self {
        self.transition = Transition::PopAll;
        self
    }

    /// Builder: only match at the start of a line
    pub fn at_line_start(mut self) -> Self {
        self.line_start = true;
        self
    }

    /// Builder: tag the pushed state with a capture group's text
    pub fn capture_tag(mut self, group: usize) -> Self {
        self.tag = TagAction::Capture(group);
        self
    }

    /// Builder: only match the active state's tag
    pub fn closes_tag(mut self) -> Self {
        self.tag = TagAction::Close;
        self
    }

    /// Check a match against the active state's tag
    pub fn accepts(&self, m: &RuleMatch, text: &str, tag: Option<&str>) -> bool {
        match self.tag {
            TagAction::Close => tag == Some(text[m.start..m.end].trim()),
            _ => true,
        }
    }

    /// Text of the capture group to record as a tag
    pub fn captured_tag<'t>(&self, m: &RuleMatch, text: &'t str) -> Option<&'t str> {
        let TagAction::Capture(group) = self.tag else {
            return None;
        };
        m.groups
            .get(group)
            .copied()
            .flatten()
            .map(|(start, end)| &text[start..end])
    }

    /// Try to match this rule exactly at `pos`
    ///
    /// Empty matches are treated as no match so the tokenizer always
    /// makes progress.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<RuleMatch> {
        if pos >= text.len() || (self.line_start && pos != 0) {
            return None;
        }
        let haystack = &text[pos..];

        let (end, groups) = match &self.classify {
            Classify::Groups(_) => {
                let caps = self.pattern.captures(haystack)?;
                let whole = caps.get(0)?;
                let groups = caps
                    .iter()
                    .skip(1)
                    .map(|group| group.map(|m| (pos + m.start(), pos + m.end())))
                    .collect();
                (whole.end(), groups)
            }
            _ => (self.pattern.find(haystack)?.end(), Vec::new()),
        };

        if end == 0 {
            return None;
        }
        Some(RuleMatch {
            start: pos,
            end: pos + end,
            groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_anchored() {
        let rule = Rule::new("number", r"[0-9]+", TokenKind::Number).unwrap();
        assert_eq!(rule.match_at("abc 123", 0), None);
        let m = rule.match_at("abc 123", 4).unwrap();
        assert_eq!((m.start, m.end), (4, 7));
        assert!(m.groups.is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let rule = Rule::new("hex", r"0[x][0-9a-f]+", TokenKind::NumberHex).unwrap();
        assert_eq!(rule.match_at("0XFF", 0).map(|m| m.end), Some(4));
    }

    #[test]
    fn test_line_start_only() {
        let rule = Rule::new("comment", r"#.*$", TokenKind::Comment).unwrap().at_line_start();
        assert_eq!(rule.match_at("# hi", 0).map(|m| m.end), Some(4));
        assert_eq!(rule.match_at("a # hi", 2), None);
    }

    #[test]
    fn test_empty_match_rejected() {
        let rule = Rule::new("maybe", r"x*", TokenKind::Default).unwrap();
        assert_eq!(rule.match_at("abc", 0), None);
        assert_eq!(rule.match_at("xxa", 0).map(|m| m.end), Some(2));
    }

    #[test]
    fn test_group_offsets() {
        let rule = Rule::groups(
            "pair",
            r"([a-z]+)(=?)([0-9]*)",
            &[TokenKind::Variable, TokenKind::Delimiter, TokenKind::Number],
        )
        .unwrap();
        let m = rule.match_at("  ab=12", 2).unwrap();
        assert_eq!(m.end, 7);
        assert_eq!(m.groups, vec![Some((2, 4)), Some((4, 5)), Some((5, 7))]);
    }

    #[test]
    fn test_group_count_mismatch() {
        let result = Rule::groups("bad", r"(a)(b)", &[TokenKind::Default]);
        assert!(matches!(result, Err(HighlightError::Message(_))));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = Rule::new("broken", r"[a-", TokenKind::Default);
        assert!(matches!(result, Err(HighlightError::InvalidPattern { .. })));
    }

    #[test]
    fn test_transition_builders() {
        let rule = Rule::new("open", "'", TokenKind::String).unwrap().push(State::StringBody);
        assert_eq!(rule.transition, Transition::Push(State::StringBody));
        let rule = Rule::new("close", "'", TokenKind::String).unwrap().pop_all();
        assert_eq!(rule.transition, Transition::PopAll);
        let rule = Rule::new("close", r"\)", TokenKind::Variable).unwrap().pop();
        assert_eq!(rule.transition, Transition::Pop);
    }

    #[test]
    fn test_captured_tag() {
        let kinds = [TokenKind::HeredocOperator, TokenKind::Heredoc];
        let rule = Rule::groups("open", r"(<<)([a-z]+)", &kinds)
            .unwrap()
            .push(State::Heredoc)
            .capture_tag(1);
        let text = "cat <<end";
        let m = rule.match_at(text, 4).unwrap();
        assert_eq!(rule.captured_tag(&m, text), Some("end"));

        let plain = Rule::new("word", r"[a-z]+", TokenKind::Default).unwrap();
        let m = plain.match_at(text, 0).unwrap();
        assert_eq!(plain.captured_tag(&m, text), None);
    }

    #[test]
    fn test_close_requires_matching_tag() {
        let rule = Rule::new("end", r"\s*[a-z]+\s*$", TokenKind::Heredoc)
            .unwrap()
            .closes_tag();
        let m = rule.match_at("  end ", 0).unwrap();
        assert!(rule.accepts(&m, "  end ", Some("end")));
        assert!(!rule.accepts(&m, "  end ", Some("eof")));
        assert!(!rule.accepts(&m, "  end ", None));
    }
}
