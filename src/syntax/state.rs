//! Tokenizer states and the per-line state stack

use tracing::trace;

/// Named rule lists the tokenizer can be in
///
/// Groups that are only ever included into other states (whitespace,
/// numbers, strings, parameters) are not states of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Top level
    Root,
    /// Inside '...'
    StringBody,
    /// Inside "..."
    DblStringBody,
    /// After a heredoc opener, until its terminator line
    Heredoc,
    /// Inside $'...'
    ParameterBodyQuote,
    /// Inside $"..."
    ParameterBodyDoubleQuote,
    /// Inside $(...)
    ParameterBodyParen,
    /// Inside ${...}
    ParameterBodyCurlyBrace,
}

impl State {
    /// All states, in declaration order
    pub const ALL: [State; 8] = [
        State::Root,
        State::StringBody,
        State::DblStringBody,
        State::Heredoc,
        State::ParameterBodyQuote,
        State::ParameterBodyDoubleQuote,
        State::ParameterBodyParen,
        State::ParameterBodyCurlyBrace,
    ];
}

/// State change applied after a rule matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Stay in the current state
    None,
    /// Enter a nested state
    Push(State),
    /// Return to the enclosing state
    Pop,
    /// Return straight to root, discarding every nested state
    PopAll,
}

/// State stack carried from one line to the next
///
/// The bottom of the stack is always `State::Root`; `pop` never removes it.
/// Each entry may carry a tag, the word that ends a pending heredoc.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineState {
    stack: Vec<State>,
    tags: Vec<Option<String>>,
}

impl LineState {
    /// State at the start of a document
    pub fn root() -> Self {
        Self {
            stack: vec![State::Root],
            tags: vec![None],
        }
    }

    /// The active state
    pub fn current(&self) -> State {
        self.stack.last().copied().unwrap_or(State::Root)
    }

    /// Number of states on the stack, including root
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Check if we're at top level
    pub fn is_root(&self) -> bool {
        self.stack.len() <= 1
    }

    /// The stack from bottom to top
    pub fn stack(&self) -> &[State] {
        &self.stack
    }

    /// Tag of the active state, if it was pushed with one
    pub fn tag(&self) -> Option<&str> {
        self.tags.last().and_then(|tag| tag.as_deref())
    }

    pub fn push(&mut self, state: State) {
        self.stack.push(state);
        self.tags.push(None);
    }

    /// Push a state that is left only by a line holding `tag`
    pub fn push_tagged(&mut self, state: State, tag: &str) {
        self.stack.push(state);
        self.tags.push(Some(tag.to_string()));
    }

    pub fn pop(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
            self.tags.pop();
        } else {
            trace!("pop at root ignored");
        }
    }

    pub fn pop_all(&mut self) {
        self.stack.truncate(1);
        self.tags.truncate(1);
    }

    /// Apply a rule's transition
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::None => {}
            Transition::Push(state) => self.push(state),
            Transition::Pop => self.pop(),
            Transition::PopAll => self.pop_all(),
        }
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_state() {
        let state = LineState::default();
        assert!(state.is_root());
        assert_eq!(state.current(), State::Root);
        assert_eq!(state.depth(), 1);
    }

    #[test]
    fn test_push_pop() {
        let mut state = LineState::root();
        state.push(State::DblStringBody);
        state.push(State::ParameterBodyParen);
        assert_eq!(state.current(), State::ParameterBodyParen);
        assert!(!state.is_root());

        state.pop();
        assert_eq!(state.current(), State::DblStringBody);
        state.pop();
        assert!(state.is_root());
    }

    #[test]
    fn test_pop_never_removes_root() {
        let mut state = LineState::root();
        state.pop();
        state.pop();
        assert_eq!(state.stack(), &[State::Root]);
    }

    #[test]
    fn test_pop_all() {
        let mut state = LineState::root();
        state.apply(Transition::Push(State::ParameterBodyCurlyBrace));
        state.apply(Transition::Push(State::StringBody));
        state.apply(Transition::None);
        assert_eq!(state.depth(), 3);

        state.apply(Transition::PopAll);
        assert!(state.is_root());
        assert_eq!(state, LineState::root());
    }

    #[test]
    fn test_tags_follow_their_state() {
        let mut state = LineState::root();
        state.push_tagged(State::Heredoc, "EOF");
        assert_eq!(state.tag(), Some("EOF"));

        state.push(State::DblStringBody);
        assert_eq!(state.tag(), None);
        state.pop();
        assert_eq!(state.tag(), Some("EOF"));

        state.pop();
        assert_eq!(state.tag(), None);
        assert_eq!(state, LineState::root());
    }

    #[test]
    fn test_tag_distinguishes_states() {
        let mut first = LineState::root();
        first.push_tagged(State::Heredoc, "EOF");
        let mut second = LineState::root();
        second.push_tagged(State::Heredoc, "END");
        assert_ne!(first, second);

        first.pop_all();
        assert_eq!(first.tag(), None);
        assert_eq!(first, LineState::root());
    }
}
