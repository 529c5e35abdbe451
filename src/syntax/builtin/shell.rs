//! Shell language definition
//!
//! Rule order inside every list is significant: the first matching rule
//! wins, so e.g. floats are tried before hex before plain integers.

use crate::error::Result;
use crate::syntax::language::LanguageDefinition;
use crate::syntax::rules::Rule;
use crate::syntax::state::State;
use crate::syntax::tokens::TokenKind;

pub const KEYWORDS: &[&str] = &[
    "if", "then", "do", "else", "elif", "while", "until", "for", "in", "esac", "fi", "fin", "fil",
    "done", "exit", "set", "unset", "export", "function",
];

pub const BUILTINS: &[&str] = &[
    "ab", "awk", "bash", "beep", "cat", "cc", "cd", "chown", "chmod", "chroot", "clear", "cp",
    "curl", "cut", "diff", "echo", "find", "gawk", "gcc", "get", "git", "grep", "hg", "kill",
    "killall", "ln", "ls", "make", "mkdir", "openssl", "mv", "nc", "node", "npm", "ping", "ps",
    "restart", "rm", "rmdir", "sed", "service", "sh", "shopt", "shred", "source", "sort", "sleep",
    "ssh", "start", "stop", "su", "sudo", "svn", "tee", "telnet", "top", "touch", "vi", "vim",
    "wall", "wc", "wget", "who", "write", "yes", "zsh",
];

/// Characters with special meaning inside a parameter expansion body
const PARAMETER_PUNCTUATION: &str = r"#:%*@\-!_";

const HEREDOC_GROUPS: [TokenKind; 5] = [
    TokenKind::HeredocOperator,
    TokenKind::White,
    TokenKind::HeredocDelimiter,
    TokenKind::Heredoc,
    TokenKind::HeredocDelimiter,
];

/// Index into `HEREDOC_GROUPS` of the tag word
const HEREDOC_TAG_GROUP: usize = 3;

/// Create the shell language definition
pub fn shell_language() -> Result<LanguageDefinition> {
    let mut lang = LanguageDefinition::new("Shell");
    for ext in ["sh", "bash", "zsh", "ksh"] {
        lang.add_extension(ext);
    }
    for interpreter in ["sh", "bash", "zsh", "ksh", "dash", "ash"] {
        lang.add_interpreter(interpreter);
    }
    lang.set_token_postfix(".shell");
    lang.add_keywords(KEYWORDS.iter().copied());
    lang.add_builtins(BUILTINS.iter().copied());

    lang.add_bracket('{', '}', TokenKind::Bracket);
    lang.add_bracket('(', ')', TokenKind::Parenthesis);
    lang.add_bracket('[', ']', TokenKind::Square);

    lang.set_rules(State::Root, root_rules()?);
    lang.set_rules(State::StringBody, string_body_rules()?);
    lang.set_rules(State::DblStringBody, dbl_string_body_rules()?);
    lang.set_rules(State::Heredoc, heredoc_body_rules()?);
    lang.set_rules(State::ParameterBodyQuote, parameter_body_rules("'")?);
    lang.set_rules(State::ParameterBodyDoubleQuote, parameter_body_rules("\"")?);
    lang.set_rules(State::ParameterBodyParen, parameter_body_rules(")")?);
    lang.set_rules(State::ParameterBodyCurlyBrace, parameter_body_rules("}")?);

    Ok(lang)
}

fn root_rules() -> Result<Vec<Rule>> {
    let mut rules = whitespace_rules()?;
    rules.push(Rule::identifier("identifier", r"[a-zA-Z][a-zA-Z0-9_]*")?);
    rules.extend(string_rules()?);
    rules.extend(parameter_rules()?);
    rules.extend(heredoc_rules()?);
    rules.push(Rule::bracket("brackets", r"[{}\[\]()]")?);
    rules.push(Rule::new("flag", r"-+[a-zA-Z0-9_]+", TokenKind::Attribute)?);
    rules.push(Rule::new("symbols", r"[=><!~?&|+\-*/^;.,]+", TokenKind::Delimiter)?);
    rules.extend(number_rules()?);
    rules.push(Rule::new("separator", r"[,;]", TokenKind::Delimiter)?);
    Ok(rules)
}

fn whitespace_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("white", r"\s+", TokenKind::White)?,
        Rule::new("shebang", r"#!.*$", TokenKind::Metatag)?.at_line_start(),
        Rule::new("comment", r"#.*$", TokenKind::Comment)?.at_line_start(),
    ])
}

fn number_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("float", r"[0-9]*\.[0-9]+([eE][\-+]?[0-9]+)?", TokenKind::NumberFloat)?,
        Rule::new("hex", r"0[xX][0-9a-fA-F_]*[0-9a-fA-F]", TokenKind::NumberHex)?,
        Rule::new("integer", r"[0-9]+", TokenKind::Number)?,
    ])
}

fn string_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("single_quote", "'", TokenKind::String)?.push(State::StringBody),
        Rule::new("double_quote", "\"", TokenKind::String)?.push(State::DblStringBody),
    ])
}

fn string_body_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("single_quote_end", "'", TokenKind::String)?.pop_all(),
        Rule::new("single_quote_text", "[^']+", TokenKind::String)?,
    ])
}

fn dbl_string_body_rules() -> Result<Vec<Rule>> {
    // `$'` and `$"` are not special inside double quotes
    let mut rules = vec![Rule::new("double_quote_end", "\"", TokenKind::String)?.pop_all()];
    rules.extend(simple_parameter_rules()?);
    rules.extend(expansion_rules()?);
    rules.push(Rule::new("double_quote_text", r#"[^"$]+"#, TokenKind::String)?);
    // A `$` that starts no expansion
    rules.push(Rule::new("double_quote_dollar", r"\$", TokenKind::String)?);
    Ok(rules)
}

fn parameter_rules() -> Result<Vec<Rule>> {
    let mut rules = simple_parameter_rules()?;
    rules.push(
        Rule::new("ansi_c_quote", r"\$'", TokenKind::Variable)?.push(State::ParameterBodyQuote),
    );
    rules.push(
        Rule::new("locale_quote", r#"\$""#, TokenKind::Variable)?
            .push(State::ParameterBodyDoubleQuote),
    );
    rules.extend(expansion_rules()?);
    Ok(rules)
}

fn simple_parameter_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("positional", r"\$[0-9]+", TokenKind::VariablePredefined)?,
        Rule::new("named", r"\$[a-zA-Z0-9_]+", TokenKind::Variable)?,
        Rule::new("special", r"\$[*@#?\-$!0_]", TokenKind::Variable)?,
    ])
}

fn expansion_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        Rule::new("command_substitution", r"\$\(", TokenKind::Variable)?
            .push(State::ParameterBodyParen),
        Rule::new("expansion", r"\$\{", TokenKind::Variable)?.push(State::ParameterBodyCurlyBrace),
    ])
}

/// Rules for one parameter body, closed by `closer`
fn parameter_body_rules(closer: &str) -> Result<Vec<Rule>> {
    let closer = regex::escape(closer);
    Ok(vec![
        Rule::new(
            "parameter_text",
            &format!("[^{}{}]+", PARAMETER_PUNCTUATION, closer),
            TokenKind::Variable,
        )?,
        Rule::new(
            "parameter_punctuation",
            &format!("[{}]", PARAMETER_PUNCTUATION),
            TokenKind::Delimiter,
        )?,
        Rule::new("parameter_end", &closer, TokenKind::Variable)?.pop(),
    ])
}

fn heredoc_rules() -> Result<Vec<Rule>> {
    Ok(vec![
        // Here-strings have no body, so nothing is pushed
        Rule::groups(
            "herestring",
            r#"(<<<)(\s*)(['"`]?)([a-zA-Z0-9_\-]+)(['"`]?)"#,
            &HEREDOC_GROUPS,
        )?,
        Rule::groups(
            "heredoc",
            r#"(<<-?)(\s*)(['"`]?)([a-zA-Z0-9_\-]+)(['"`]?)"#,
            &HEREDOC_GROUPS,
        )?
        .push(State::Heredoc)
        .capture_tag(HEREDOC_TAG_GROUP),
    ])
}

/// Heredoc bodies highlight like top-level code until the tag line
fn heredoc_body_rules() -> Result<Vec<Rule>> {
    let mut rules = vec![Rule::new("heredoc_end", r"\s*[a-zA-Z0-9_\-]+\s*$", TokenKind::Heredoc)?
        .at_line_start()
        .closes_tag()
        .pop()];
    rules.extend(root_rules()?);
    Ok(rules)
}
