use std::{fmt, num::NonZeroU64, vec::Vec};

const COMMENT_MARKER: &str = "//";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub line_number: NonZeroU64,
}

impl<'a> Token<'a> {
    pub fn match_byte(&self, byte: u8) -> bool {
        self.text.len() == 1 && self.text.as_bytes()[0] == byte
    }

    pub fn opens_quote(&self) -> bool {
        self.text.starts_with('"')
    }

    pub fn closes_quote(&self) -> bool {
        self.text.ends_with('"')
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "`{}`: line {}", self.text, self.line_number)
    }
}

pub fn is_comment(line: &str) -> bool {
    line.starts_with(COMMENT_MARKER)
}

/// Splits one source line into tokens.
///
/// Spaces and tabs separate tokens unless they sit inside a double-quoted
/// span. Quote characters stay in the token text. Comment lines produce no
/// tokens, while a completely empty line produces a single empty token.
pub fn lex_line(line: &str, line_number: NonZeroU64) -> Vec<Token<'_>> {
    if is_comment(line) {
        return Vec::new();
    }

    if line.is_empty() {
        return vec![Token {
            text: line,
            line_number,
        }];
    }

    let mut tokens = Vec::new();
    let mut start = 0;
    let mut quoted = false;

    for (idx, ch) in line.char_indices() {
        if ch == '"' {
            quoted = !quoted;
        } else if !quoted && (ch == ' ' || ch == '\t') {
            push_token(&mut tokens, &line[start..idx], line_number);
            start = idx + ch.len_utf8();
        }
    }

    push_token(&mut tokens, &line[start..], line_number);
    tokens
}

fn push_token<'a>(
    tokens: &mut Vec<Token<'a>>,
    text: &'a str,
    line_number: NonZeroU64,
) {
    if !text.is_empty() {
        tokens.push(Token { text, line_number });
    }
}
