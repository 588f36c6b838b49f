// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line tokenizer.
//!
//! Tokenizing is total: every input produces a token list. Unterminated
//! quotes run to end of line, over-long words are split, and tokens past
//! [`MAX_TOKENS`] are dropped.

use crate::token::{Token, TokenKind, MAX_TOKENS, MAX_TOKEN_LEN};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Double,
    Single,
}

struct Lexer {
    tokens: Vec<Token>,
    word: String,
}

impl Lexer {
    fn push(&mut self, token: Token) {
        if self.tokens.len() < MAX_TOKENS {
            self.tokens.push(token);
        }
    }

    fn flush(&mut self) {
        if !self.word.is_empty() {
            let word = std::mem::take(&mut self.word);
            self.push(Token::word(word));
        }
    }

    fn operator(&mut self, kind: TokenKind) {
        self.flush();
        self.push(Token::operator(kind));
    }

    fn literal(&mut self, c: char) {
        if self.word.len() + c.len_utf8() > MAX_TOKEN_LEN - 1 {
            self.flush();
        }
        self.word.push(c);
    }
}

/// Split `line` into words and operator tokens.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut lx = Lexer {
        tokens: Vec::new(),
        word: String::new(),
    };
    let mut quote = Quote::None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    lx.literal(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => {
                    if let Some(next) = chars.next() {
                        lx.literal(next);
                    }
                }
                _ => lx.literal(c),
            },
            Quote::None => match c {
                '|' => lx.operator(TokenKind::Pipe),
                '<' => lx.operator(TokenKind::RedirectIn),
                '>' => {
                    if chars.next_if_eq(&'>').is_some() {
                        lx.operator(TokenKind::RedirectAppend);
                    } else {
                        lx.operator(TokenKind::RedirectOut);
                    }
                }
                '&' if !matches!(chars.peek(), Some(n) if !n.is_whitespace()) => {
                    lx.operator(TokenKind::Background);
                }
                '"' => quote = Quote::Double,
                '\'' => quote = Quote::Single,
                '\\' => {
                    if let Some(next) = chars.next() {
                        lx.literal(next);
                    }
                }
                c if c.is_whitespace() => lx.flush(),
                c => lx.literal(c),
            },
        }
    }
    lx.flush();
    lx.tokens
}

#[cfg(test)]
#[path = "lexer_tests.rs"]
mod tests;
