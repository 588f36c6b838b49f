// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Token types produced by the lexer.

use std::fmt;

/// Maximum number of tokens kept from one line; the rest are dropped.
pub const MAX_TOKENS: usize = 128;

/// Word length bound. A word reaching `MAX_TOKEN_LEN - 1` bytes is split.
pub const MAX_TOKEN_LEN: usize = 256;

/// Token kinds recognized on a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A word (command name, argument, or redirect target).
    Word,
    /// `|`
    Pipe,
    /// `<`
    RedirectIn,
    /// `>`
    RedirectOut,
    /// `>>`
    RedirectAppend,
    /// A trailing `&`
    Background,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Word => "word",
            TokenKind::Pipe => "'|'",
            TokenKind::RedirectIn => "'<'",
            TokenKind::RedirectOut => "'>'",
            TokenKind::RedirectAppend => "'>>'",
            TokenKind::Background => "'&'",
        };
        f.write_str(s)
    }
}

/// A lexed token. Operators carry their literal text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn word(text: impl Into<String>) -> Self {
        Self {
            kind: TokenKind::Word,
            text: text.into(),
        }
    }

    pub fn operator(kind: TokenKind) -> Self {
        let text = match kind {
            TokenKind::Word => "",
            TokenKind::Pipe => "|",
            TokenKind::RedirectIn => "<",
            TokenKind::RedirectOut => ">",
            TokenKind::RedirectAppend => ">>",
            TokenKind::Background => "&",
        };
        Self {
            kind,
            text: text.to_string(),
        }
    }

    pub fn is_word(&self) -> bool {
        self.kind == TokenKind::Word
    }
}
