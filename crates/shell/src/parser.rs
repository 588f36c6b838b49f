// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline parser.
//!
//! The grammar is lenient: nothing is a syntax error. Stray pipes open
//! empty scopes, a redirect with no command starts one, and a redirect
//! with no following word is dropped.

use crate::ast::{Command, Pipeline};
use crate::lexer::tokenize;
use crate::token::{Token, TokenKind};

/// Tokenize and parse a line.
pub fn parse_line(line: &str) -> Option<Pipeline> {
    parse(&tokenize(line))
}

/// Assemble tokens into a pipeline. `None` when there is no `Word` token.
pub fn parse(tokens: &[Token]) -> Option<Pipeline> {
    if !tokens.iter().any(|t| t.kind == TokenKind::Word) {
        return None;
    }

    let mut commands: Vec<Command> = Vec::new();
    // Whether the last element of `commands` is still accepting words.
    let mut open = false;
    let mut pending: Option<TokenKind> = None;

    for token in tokens {
        match token.kind {
            TokenKind::Pipe => {
                open = false;
                pending = None;
            }
            TokenKind::RedirectIn | TokenKind::RedirectOut | TokenKind::RedirectAppend => {
                pending = Some(token.kind);
                if !open {
                    commands.push(Command::default());
                    open = true;
                }
            }
            TokenKind::Background => {
                if open {
                    if let Some(cmd) = commands.last_mut() {
                        cmd.background = true;
                    }
                }
            }
            TokenKind::Word => {
                if !open {
                    commands.push(Command::default());
                    open = true;
                }
                let Some(cmd) = commands.last_mut() else {
                    continue;
                };
                match pending.take() {
                    Some(TokenKind::RedirectIn) => cmd.input_file = Some(token.text.clone()),
                    Some(kind) => {
                        cmd.output_file = Some(token.text.clone());
                        cmd.append_output = kind == TokenKind::RedirectAppend;
                    }
                    None => cmd.argv.push(token.text.clone()),
                }
            }
        }
    }

    if commands.is_empty() {
        None
    } else {
        Some(Pipeline { commands })
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
