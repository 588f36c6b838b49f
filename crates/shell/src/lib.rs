// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Command-line front end for the VFS shell.
//!
//! A line goes through three steps:
//!
//! ```text
//! "cat notes.txt | grep todo > todo.txt &"
//!   tokenize  -> [Word cat] [Word notes.txt] [Pipe] [Word grep] ... [Background]
//!   parse     -> Pipeline { commands: [cat notes.txt] [grep todo > todo.txt &] }
//!   execute   -> Session wires pipes and redirects, dispatches each stage
//! ```
//!
//! Each stage is a builtin, a script stored in the VFS, or unknown. Quoting
//! follows the usual single/double quote rules; there is no variable or
//! glob expansion.
//!
//! # Quick Start
//!
//! ```no_run
//! use vsh_shell::{parse_line, Session};
//! use vsh_storage::Vfs;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = parse_line("echo hello | wc -w").ok_or("empty line")?;
//! assert_eq!(pipeline.len(), 2);
//!
//! let mut session = Session::new(Vfs::open("vfs.dat")?);
//! session.execute_pipeline(&pipeline, &mut std::io::stdin().lock(), &mut std::io::stdout())?;
//! # Ok(())
//! # }
//! ```

mod ast;
pub mod builtins;
pub mod exec;
mod history;
pub mod job;
mod lexer;
mod parser;
pub mod script;
mod token;

pub use ast::{Command, Pipeline};
pub use exec::{ExecError, Input, Output, RedirectTarget, Session, SharedOutput, HOST_PREFIX};
pub use history::{History, DEFAULT_HISTORY_SIZE};
pub use job::{Job, JobHandle, JobManager, TaskHandle, DEFAULT_MAX_JOBS};
pub use lexer::tokenize;
pub use parser::{parse, parse_line};
pub use script::{Program, ScriptError};
pub use token::{Token, TokenKind, MAX_TOKENS, MAX_TOKEN_LEN};

