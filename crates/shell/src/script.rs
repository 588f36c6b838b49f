// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented script interpreter for VFS-resident scripts.
//!
//! ```text
//! # comment
//! set count 3
//! add count 4
//! print count        -> 7
//! read name
//! echo name          -> the line read
//! exit 2
//! ```
//!
//! Blank lines, comments and unrecognised lines are skipped at load time.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::warn;

/// Variable table capacity. Further new names are ignored.
pub const MAX_VARS: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScriptError {
    #[error("script is empty")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Instruction {
    Print(String),
    Set { name: String, value: String },
    Add { name: String, value: String },
    Read(String),
    Exit(i32),
}

impl Instruction {
    fn parse(line: &str) -> Option<Self> {
        let (op, rest) = match line.split_once([' ', '\t']) {
            Some((op, rest)) => (op, rest.trim_start()),
            None => (line, ""),
        };
        let mut args = rest.split_whitespace();
        match op {
            "print" | "echo" => Some(Instruction::Print(rest.to_string())),
            "set" => {
                let name = args.next()?;
                let value = rest[name.len()..].trim();
                Some(Instruction::Set {
                    name: name.to_string(),
                    value: value.to_string(),
                })
            }
            "add" => Some(Instruction::Add {
                name: args.next()?.to_string(),
                value: args.next().unwrap_or_default().to_string(),
            }),
            "read" => Some(Instruction::Read(args.next()?.to_string())),
            "exit" => Some(Instruction::Exit(
                args.next().and_then(|c| c.parse().ok()).unwrap_or(0),
            )),
            _ => None,
        }
    }
}

/// A variable holds an integer and, once assigned by `read`, a string that
/// takes precedence when printed.
#[derive(Debug, Clone, Default)]
struct Variable {
    int: i32,
    text: Option<String>,
}

/// A loaded script with its variable table.
#[derive(Debug, Clone)]
pub struct Program {
    instructions: Vec<Instruction>,
    vars: HashMap<String, Variable>,
}

impl Program {
    pub fn load(source: &[u8]) -> Result<Self, ScriptError> {
        if source.is_empty() {
            return Err(ScriptError::Empty);
        }
        let text = String::from_utf8_lossy(source);
        let instructions = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(Instruction::parse)
            .collect();
        Ok(Self {
            instructions,
            vars: HashMap::new(),
        })
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Execute from the top. Returns the exit code (0 unless `exit` says
    /// otherwise, 1 if writing output fails).
    pub fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> i32
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        match self.execute(input, output) {
            Ok(code) => code,
            Err(e) => {
                warn!(error = %e, "script aborted");
                1
            }
        }
    }

    fn execute<R, W>(&mut self, input: &mut R, output: &mut W) -> io::Result<i32>
    where
        R: BufRead + ?Sized,
        W: Write + ?Sized,
    {
        for inst in self.instructions.clone() {
            match inst {
                Instruction::Print(arg) => match self.vars.get(&arg) {
                    Some(Variable { text: Some(s), .. }) => writeln!(output, "{s}")?,
                    Some(var) => writeln!(output, "{}", var.int)?,
                    None => writeln!(output, "{arg}")?,
                },
                Instruction::Set { name, value } => {
                    let value = self.int_value(&value);
                    if let Some(var) = self.var_mut(&name) {
                        var.int = value;
                        var.text = None;
                    }
                }
                Instruction::Add { name, value } => {
                    let sum = self.int_value(&name).wrapping_add(self.int_value(&value));
                    if let Some(var) = self.vars.get_mut(&name) {
                        var.int = sum;
                    }
                }
                Instruction::Read(name) => {
                    let mut line = String::new();
                    if input.read_line(&mut line)? > 0 {
                        let line = line.trim_end_matches(['\n', '\r']).to_string();
                        if let Some(var) = self.var_mut(&name) {
                            var.text = Some(line);
                        }
                    }
                }
                Instruction::Exit(code) => {
                    output.flush()?;
                    return Ok(code);
                }
            }
        }
        output.flush()?;
        Ok(0)
    }

    /// Value of a variable, else the integer literal, else 0.
    fn int_value(&self, arg: &str) -> i32 {
        match self.vars.get(arg) {
            Some(var) => var.int,
            None => arg.parse().unwrap_or(0),
        }
    }

    fn var_mut(&mut self, name: &str) -> Option<&mut Variable> {
        if !self.vars.contains_key(name) && self.vars.len() >= MAX_VARS {
            return None;
        }
        Some(self.vars.entry(name.to_string()).or_default())
    }

    /// Integer value of a variable, for inspection after a run.
    pub fn int_var(&self, name: &str) -> Option<i32> {
        self.vars.get(name).map(|v| v.int)
    }
}

#[cfg(test)]
#[path = "script_tests.rs"]
mod tests;
