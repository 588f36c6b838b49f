// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtin command library.
//!
//! Every builtin runs in-process against the VFS. User errors are written
//! to the command's own output with a non-zero exit code; only I/O failures
//! on the wired streams surface as `Err`, which dispatch turns into exit
//! code 1.

mod files;
mod system;
mod text;

use std::io::{self, Read, Write};

use tracing::{debug, warn};
use vsh_storage::Vfs;

use crate::ast::Command;
use crate::exec::{Input, Output};
use crate::history::History;
use crate::job::JobManager;

/// Session state a builtin may touch.
pub struct BuiltinContext<'a> {
    pub vfs: &'a mut Vfs,
    pub history: &'a History,
    pub jobs: &'a mut JobManager,
}

type BuiltinFn = fn(
    &mut BuiltinContext<'_>,
    &Command,
    &mut Input<'_>,
    &mut Output<'_>,
) -> io::Result<i32>;

const BUILTINS: &[(&str, BuiltinFn)] = &[
    ("cd", files::cd),
    ("mkdir", files::mkdir),
    ("touch", files::touch),
    ("ls", files::ls),
    ("rm", files::rm),
    ("cat", files::cat),
    ("echo", text::echo),
    ("pwd", files::pwd),
    ("help", system::help),
    ("history", system::history),
    ("clear", system::clear),
    ("cp", files::cp),
    ("mv", files::mv),
    ("wc", text::wc),
    ("head", text::head),
    ("tail", text::tail),
    ("date", system::date),
    ("stat", files::stat),
    ("grep", text::grep),
    ("find", files::find),
    ("sed", text::sed),
    ("sort", text::sort),
    ("cut", text::cut),
    ("jobs", system::jobs),
];

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.iter().any(|(n, _)| *n == name)
}

/// Builtin names in registry order.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(n, _)| *n)
}

/// Run the builtin named by `cmd`. Unknown names return 1.
pub fn dispatch(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    output: &mut Output<'_>,
) -> i32 {
    let Some(name) = cmd.name() else {
        return 1;
    };
    let Some((_, run)) = BUILTINS.iter().find(|(n, _)| *n == name) else {
        return 1;
    };
    debug!(command = name, args = cmd.args().len(), "dispatching builtin");
    match run(ctx, cmd, input, output).and_then(|code| output.flush().map(|()| code)) {
        Ok(code) => code,
        Err(e) => {
            warn!(command = name, error = %e, "builtin failed");
            1
        }
    }
}

/// Wired input as text. The inherited terminal is never read implicitly.
fn read_input(input: &mut Input<'_>) -> io::Result<String> {
    if input.is_inherited() {
        return Ok(String::new());
    }
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_file(vfs: &Vfs, path: &str) -> Option<String> {
    vfs.read_all(path)
        .ok()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
}

/// Feed each operand's text to `f`, or the wired input's text when there
/// are no operands. Missing operands are reported as
/// `<cmd>: <path>: No such file` and make the result 1.
fn for_each_source<F>(
    vfs: &Vfs,
    cmd: &str,
    operands: &[String],
    input: &mut Input<'_>,
    out: &mut Output<'_>,
    mut f: F,
) -> io::Result<i32>
where
    F: FnMut(Option<&str>, &str, &mut Output<'_>) -> io::Result<()>,
{
    if operands.is_empty() {
        if input.is_inherited() {
            return Ok(0);
        }
        let text = read_input(input)?;
        f(None, &text, out)?;
        return Ok(0);
    }

    let mut code = 0;
    for path in operands {
        match read_file(vfs, path) {
            Some(text) => f(Some(path), &text, out)?,
            None => {
                writeln!(out, "{cmd}: {path}: No such file")?;
                code = 1;
            }
        }
    }
    Ok(code)
}

/// Leading decimal digits of `s`, or 0.
fn leading_number(s: &str) -> usize {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().unwrap_or(0)
}

#[cfg(test)]
mod test_helpers;

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
