// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builtins that inspect or change the VFS.

use std::io::{self, Write};

use chrono::{Local, TimeZone};
use vsh_storage::{path, FileEntry, FileKind};

use super::{read_input, BuiltinContext};
use crate::ast::Command;
use crate::exec::{Input, Output};

pub(super) fn cd(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let target = cmd.args().first().map_or("/", String::as_str);
    match ctx.vfs.change_dir(target) {
        Ok(()) => Ok(0),
        Err(_) => {
            writeln!(out, "cd: {target}: No such file or directory")?;
            Ok(1)
        }
    }
}

pub(super) fn pwd(
    ctx: &mut BuiltinContext<'_>,
    _cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    writeln!(out, "{}", ctx.vfs.current_dir())?;
    Ok(0)
}

pub(super) fn mkdir(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    if cmd.args().is_empty() {
        writeln!(out, "mkdir: missing operand")?;
        return Ok(1);
    }
    for dir in cmd.args() {
        if ctx.vfs.create_dir(dir).is_err() {
            writeln!(out, "mkdir: cannot create directory '{dir}'")?;
            return Ok(1);
        }
    }
    Ok(0)
}

pub(super) fn touch(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    if cmd.args().is_empty() {
        writeln!(out, "touch: missing file operand")?;
        return Ok(1);
    }
    for file in cmd.args() {
        if !ctx.vfs.exists(file) && ctx.vfs.create(file, FileKind::Regular).is_err() {
            writeln!(out, "touch: cannot create file '{file}'")?;
            return Ok(1);
        }
    }
    Ok(0)
}

pub(super) fn ls(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let mut long = false;
    let mut all = false;
    let mut dir = None;
    for arg in cmd.args() {
        match arg.strip_prefix('-') {
            Some(flags) => {
                long |= flags.contains('l');
                all |= flags.contains('a');
            }
            None => {
                dir = Some(arg.as_str());
                break;
            }
        }
    }
    let dir = dir.unwrap_or_else(|| ctx.vfs.current_dir());

    let entries = ctx.vfs.list(dir);
    for entry in entries.iter().filter(|e| all || !e.name.starts_with('.')) {
        if long {
            writeln!(out, "{}", long_listing(entry))?;
        } else {
            let kind = if entry.is_dir() { 'd' } else { '-' };
            writeln!(out, "{kind} {}", entry.name)?;
        }
    }
    Ok(0)
}

fn long_listing(entry: &FileEntry) -> String {
    let mode = if entry.is_dir() {
        "drwxr-xr-x"
    } else {
        "-rw-r--r--"
    };
    format!(
        "{mode} {:>8} {} {}",
        entry.size,
        local_time(entry.modified_time, "%b %d %H:%M"),
        entry.name
    )
}

fn local_time(secs: u32, format: &str) -> String {
    match Local.timestamp_opt(i64::from(secs), 0).single() {
        Some(time) => time.format(format).to_string(),
        None => "?".to_string(),
    }
}

pub(super) fn rm(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    if cmd.args().is_empty() {
        writeln!(out, "rm: missing operand")?;
        return Ok(1);
    }
    for file in cmd.args() {
        if ctx.vfs.delete(file).is_err() {
            writeln!(out, "rm: cannot remove '{file}'")?;
            return Ok(1);
        }
    }
    Ok(0)
}

/// Concatenate files, or copy the wired input through when there are none.
pub(super) fn cat(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    if cmd.args().is_empty() {
        let text = read_input(input)?;
        out.write_all(text.as_bytes())?;
        return Ok(0);
    }

    let mut code = 0;
    for file in cmd.args() {
        match ctx.vfs.read_all(file) {
            Ok(bytes) => out.write_all(&bytes)?,
            Err(_) => {
                writeln!(out, "cat: {file}: No such file or directory")?;
                code = 1;
            }
        }
    }
    Ok(code)
}

pub(super) fn cp(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let [src, dst, ..] = cmd.args() else {
        writeln!(out, "cp: missing file operand")?;
        return Ok(1);
    };
    copy(ctx, "cp", src, dst, out)
}

/// Copy then delete. Moving onto the same base name is a no-op, since the
/// namespace is keyed by base name.
pub(super) fn mv(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let [src, dst, ..] = cmd.args() else {
        writeln!(out, "mv: missing file operand")?;
        return Ok(1);
    };
    if path::base_name(src) == path::base_name(dst) {
        return Ok(0);
    }
    let code = copy(ctx, "mv", src, dst, out)?;
    if code != 0 {
        return Ok(code);
    }
    if ctx.vfs.delete(src).is_err() {
        writeln!(out, "mv: cannot remove '{src}'")?;
        return Ok(1);
    }
    Ok(0)
}

fn copy(
    ctx: &mut BuiltinContext<'_>,
    name: &str,
    src: &str,
    dst: &str,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let Ok(data) = ctx.vfs.read_all(src) else {
        writeln!(out, "{name}: {src}: No such file or directory")?;
        return Ok(1);
    };
    if ctx.vfs.write(dst, &data).is_err() {
        writeln!(out, "{name}: cannot create '{dst}'")?;
        return Ok(1);
    }
    Ok(0)
}

pub(super) fn stat(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    if cmd.args().is_empty() {
        writeln!(out, "stat: missing file operand")?;
        return Ok(1);
    }
    let mut code = 0;
    for file in cmd.args() {
        let Some(entry) = ctx.vfs.stat(file) else {
            writeln!(out, "stat: cannot stat '{file}': No such file")?;
            code = 1;
            continue;
        };
        writeln!(out, "  File: {file}")?;
        writeln!(out, "  Size: {} bytes", entry.size)?;
        writeln!(out, "  Type: {}", entry.kind.describe())?;
        writeln!(out, "  Created: {}", local_time(entry.created_time, "%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "  Modified: {}", local_time(entry.modified_time, "%Y-%m-%d %H:%M:%S"))?;
        writeln!(out)?;
    }
    Ok(code)
}

/// `find PATH -name PATTERN`: glob match over every entry name.
pub(super) fn find(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let args = cmd.args();
    if args.len() < 2 {
        writeln!(out, "find: missing operand")?;
        writeln!(out, "Usage: find <path> -name <pattern>")?;
        return Ok(1);
    }
    let root = &args[0];
    let pattern = args[1..]
        .windows(2)
        .find(|pair| pair[0] == "-name")
        .map(|pair| pair[1].as_str());
    let Some(pattern) = pattern else {
        writeln!(out, "find: missing -name pattern")?;
        return Ok(1);
    };
    let pattern = match glob::Pattern::new(pattern) {
        Ok(p) => p,
        Err(e) => {
            writeln!(out, "find: invalid pattern '{pattern}': {}", e.msg)?;
            return Ok(1);
        }
    };

    for entry in ctx.vfs.list(root) {
        if pattern.matches(&entry.name) {
            writeln!(out, "{}", entry.name)?;
        }
    }
    Ok(0)
}

#[cfg(test)]
#[path = "files_tests.rs"]
mod tests;
