// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::io::{self, Write};

use chrono::Local;

use super::BuiltinContext;
use crate::ast::Command;
use crate::exec::{Input, Output};

const HELP: &str = "\
Custom Shell - Built-in Commands:
File Operations:
  cd [dir]          - Change directory
  mkdir <dir>       - Create directory
  touch <file>      - Create empty file
  ls [-la] [dir]    - List directory (l=long, a=all)
  rm <file>         - Remove file
  cp <src> <dest>   - Copy file
  mv <src> <dest>   - Move/rename file
  cat <file>        - Display file contents
  stat <file>       - Show file metadata

Text Processing:
  echo <text>       - Print text
  wc [-lwc] <file>  - Word count (l=lines, w=words, c=chars)
  head [-n N] <file> - Show first N lines
  tail [-n N] <file> - Show last N lines
  grep [-ri] <pattern> <file> - Search text (r=recursive, i=case-insensitive)
  sed 's/old/new/' <file> - Stream editor (substitute)
  sort [-ur] <file> - Sort lines (u=unique, r=reverse)
  cut -d<delim> -f<field> <file> - Extract fields

File Search:
  find <path> -name <pattern> - Find files by name pattern

System:
  pwd               - Print current directory
  date              - Show current date/time
  history           - Show command history
  jobs              - List background jobs
  clear             - Clear screen
  help              - Show this help
  exit / quit       - Exit the shell

Features:
  - Piping with |
  - Redirection: > < >>
  - Background jobs with &
  - Quoted strings and escape characters
  - Scripts stored in the VFS run by name
";

pub(super) fn help(
    _ctx: &mut BuiltinContext<'_>,
    _cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    out.write_all(HELP.as_bytes())?;
    Ok(0)
}

pub(super) fn history(
    ctx: &mut BuiltinContext<'_>,
    _cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    for (i, line) in ctx.history.iter().enumerate() {
        writeln!(out, "{:5}  {line}", i + 1)?;
    }
    Ok(0)
}

pub(super) fn clear(
    _ctx: &mut BuiltinContext<'_>,
    _cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    out.write_all(b"\x1b[2J\x1b[H")?;
    Ok(0)
}

pub(super) fn date(
    _ctx: &mut BuiltinContext<'_>,
    _cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    writeln!(out, "{}", Local::now().format("%a %b %d %H:%M:%S %Z %Y"))?;
    Ok(0)
}

/// Polls every job before listing so finished jobs show as `Done`.
pub(super) fn jobs(
    ctx: &mut BuiltinContext<'_>,
    _cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    ctx.jobs.running_count();
    for job in ctx.jobs.iter() {
        let state = if job.running { "Running" } else { "Done" };
        writeln!(out, "[{}] {state}  {}", job.id, job.command)?;
    }
    Ok(0)
}

#[cfg(test)]
#[path = "system_tests.rs"]
mod tests;
