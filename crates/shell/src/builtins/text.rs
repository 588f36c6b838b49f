// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented text filters. Each reads its file operands from the VFS,
//! or the wired input when given none.

use std::io::{self, Write};

use super::{for_each_source, leading_number, BuiltinContext};
use crate::ast::Command;
use crate::exec::{Input, Output};

const DEFAULT_LINES: usize = 10;

pub(super) fn echo(
    _ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    _input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    writeln!(out, "{}", cmd.args().join(" "))?;
    Ok(0)
}

pub(super) fn wc(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let args = cmd.args();
    let (flags, operands) = match args.first() {
        Some(first) if first.starts_with('-') => (first.as_str(), &args[1..]),
        _ => ("", args),
    };
    let mut show = [flags.contains('l'), flags.contains('w'), flags.contains('c')];
    if !show.contains(&true) {
        show = [true; 3];
    }

    for_each_source(ctx.vfs, "wc", operands, input, out, |source, text, out| {
        let counts = [
            text.matches('\n').count(),
            text.split_whitespace().count(),
            text.len(),
        ];
        let mut fields: Vec<String> = counts
            .iter()
            .zip(show)
            .filter(|(_, shown)| *shown)
            .map(|(count, _)| count.to_string())
            .collect();
        fields.extend(source.map(str::to_string));
        writeln!(out, "{}", fields.join(" "))
    })
}

/// Parse a leading `-n N` or `-N`. `Err` carries the exit code after the
/// usage message has been written.
fn line_limit<'c>(
    name: &str,
    args: &'c [String],
    out: &mut Output<'_>,
) -> io::Result<Result<(usize, &'c [String]), i32>> {
    match args.first().map(String::as_str) {
        Some("-n") => match args.get(1) {
            Some(n) => Ok(Ok((leading_number(n), &args[2..]))),
            None => {
                writeln!(out, "{name}: option requires an argument -- 'n'")?;
                Ok(Err(1))
            }
        },
        Some(flag) if flag.starts_with('-') && flag[1..].starts_with(|c: char| c.is_ascii_digit()) => {
            Ok(Ok((leading_number(&flag[1..]), &args[1..])))
        }
        _ => Ok(Ok((DEFAULT_LINES, args))),
    }
}

pub(super) fn head(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let (n, operands) = match line_limit("head", cmd.args(), out)? {
        Ok(parsed) => parsed,
        Err(code) => return Ok(code),
    };
    for_each_source(ctx.vfs, "head", operands, input, out, |_, text, out| {
        for line in text.split_inclusive('\n').take(n) {
            out.write_all(line.as_bytes())?;
        }
        Ok(())
    })
}

pub(super) fn tail(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let (n, operands) = match line_limit("tail", cmd.args(), out)? {
        Ok(parsed) => parsed,
        Err(code) => return Ok(code),
    };
    for_each_source(ctx.vfs, "tail", operands, input, out, |_, text, out| {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        for line in &lines[lines.len().saturating_sub(n)..] {
            out.write_all(line.as_bytes())?;
        }
        Ok(())
    })
}

/// Substring search. Input lines are echoed as-is; file matches are
/// prefixed `file:line:`.
pub(super) fn grep(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let args = cmd.args();
    let mut ignore_case = false;
    let mut recursive = false;
    let mut pattern = None;
    for (i, arg) in args.iter().enumerate() {
        match arg.as_str() {
            "-i" => ignore_case = true,
            "-r" | "-R" => recursive = true,
            a if !a.starts_with('-') => {
                pattern = Some((a, &args[i + 1..]));
                break;
            }
            _ => {}
        }
    }
    let Some((pattern, operands)) = pattern else {
        writeln!(out, "grep: missing pattern")?;
        return Ok(1);
    };

    let needle = if ignore_case {
        pattern.to_lowercase()
    } else {
        pattern.to_string()
    };
    let matches = |line: &str| {
        if ignore_case {
            line.to_lowercase().contains(&needle)
        } else {
            line.contains(&needle)
        }
    };

    // With -r, missing operands are skipped silently.
    let named = !operands.is_empty();
    let operands: Vec<String> = operands
        .iter()
        .filter(|p| !recursive || ctx.vfs.exists(p))
        .cloned()
        .collect();
    if named && operands.is_empty() {
        return Ok(0);
    }

    for_each_source(ctx.vfs, "grep", &operands, input, out, |source, text, out| {
        match source {
            None => {
                for line in text.split_inclusive('\n').filter(|l| matches(l)) {
                    out.write_all(line.as_bytes())?;
                }
            }
            Some(file) => {
                for (n, line) in text.lines().enumerate().filter(|(_, l)| matches(l)) {
                    writeln!(out, "{file}:{}:{line}", n + 1)?;
                }
            }
        }
        Ok(())
    })
}

/// `s/old/new/[g]`, split into its parts. The old text must be non-empty.
fn parse_substitution(expr: &str) -> Option<(&str, &str, bool)> {
    let body = expr.strip_prefix("s/")?;
    let (old, rest) = body.split_once('/')?;
    let (new, flags) = rest.split_once('/')?;
    if old.is_empty() {
        return None;
    }
    Some((old, new, flags.contains('g')))
}

pub(super) fn sed(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let Some((expr, operands)) = cmd.args().split_first() else {
        writeln!(out, "sed: missing expression")?;
        return Ok(1);
    };
    let Some((old, new, global)) = parse_substitution(expr) else {
        writeln!(out, "sed: invalid expression")?;
        return Ok(1);
    };

    for_each_source(ctx.vfs, "sed", operands, input, out, |_, text, out| {
        for line in text.lines() {
            if global {
                writeln!(out, "{}", line.replace(old, new))?;
            } else {
                writeln!(out, "{}", line.replacen(old, new, 1))?;
            }
        }
        Ok(())
    })
}

/// Sorts the lines of all sources together, bytewise.
pub(super) fn sort(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let args = cmd.args();
    let mut unique = false;
    let mut reverse = false;
    let mut first_operand = args.len();
    for (i, arg) in args.iter().enumerate() {
        match arg.as_str() {
            flags if flags.starts_with('-') => {
                unique |= flags.contains('u');
                reverse |= flags.contains('r');
            }
            _ => {
                first_operand = i;
                break;
            }
        }
    }

    let mut lines = Vec::new();
    let code = for_each_source(ctx.vfs, "sort", &args[first_operand..], input, out, |_, text, _| {
        lines.extend(text.lines().map(str::to_string));
        Ok(())
    })?;

    lines.sort();
    if reverse {
        lines.reverse();
    }
    if unique {
        lines.dedup();
    }
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(code)
}

/// `cut -d D -f N`. Empty fields are skipped, so runs of the delimiter
/// count as one.
pub(super) fn cut(
    ctx: &mut BuiltinContext<'_>,
    cmd: &Command,
    input: &mut Input<'_>,
    out: &mut Output<'_>,
) -> io::Result<i32> {
    let args = cmd.args();
    if args.is_empty() {
        writeln!(out, "cut: missing option")?;
        return Ok(1);
    }

    let mut delimiter = '\t';
    let mut field = 1;
    let mut first_operand = args.len();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if let Some(glued) = arg.strip_prefix("-d") {
            let value = if glued.is_empty() {
                i += 1;
                args.get(i).map_or("", String::as_str)
            } else {
                glued
            };
            if let Some(c) = value.chars().next() {
                delimiter = c;
            }
        } else if let Some(glued) = arg.strip_prefix("-f") {
            let value = if glued.is_empty() {
                i += 1;
                args.get(i).map_or("", String::as_str)
            } else {
                glued
            };
            field = leading_number(value);
        } else if !arg.starts_with('-') {
            first_operand = i;
            break;
        }
        i += 1;
    }
    if field < 1 {
        writeln!(out, "cut: field number must be >= 1")?;
        return Ok(1);
    }

    for_each_source(ctx.vfs, "cut", &args[first_operand..], input, out, |_, text, out| {
        for line in text.lines() {
            if let Some(value) = line.split(delimiter).filter(|f| !f.is_empty()).nth(field - 1) {
                writeln!(out, "{value}")?;
            }
        }
        Ok(())
    })
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
