// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! VFS path helpers.
//!
//! Paths are plain strings. Resolution only rewrites separators and joins
//! relative paths onto the current directory; `.` and `..` are kept as
//! literal segments.

/// Replace backslashes with `/` and collapse runs of separators.
pub fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut last_was_slash = false;
    for c in path.chars() {
        let c = if c == '\\' { '/' } else { c };
        if c == '/' {
            if !last_was_slash {
                out.push('/');
            }
            last_was_slash = true;
        } else {
            out.push(c);
            last_was_slash = false;
        }
    }
    out
}

/// Rooted (`/x`) or drive-letter (`C:x`) path.
pub fn is_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    path.starts_with('/') || path.starts_with('\\') || (bytes.len() > 1 && bytes[1] == b':')
}

/// Join `file` onto `dir`, inserting a separator when needed.
pub fn join(dir: &str, file: &str) -> String {
    if dir.is_empty() {
        return file.to_string();
    }
    if dir.ends_with('/') || dir.ends_with('\\') {
        format!("{dir}{file}")
    } else {
        format!("{dir}/{file}")
    }
}

/// Resolve `path` against `cwd` into an absolute VFS path.
pub fn resolve(cwd: &str, path: &str) -> String {
    let normalized = normalize(path);
    if is_absolute(&normalized) {
        normalized
    } else {
        join(cwd, &normalized)
    }
}

/// Final path component; entry lookup is keyed on this alone.
pub fn base_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Parent directory component of a relative or absolute path, without a
/// leading slash. `None` for paths with no directory part.
pub fn parent_name(path: &str) -> Option<&str> {
    let idx = path.rfind('/')?;
    if idx == 0 {
        return None;
    }
    let parent = path[..idx].trim_start_matches('/');
    (!parent.is_empty()).then_some(parent)
}

#[cfg(test)]
#[path = "path_tests.rs"]
mod tests;
