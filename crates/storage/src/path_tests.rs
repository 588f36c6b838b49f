// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[yare::parameterized(
    unchanged        = { "/a/b",        "/a/b" },
    backslashes      = { "a\\b\\c",     "a/b/c" },
    repeated         = { "//a///b",     "/a/b" },
    mixed            = { "\\\\srv/\\x", "/srv/x" },
    dots_kept        = { "a/../b",      "a/../b" },
)]
fn normalize_cases(input: &str, expected: &str) {
    assert_eq!(normalize(input), expected);
}

#[yare::parameterized(
    relative_at_root   = { "/",     "a.txt",     "/a.txt" },
    relative_in_dir    = { "/proj", "a.txt",     "/proj/a.txt" },
    absolute_wins      = { "/proj", "/etc/x",    "/etc/x" },
    nested_relative    = { "/",     "proj/a",    "/proj/a" },
    drive_letter       = { "/",     "C:\\x",     "C:/x" },
    dot_dot_literal    = { "/proj", "../a",      "/proj/../a" },
)]
fn resolve_cases(cwd: &str, path: &str, expected: &str) {
    assert_eq!(resolve(cwd, path), expected);
}

#[test]
fn base_name_is_last_component() {
    assert_eq!(base_name("/proj/a.txt"), "a.txt");
    assert_eq!(base_name("a.txt"), "a.txt");
    assert_eq!(base_name("/"), "");
    assert_eq!(base_name("/proj/"), "");
}

#[yare::parameterized(
    relative_nested = { "projects/readme.txt", Some("projects") },
    absolute_nested = { "/a/b/c.txt",          Some("a/b") },
    rooted_file     = { "/x.txt",              None },
    bare_file       = { "x.txt",               None },
)]
fn parent_name_cases(path: &str, expected: Option<&str>) {
    assert_eq!(parent_name(path), expected);
}
