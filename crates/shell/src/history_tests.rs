// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn immediate_repeat_is_skipped() {
    let mut history = History::default();
    history.add("ls");
    history.add("ls");
    history.add("pwd");
    history.add("ls");
    assert_eq!(history.iter().collect::<Vec<_>>(), ["ls", "pwd", "ls"]);
}

#[test]
fn empty_line_is_skipped() {
    let mut history = History::default();
    history.add("");
    assert!(history.is_empty());
}

#[test]
fn oldest_entry_is_evicted_at_capacity() {
    let mut history = History::new(3);
    for line in ["a", "b", "c", "d"] {
        history.add(line);
    }
    assert_eq!(history.len(), 3);
    assert_eq!(history.get(1), Some("b"));
    assert_eq!(history.get(3), Some("d"));
}

#[yare::parameterized(
    zero      = { 0, None },
    first     = { 1, Some("one") },
    last      = { 2, Some("two") },
    past_end  = { 3, None },
)]
fn get_is_one_based(index: usize, expected: Option<&str>) {
    let mut history = History::default();
    history.add("one");
    history.add("two");
    assert_eq!(history.get(index), expected);
}
