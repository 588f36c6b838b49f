// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::builtins::test_helpers::Harness;
use crate::job::FakeJobHandle;
use similar_asserts::assert_eq;

#[test]
fn help_lists_every_builtin() {
    let (code, out) = Harness::new().run("help");
    assert_eq!(code, 0);
    assert!(out.starts_with("Custom Shell - Built-in Commands:\n"));
    for name in crate::builtins::names() {
        assert!(out.contains(&format!("  {name}")), "help is missing {name}");
    }
}

#[test]
fn history_is_numbered_from_one() {
    let mut sh = Harness::new();
    sh.history.add("ls");
    sh.history.add("cat a.txt");

    assert_eq!(sh.run("history").1, "    1  ls\n    2  cat a.txt\n");
}

#[test]
fn clear_emits_ansi_reset() {
    assert_eq!(Harness::new().run("clear").1, "\x1b[2J\x1b[H");
}

#[test]
fn date_prints_one_line() {
    let (code, out) = Harness::new().run("date");
    assert_eq!(code, 0);
    assert_eq!(out.lines().count(), 1);
    assert!(out.trim_end().ends_with(&chrono::Local::now().format("%Y").to_string()));
}

#[test]
fn jobs_polls_before_listing() {
    let mut sh = Harness::new();
    let running = FakeJobHandle::new();
    let done = FakeJobHandle::new();
    sh.jobs.add(running.boxed(), 1, "job.vsh", true);
    sh.jobs.add(done.boxed(), 2, "other.vsh", true);
    done.finish(0);

    assert_eq!(
        sh.run("jobs").1,
        "[1] Running  job.vsh\n[2] Done  other.vsh\n"
    );
    assert!(running.poll_count() > 0);
}

#[test]
fn jobs_with_empty_table_prints_nothing() {
    assert_eq!(Harness::new().run("jobs"), (0, String::new()));
}
