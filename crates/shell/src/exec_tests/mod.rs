// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use similar_asserts::assert_eq;
use std::io::Cursor;
use tempfile::TempDir;

mod background;

pub(super) fn session() -> (TempDir, Session) {
    let dir = tempfile::tempdir().unwrap();
    let vfs = Vfs::open(dir.path().join("vfs.dat")).unwrap();
    (dir, Session::new(vfs).runtime(None))
}

pub(super) fn run(session: &mut Session, line: &str) -> (i32, String) {
    run_with_stdin(session, line, "")
}

pub(super) fn run_with_stdin(session: &mut Session, line: &str, stdin: &str) -> (i32, String) {
    let mut input = Cursor::new(stdin.as_bytes().to_vec());
    let mut out: Vec<u8> = Vec::new();
    let code = session.execute_line(line, &mut input, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn create_write_and_read_back() {
    let (_dir, mut sh) = session();
    assert_eq!(run(&mut sh, "mkdir proj").0, 0);
    assert_eq!(run(&mut sh, "touch proj/a.txt").0, 0);
    assert_eq!(run(&mut sh, "echo hi > a.txt"), (0, String::new()));
    assert_eq!(run(&mut sh, "cat a.txt"), (0, "hi\n".to_string()));
}

#[test]
fn pipe_feeds_next_stage() {
    let (_dir, mut sh) = session();
    assert_eq!(run(&mut sh, "echo hello | cat"), (0, "hello\n".to_string()));
}

#[test]
fn multi_stage_pipeline() {
    let (_dir, mut sh) = session();
    sh.vfs().write("words", b"pear\napple\nfig\napple\n").unwrap();

    assert_eq!(
        run(&mut sh, "cat words | sort -u | head -n 2"),
        (0, "apple\nfig\n".to_string())
    );
    assert_eq!(run(&mut sh, "cat words | grep p | wc -l").1, "3\n");
}

#[test]
fn exit_code_is_last_stage() {
    let (_dir, mut sh) = session();
    assert_eq!(run(&mut sh, "cat ghost | echo ok"), (0, "ok\n".to_string()));
    assert_eq!(run(&mut sh, "echo ok | cat ghost").0, 1);
}

#[test]
fn vfs_redirect_round_trip() {
    let (_dir, mut sh) = session();
    run(&mut sh, "echo one > log");
    run(&mut sh, "echo two >> log");
    assert_eq!(run(&mut sh, "cat < log"), (0, "one\ntwo\n".to_string()));

    run(&mut sh, "echo reset > log");
    assert_eq!(sh.vfs().read_all("log").unwrap(), b"reset\n");
}

#[test]
fn output_redirect_creates_parent_entry() {
    let (_dir, mut sh) = session();
    run(&mut sh, "echo hi > projects/readme.txt");
    assert!(sh.vfs().stat("projects").unwrap().is_dir());
    assert_eq!(sh.vfs().read_all("readme.txt").unwrap(), b"hi\n");
}

#[test]
fn redirect_overrides_pipe() {
    let (_dir, mut sh) = session();
    assert_eq!(run(&mut sh, "echo a > mid | cat"), (0, String::new()));
    assert_eq!(sh.vfs().read_all("mid").unwrap(), b"a\n");

    sh.vfs().write("src", b"from file\n").unwrap();
    assert_eq!(run(&mut sh, "echo piped | cat < src").1, "from file\n");
}

#[test]
fn missing_vfs_input_is_empty() {
    let (_dir, mut sh) = session();
    assert_eq!(run(&mut sh, "wc -l < nothing"), (0, "0\n".to_string()));
}

#[test]
fn host_redirects_use_real_files() {
    let (dir, mut sh) = session();
    let host = dir.path().join("host.txt");
    let host = host.to_str().unwrap();

    run(&mut sh, &format!("echo out > {HOST_PREFIX}{host}"));
    run(&mut sh, &format!("echo more >> {HOST_PREFIX}{host}"));
    assert_eq!(std::fs::read_to_string(host).unwrap(), "out\nmore\n");
    assert_eq!(run(&mut sh, &format!("cat < {HOST_PREFIX}{host}")).1, "out\nmore\n");
    assert!(!sh.vfs().exists("host.txt"));
}

#[test]
fn missing_host_input_aborts_pipeline() {
    let (_dir, mut sh) = session();
    let mut out: Vec<u8> = Vec::new();
    let err = sh
        .execute_line("cat < host:/no/such/file", &mut std::io::empty(), &mut out)
        .unwrap_err();
    assert!(matches!(err, ExecError::Redirect { .. }), "{err}");
    assert!(err.to_string().starts_with("/no/such/file: "));
}

#[test]
fn unknown_command_reports_not_found() {
    let (_dir, mut sh) = session();
    assert_eq!(
        run(&mut sh, "frobnicate now"),
        (1, "frobnicate: command not found\n".to_string())
    );
}

#[test]
fn blank_line_is_success() {
    let (_dir, mut sh) = session();
    assert_eq!(run(&mut sh, ""), (0, String::new()));
    assert_eq!(run(&mut sh, "   "), (0, String::new()));
}

#[test]
fn scripts_run_by_name() {
    let (_dir, mut sh) = session();
    sh.vfs().write("count.vsh", b"set n 2\nadd n 3\nprint n\nexit 4\n").unwrap();
    assert_eq!(run(&mut sh, "count.vsh"), (4, "5\n".to_string()));
}

#[test]
fn scripts_read_piped_and_terminal_input() {
    let (_dir, mut sh) = session();
    sh.vfs().write("greet", b"read who\nprint who\n").unwrap();

    assert_eq!(run(&mut sh, "echo Ada | greet").1, "Ada\n");
    assert_eq!(run_with_stdin(&mut sh, "greet", "Bob\n").1, "Bob\n");
}

#[test]
fn empty_script_fails_to_load() {
    let (_dir, mut sh) = session();
    run(&mut sh, "touch blank");
    assert_eq!(
        run(&mut sh, "blank"),
        (1, "blank: failed to load script\n".to_string())
    );
}

#[test]
fn builtins_ignore_terminal_input() {
    let (_dir, mut sh) = session();
    assert_eq!(run_with_stdin(&mut sh, "cat", "typed\n"), (0, String::new()));
}

#[test]
fn prompt_tracks_current_directory() {
    let (_dir, mut sh) = session();
    assert_eq!(sh.prompt(), "/> ");
    run(&mut sh, "mkdir proj");
    run(&mut sh, "cd proj");
    assert_eq!(sh.prompt(), "/proj> ");
}

#[test]
fn history_builtin_sees_session_history() {
    let (_dir, mut sh) = session();
    sh.history_mut().add("pwd");
    assert_eq!(run(&mut sh, "history").1, "    1  pwd\n");
}

#[test]
fn history_size_bounds_session_history() {
    let (_dir, sh) = session();
    let mut sh = sh.history_size(2);
    for line in ["a", "b", "c"] {
        sh.history_mut().add(line);
    }
    let kept: Vec<_> = sh.history().iter().collect();
    assert_eq!(kept, vec!["b", "c"]);
}
