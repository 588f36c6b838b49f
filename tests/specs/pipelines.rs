//! Multi-stage pipelines.

use crate::prelude::*;

#[test]
fn echo_into_cat() {
    let mut sh = shell();
    sh.run("echo hello | cat").passes().stdout_eq("hello\n");
}

#[test]
fn filters_chain() {
    let mut sh = shell();
    sh.session
        .vfs()
        .write("fruit", b"pear\napple\nfig\napple\nplum\n")
        .unwrap();

    sh.run("cat fruit | sort -u").stdout_eq("apple\nfig\npear\nplum\n");
    sh.run("cat fruit | grep p | wc -l").stdout_eq("4\n");
    sh.run("cat fruit | head -n 2 | tail -n 1").stdout_eq("apple\n");
    sh.run("cat fruit | sed s/apple/APPLE/ | sort -r | head -n 1")
        .stdout_eq("plum\n");
}

#[test]
fn last_stage_sets_exit_code() {
    let mut sh = shell();
    sh.run("cat missing | echo fine").passes().stdout_eq("fine\n");
    sh.run("echo fine | cat missing").code(1);
}

#[test]
fn unknown_stage_does_not_stop_the_rest() {
    let mut sh = shell();
    sh.run("nosuch | wc -l").passes().stdout_eq("1\n");
    sh.run("echo x | nosuch")
        .code(1)
        .stdout_eq("nosuch: command not found\n");
}

#[test]
fn quoting_keeps_spaces() {
    let mut sh = shell();
    sh.run("echo 'a | b' \"c  d\"").passes().stdout_eq("a | b c  d\n");
}

#[test]
fn history_lists_recorded_lines() {
    let mut sh = shell();
    sh.session.history_mut().add("mkdir a");
    sh.session.history_mut().add("ls");
    sh.run("history").stdout_eq("    1  mkdir a\n    2  ls\n");
}
