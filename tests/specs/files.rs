//! File builtins against the store.

use crate::prelude::*;

#[test]
fn create_write_and_read_back() {
    let mut sh = shell();
    sh.run("mkdir proj").passes().stdout_eq("");
    sh.run("touch proj/a.txt").passes().stdout_eq("");
    sh.run("echo hi > a.txt").passes().stdout_eq("");
    sh.run("cat a.txt").passes().stdout_eq("hi\n");
}

#[test]
fn listing_shows_whole_table() {
    let mut sh = shell();
    sh.setup(&["mkdir proj", "touch proj/a.txt", "touch .secret"]);

    sh.run("ls").passes().stdout_eq("d /\nd proj\n- a.txt\n");
    sh.run("ls -a")
        .passes()
        .stdout_eq("d /\nd proj\n- a.txt\n- .secret\n");
}

#[test]
fn cd_moves_prompt_and_pwd() {
    let mut sh = shell();
    sh.setup(&["mkdir proj", "cd proj"]);
    sh.run("pwd").passes().stdout_eq("/proj\n");
    assert_eq!(sh.session.prompt(), "/proj> ");

    sh.run("cd nowhere")
        .code(1)
        .stdout_eq("cd: nowhere: No such file or directory\n");
    sh.run("cd").passes();
    sh.run("pwd").stdout_eq("/\n");
}

#[test]
fn files_survive_reopen() {
    let mut sh = shell();
    sh.setup(&["mkdir notes", "echo remember the milk > todo"]);
    sh.reopen();

    sh.run("cat todo").passes().stdout_eq("remember the milk\n");
    sh.run("ls").stdout_eq("d /\nd notes\n- todo\n");
    sh.run("pwd").stdout_eq("/\n");
}

#[test]
fn rm_twice_reports_missing() {
    let mut sh = shell();
    sh.setup(&["touch gone", "rm gone"]);
    sh.run("rm gone")
        .code(1)
        .stdout_eq("rm: cannot remove 'gone'\n");
    sh.run("cat gone")
        .fails()
        .stdout_eq("cat: gone: No such file or directory\n");
}

#[test]
fn copy_and_move() {
    let mut sh = shell();
    sh.setup(&["echo payload > src", "cp src copy", "mv copy moved"]);

    sh.run("cat src moved").passes().stdout_eq("payload\npayload\n");
    sh.run("cat copy").fails();
    sh.run("cp ghost x")
        .code(1)
        .stdout_eq("cp: ghost: No such file or directory\n");
}

#[test]
fn stat_reports_size_and_kind() {
    let mut sh = shell();
    sh.setup(&["echo 12345 > five"]);
    sh.run("stat five")
        .passes()
        .stdout_has("  File: five\n  Size: 6 bytes\n  Type: regular file\n");
    sh.run("stat nope")
        .code(1)
        .stdout_eq("stat: cannot stat 'nope': No such file\n");
}

#[test]
fn find_matches_names() {
    let mut sh = shell();
    sh.setup(&["touch a.txt b.log c.txt"]);
    sh.run("find / -name *.txt")
        .passes()
        .stdout_eq("a.txt\nc.txt\n");
}
