//! Scripts stored in the VFS and run by name.

use crate::prelude::*;

#[test]
fn script_prints_and_exits() {
    let mut sh = shell();
    sh.session
        .vfs()
        .write(
            "tally",
            b"# running total\nset total 10\nadd total 5\nprint total\nprint done\nexit 3\n",
        )
        .unwrap();

    sh.run("tally").code(3).stdout_eq("15\ndone\n");
}

#[test]
fn script_written_through_shell() {
    let mut sh = shell();
    sh.setup(&["echo print hello > hi.vsh"]);
    sh.run("hi.vsh").passes().stdout_eq("hello\n");
}

#[test]
fn script_in_pipeline() {
    let mut sh = shell();
    sh.session
        .vfs()
        .write("shout", b"read who\nprint who\n")
        .unwrap();

    sh.run("echo Grace | shout | wc -c").passes().stdout_eq("6\n");
    sh.run_with_input("shout", "Linus\n").stdout_eq("Linus\n");
}

#[test]
fn empty_script_cannot_load() {
    let mut sh = shell();
    sh.setup(&["touch empty"]);
    sh.run("empty")
        .code(1)
        .stdout_eq("empty: failed to load script\n");
}

#[test]
fn background_without_runtime_runs_inline() {
    let mut sh = shell();
    sh.setup(&["echo print bg > job"]);
    sh.run("job &")
        .passes()
        .stdout_eq("[1] Started in background\nbg\n");
    sh.run("jobs").passes().stdout_eq("");
}
