//! Input and output redirection.

use crate::prelude::*;

#[test]
fn write_then_append() {
    let mut sh = shell();
    sh.setup(&["echo first > log", "echo second >> log"]);
    assert_eq!(sh.contents("log"), "first\nsecond\n");

    sh.run("echo reset > log").passes();
    assert_eq!(sh.contents("log"), "reset\n");
}

#[test]
fn input_from_store() {
    let mut sh = shell();
    sh.setup(&["echo one two three > words"]);
    sh.run("wc -w < words").passes().stdout_eq("3\n");
}

#[test]
fn both_directions_on_one_stage() {
    let mut sh = shell();
    sh.setup(&["echo b > in", "echo a >> in", "sort < in > out"]);
    assert_eq!(sh.contents("out"), "a\nb\n");
}

#[test]
fn redirect_wins_over_pipe() {
    let mut sh = shell();
    sh.run("echo side > file | wc -c").passes().stdout_eq("0\n");
    assert_eq!(sh.contents("file"), "side\n");
}

#[test]
fn host_files_round_trip() {
    let mut sh = shell();
    let host = sh.host_path("export.txt");

    sh.setup(&["echo exported > local"]);
    sh.run(&format!("cat local > host:{host}")).passes();
    assert_eq!(std::fs::read_to_string(&host).unwrap(), "exported\n");

    sh.run(&format!("cat < host:{host}"))
        .passes()
        .stdout_eq("exported\n");
}

#[test]
fn dev_null_is_an_ordinary_store_path() {
    let mut sh = shell();
    sh.run("echo b > /dev/null").passes().stdout_eq("");
    sh.run("cat /dev/null").passes().stdout_eq("b\n");
    assert!(sh.session.vfs().stat("dev").unwrap().is_dir());
}
