//! Store capacity limits.

use crate::prelude::*;
use vsh_storage::{BLOCK_SIZE, MAX_BLOCKS, MAX_FILES};

#[test]
fn entry_table_fills_up() {
    let mut sh = shell();
    // The root directory takes one slot.
    for i in 1..MAX_FILES {
        sh.run(&format!("touch f{i}")).passes();
    }

    let full = format!("touch f{MAX_FILES}");
    sh.run(&full)
        .code(1)
        .stdout_eq(&format!("touch: cannot create file 'f{MAX_FILES}'\n"));
    sh.run("cat f1").passes().stdout_eq("");
}

#[test]
fn block_exhaustion_leaves_old_contents() {
    let mut sh = shell();
    sh.session
        .vfs()
        .write("big", &vec![b'x'; (MAX_BLOCKS - 2) * BLOCK_SIZE])
        .unwrap();
    // Root owns one block; this takes the last free one.
    sh.setup(&["echo small > keep"]);

    sh.run("cp big big2")
        .code(1)
        .stdout_eq("cp: cannot create 'big2'\n");
    assert_eq!(sh.contents("keep"), "small\n");
    sh.run("cat big2").fails();
}
