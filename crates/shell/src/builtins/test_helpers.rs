// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixture for builtin tests.

use tempfile::TempDir;
use vsh_storage::Vfs;

use super::{dispatch, BuiltinContext};
use crate::exec::{Input, Output};
use crate::history::History;
use crate::job::JobManager;
use crate::parser::parse_line;

pub(crate) struct Harness {
    _dir: TempDir,
    pub vfs: Vfs,
    pub history: History,
    pub jobs: JobManager,
}

impl Harness {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let vfs = Vfs::open(dir.path().join("vfs.dat")).unwrap();
        Self {
            _dir: dir,
            vfs,
            history: History::default(),
            jobs: JobManager::default(),
        }
    }

    pub fn file(&mut self, path: &str, content: &str) -> &mut Self {
        self.vfs.write(path, content.as_bytes()).unwrap();
        self
    }

    /// Run one builtin with no wired input.
    pub fn run(&mut self, line: &str) -> (i32, String) {
        let mut stdin = std::io::empty();
        self.exec(line, Input::Inherited(&mut stdin))
    }

    /// Run one builtin with `text` wired to its input, as from a pipe.
    pub fn pipe(&mut self, text: &str, line: &str) -> (i32, String) {
        self.exec(line, Input::buffer(text.as_bytes()))
    }

    fn exec(&mut self, line: &str, mut input: Input<'_>) -> (i32, String) {
        let pipeline = parse_line(line).unwrap();
        let mut output = Output::capture();
        let mut ctx = BuiltinContext {
            vfs: &mut self.vfs,
            history: &self.history,
            jobs: &mut self.jobs,
        };
        let code = dispatch(&mut ctx, &pipeline.commands[0], &mut input, &mut output);
        (code, String::from_utf8(output.into_captured()).unwrap())
    }
}
