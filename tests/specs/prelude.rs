//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL over a [`Session`] backed by a temporary store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use tempfile::TempDir;
use vsh_shell::Session;
use vsh_storage::Vfs;

/// Start a shell on an empty store.
pub fn shell() -> Shell {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("vfs.dat");
    let session = Session::new(Vfs::open(&path).unwrap()).runtime(None);
    Shell { dir, path, session }
}

/// A session plus the temporary directory holding its store.
pub struct Shell {
    dir: TempDir,
    path: PathBuf,
    pub session: Session,
}

impl Shell {
    /// Run one command line with no terminal input.
    pub fn run(&mut self, line: &str) -> RunAssert {
        self.run_with_input(line, "")
    }

    /// Run one command line with `stdin` as terminal input.
    pub fn run_with_input(&mut self, line: &str, stdin: &str) -> RunAssert {
        let mut input = Cursor::new(stdin.as_bytes().to_vec());
        let mut out: Vec<u8> = Vec::new();
        let code = self
            .session
            .execute_line(line, &mut input, &mut out)
            .unwrap_or_else(|e| panic!("`{line}` aborted: {e}"));
        RunAssert {
            line: line.to_string(),
            code,
            stdout: String::from_utf8_lossy(&out).into_owned(),
        }
    }

    /// Run each line and expect every one to pass.
    pub fn setup(&mut self, lines: &[&str]) -> &mut Self {
        for line in lines {
            self.run(line).passes();
        }
        self
    }

    /// Close the store and open it again from disk.
    pub fn reopen(&mut self) {
        let vfs = Vfs::open(&self.path).unwrap();
        self.session = Session::new(vfs).runtime(None);
    }

    pub fn host_path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    /// Raw contents of a stored file.
    pub fn contents(&self, path: &str) -> String {
        String::from_utf8(self.session.vfs().read_all(path).unwrap()).unwrap()
    }
}

/// Result of one command line for chaining assertions.
pub struct RunAssert {
    line: String,
    code: i32,
    stdout: String,
}

impl RunAssert {
    /// Expect exit code 0.
    pub fn passes(self) -> Self {
        assert_eq!(
            self.code, 0,
            "expected `{}` to pass\nstdout: {}",
            self.line, self.stdout
        );
        self
    }

    /// Expect a non-zero exit code.
    pub fn fails(self) -> Self {
        assert_ne!(
            self.code, 0,
            "expected `{}` to fail\nstdout: {}",
            self.line, self.stdout
        );
        self
    }

    pub fn code(self, expected: i32) -> Self {
        assert_eq!(self.code, expected, "exit code of `{}`", self.line);
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    pub fn stdout_eq(self, expected: &str) -> Self {
        similar_asserts::assert_eq!(self.stdout, expected);
        self
    }

    pub fn stdout_has(self, expected: &str) -> Self {
        assert!(
            self.stdout.contains(expected),
            "stdout of `{}` does not contain {expected:?}:\n{}",
            self.line,
            self.stdout
        );
        self
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }
}
