// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job handle for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use super::JobHandle;

#[derive(Debug, Default)]
struct FakeJobState {
    exit_code: Option<i32>,
    fail_polls: bool,
    polls: usize,
}

/// Job handle driven by the test. Clones share state, so a test keeps one
/// clone to finish the job while the manager owns another.
#[derive(Debug, Clone, Default)]
pub struct FakeJobHandle {
    inner: Arc<Mutex<FakeJobState>>,
}

impl FakeJobHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle that has already finished with `code`.
    pub fn finished(code: i32) -> Self {
        let handle = Self::new();
        handle.finish(code);
        handle
    }

    pub fn finish(&self, code: i32) {
        self.inner.lock().exit_code = Some(code);
    }

    /// Make subsequent polls return an error.
    pub fn fail_polls(&self, fail: bool) {
        self.inner.lock().fail_polls = fail;
    }

    pub fn poll_count(&self) -> usize {
        self.inner.lock().polls
    }

    pub fn boxed(&self) -> Box<dyn JobHandle> {
        Box::new(self.clone())
    }
}

impl JobHandle for FakeJobHandle {
    fn try_wait(&mut self) -> io::Result<Option<i32>> {
        let mut state = self.inner.lock();
        state.polls += 1;
        if state.fail_polls {
            return Err(io::Error::other("fake poll failure"));
        }
        Ok(state.exit_code)
    }
}
