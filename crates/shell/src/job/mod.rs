// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background job tracking

mod manager;
mod task;

pub use manager::{Job, JobManager, DEFAULT_MAX_JOBS};
pub use task::TaskHandle;

// Scriptable handle for the manager tests
#[cfg(test)]
mod fake;
#[cfg(test)]
pub(crate) use fake::FakeJobHandle;

use std::io;

/// Something a job can be polled on without blocking.
pub trait JobHandle: Send {
    /// `Ok(Some(code))` once finished, `Ok(None)` while still running.
    fn try_wait(&mut self) -> io::Result<Option<i32>>;
}
