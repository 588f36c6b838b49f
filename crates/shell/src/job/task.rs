// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job handle for work running on the tokio blocking pool.

use std::io;

use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use super::JobHandle;

/// Handle to a closure running via `spawn_blocking`. The closure's return
/// value is its exit code.
pub struct TaskHandle {
    task: JoinHandle<()>,
    status: oneshot::Receiver<i32>,
    exit_code: Option<i32>,
}

impl TaskHandle {
    pub fn spawn<F>(runtime: &Handle, work: F) -> Self
    where
        F: FnOnce() -> i32 + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let task = runtime.spawn_blocking(move || {
            let _ = tx.send(work());
        });
        Self {
            task,
            status: rx,
            exit_code: None,
        }
    }
}

impl JobHandle for TaskHandle {
    fn try_wait(&mut self) -> io::Result<Option<i32>> {
        if self.exit_code.is_some() {
            return Ok(self.exit_code);
        }
        match self.status.try_recv() {
            Ok(code) => {
                self.exit_code = Some(code);
                Ok(Some(code))
            }
            Err(TryRecvError::Empty) => Ok(None),
            // The closure panicked before reporting a code.
            Err(TryRecvError::Closed) if self.task.is_finished() => {
                self.exit_code = Some(1);
                Ok(Some(1))
            }
            Err(TryRecvError::Closed) => Err(io::Error::other("job status channel closed")),
        }
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
