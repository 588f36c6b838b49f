// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-capacity job table.

use tracing::{debug, warn};

use super::JobHandle;

pub const DEFAULT_MAX_JOBS: usize = 64;

/// A tracked job.
pub struct Job {
    handle: Box<dyn JobHandle>,
    pub id: u32,
    pub command: String,
    pub background: bool,
    pub running: bool,
    pub exit_code: Option<i32>,
}

impl std::fmt::Debug for Job {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Job")
            .field("id", &self.id)
            .field("command", &self.command)
            .field("background", &self.background)
            .field("running", &self.running)
            .field("exit_code", &self.exit_code)
            .finish_non_exhaustive()
    }
}

impl Job {
    /// Poll the handle if the job is still marked running. Returns whether
    /// it is still running afterwards. A poll error keeps it running.
    fn poll(&mut self) -> bool {
        if !self.running {
            return false;
        }
        match self.handle.try_wait() {
            Ok(Some(code)) => {
                debug!(job = self.id, code, "job finished");
                self.running = false;
                self.exit_code = Some(code);
                false
            }
            Ok(None) => true,
            Err(e) => {
                warn!(job = self.id, error = %e, "failed to poll job");
                true
            }
        }
    }
}

/// Registry of jobs, bounded by a capacity fixed at construction.
#[derive(Debug)]
pub struct JobManager {
    jobs: Vec<Job>,
    capacity: usize,
    next_id: u32,
}

impl Default for JobManager {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_JOBS)
    }
}

impl JobManager {
    pub fn new(capacity: usize) -> Self {
        Self {
            jobs: Vec::new(),
            capacity,
            next_id: 1,
        }
    }

    /// Allocate a fresh job id.
    pub fn next_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    /// Register a job. Returns its index, or `None` when the table is full
    /// (in which case nothing is recorded and `handle` is dropped).
    pub fn add(
        &mut self,
        handle: Box<dyn JobHandle>,
        id: u32,
        command: &str,
        background: bool,
    ) -> Option<usize> {
        if self.is_full() {
            warn!(id, capacity = self.capacity, "job table full");
            return None;
        }
        self.jobs.push(Job {
            handle,
            id,
            command: command.to_string(),
            background,
            running: true,
            exit_code: None,
        });
        Some(self.jobs.len() - 1)
    }

    /// Drop the job with `id`, shifting later jobs down.
    pub fn remove(&mut self, id: u32) -> bool {
        match self.jobs.iter().position(|j| j.id == id) {
            Some(idx) => {
                self.jobs.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, id: u32) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Poll every job and remove those that have terminated. Returns the
    /// removed jobs, oldest first.
    pub fn cleanup_finished(&mut self) -> Vec<Job> {
        for job in &mut self.jobs {
            job.poll();
        }
        let (finished, running): (Vec<Job>, Vec<Job>) = std::mem::take(&mut self.jobs)
            .into_iter()
            .partition(|j| !j.running);
        self.jobs = running;
        finished
    }

    /// Poll and count active jobs. Finished ones are marked inactive but
    /// stay listed until [`cleanup_finished`](Self::cleanup_finished).
    pub fn running_count(&mut self) -> usize {
        self.jobs.iter_mut().map(Job::poll).filter(|running| *running).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.jobs.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
