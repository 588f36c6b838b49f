// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Background script jobs.
//!
//! Only a single-stage pipeline naming a VFS script runs as a genuine
//! task. Its program and input are loaded before spawning, so the task
//! touches the VFS only to commit redirected output.

use std::fs::File;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};
use vsh_storage::Vfs;

use super::redirect::{commit_vfs_output, open_host_file, read_host_input, read_vfs_input};
use super::{ExecError, Input, Output, RedirectTarget, Session, SharedOutput};
use crate::ast::Pipeline;
use crate::builtins;
use crate::job::TaskHandle;
use crate::script::Program;

/// Owned output destination of a background job.
enum JobSink {
    Host(File),
    Vfs {
        vfs: Arc<Mutex<Vfs>>,
        path: String,
        append: bool,
    },
    Shared(SharedOutput),
}

impl JobSink {
    fn run<F>(self, job: F) -> i32
    where
        F: FnOnce(&mut Output<'_>) -> i32,
    {
        match self {
            JobSink::Host(file) => job(&mut Output::File(file)),
            JobSink::Shared(shared) => job(&mut Output::Shared(shared)),
            JobSink::Vfs { vfs, path, append } => {
                let mut out = Output::capture();
                let code = job(&mut out);
                if let Err(e) = commit_vfs_output(&mut vfs.lock(), &path, out.into_captured(), append) {
                    warn!(path = %path, error = %e, "background job output lost");
                }
                code
            }
        }
    }
}

impl Session {
    /// Start `pipeline` as job `id`. `Ok(false)` means it must run in the
    /// foreground instead.
    pub(super) fn spawn_background(
        &mut self,
        id: u32,
        pipeline: &Pipeline,
    ) -> Result<bool, ExecError> {
        let [cmd] = pipeline.commands.as_slice() else {
            return Ok(false);
        };
        let Some(name) = cmd.name() else {
            return Ok(false);
        };
        let Some(runtime) = self.runtime.clone() else {
            return Ok(false);
        };
        if builtins::is_builtin(name) || self.jobs.is_full() {
            return Ok(false);
        }

        let (mut program, input) = {
            let vfs = self.vfs.lock();
            let Ok(source) = vfs.read_all(name) else {
                return Ok(false);
            };
            let Ok(program) = Program::load(&source) else {
                return Ok(false);
            };
            let input = match cmd.input_file.as_deref().map(RedirectTarget::classify) {
                Some(RedirectTarget::Vfs(path)) => read_vfs_input(&vfs, path)?,
                Some(RedirectTarget::Host(path)) => read_host_input(path)?,
                None => Vec::new(),
            };
            (program, input)
        };

        let sink = match cmd.output_file.as_deref().map(RedirectTarget::classify) {
            Some(RedirectTarget::Host(path)) => {
                JobSink::Host(open_host_file(path, cmd.append_output)?)
            }
            Some(RedirectTarget::Vfs(path)) => JobSink::Vfs {
                vfs: Arc::clone(&self.vfs),
                path: path.to_string(),
                append: cmd.append_output,
            },
            None => JobSink::Shared(self.job_output.clone()),
        };

        let handle = TaskHandle::spawn(&runtime, move || {
            let mut input = Input::buffer(input);
            sink.run(|out: &mut Output<'_>| program.run(&mut input, out))
        });

        let command = cmd.display_text();
        if self.jobs.add(Box::new(handle), id, &command, true).is_none() {
            warn!(job = id, %command, "job table full, task left untracked");
        }
        info!(job = id, %command, "started background job");
        Ok(true)
    }
}
