// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline executor.
//!
//! A [`Session`] owns everything a command line can touch: the VFS, the
//! history, and the job table. Each pipeline is run stage by stage; a
//! stage's output is captured in memory and handed to the next stage as
//! its input, so no stage ever blocks on another.
//!
//! ```no_run
//! use vsh_shell::Session;
//! use vsh_storage::Vfs;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = Session::new(Vfs::open("vfs.dat")?);
//! let mut stdin = std::io::stdin().lock();
//! let mut stdout = std::io::stdout();
//! let code = session.execute_line("echo hi > a.txt", &mut stdin, &mut stdout)?;
//! assert_eq!(code, 0);
//! # Ok(())
//! # }
//! ```

mod background;
pub mod error;
mod redirect;
mod stream;

use std::io::{BufRead, Write};
use std::sync::Arc;

use parking_lot::{Mutex, MutexGuard};
use tokio::runtime::Handle;
use tracing::{debug, info};
use vsh_storage::Vfs;

use crate::ast::{Command, Pipeline};
use crate::builtins::{self, BuiltinContext};
use crate::history::History;
use crate::job::{Job, JobManager};
use crate::parser::parse_line;
use crate::script::Program;

pub use error::ExecError;
pub use redirect::{RedirectTarget, HOST_PREFIX};
pub use stream::{Input, Output, SharedOutput};

use redirect::{commit_vfs_output, open_host_input, open_host_output, read_vfs_input};

/// Interactive shell state.
///
/// Built with [`Session::new`] and configured with the builder methods.
/// Background scripts run on the tokio runtime captured at construction
/// (or set with [`Session::runtime`]); without one they run in the
/// foreground.
#[derive(Debug)]
pub struct Session {
    vfs: Arc<Mutex<Vfs>>,
    history: History,
    jobs: JobManager,
    runtime: Option<Handle>,
    /// Where background jobs without an output redirect write.
    job_output: SharedOutput,
}

impl Session {
    pub fn new(vfs: Vfs) -> Self {
        Self {
            vfs: Arc::new(Mutex::new(vfs)),
            history: History::default(),
            jobs: JobManager::default(),
            runtime: Handle::try_current().ok(),
            job_output: SharedOutput::stdout(),
        }
    }

    /// Bound the history. Replaces any recorded lines.
    pub fn history_size(mut self, capacity: usize) -> Self {
        self.history = History::new(capacity);
        self
    }

    /// Bound the job table. Replaces any tracked jobs.
    pub fn max_jobs(mut self, capacity: usize) -> Self {
        self.jobs = JobManager::new(capacity);
        self
    }

    /// Runtime for background scripts; `None` runs them in the foreground.
    pub fn runtime(mut self, runtime: Option<Handle>) -> Self {
        self.runtime = runtime;
        self
    }

    pub fn job_output(mut self, output: SharedOutput) -> Self {
        self.job_output = output;
        self
    }

    /// `<cwd>> `
    pub fn prompt(&self) -> String {
        format!("{}> ", self.vfs.lock().current_dir())
    }

    pub fn vfs(&self) -> MutexGuard<'_, Vfs> {
        self.vfs.lock()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn jobs(&self) -> &JobManager {
        &self.jobs
    }

    pub fn jobs_mut(&mut self) -> &mut JobManager {
        &mut self.jobs
    }

    /// Reap finished background jobs.
    pub fn cleanup_jobs(&mut self) -> Vec<Job> {
        let finished = self.jobs.cleanup_finished();
        for job in &finished {
            info!(job = job.id, code = ?job.exit_code, command = %job.command, "background job finished");
        }
        finished
    }

    /// Parse and run one command line. A blank line is exit code 0.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
    ) -> Result<i32, ExecError> {
        match parse_line(line) {
            Some(pipeline) => self.execute_pipeline(&pipeline, stdin, stdout),
            None => Ok(0),
        }
    }

    /// Run each stage in order and return the last stage's exit code.
    pub fn execute_pipeline(
        &mut self,
        pipeline: &Pipeline,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
    ) -> Result<i32, ExecError> {
        let Some(last) = pipeline.len().checked_sub(1) else {
            return Ok(0);
        };

        if pipeline.is_background() {
            let id = self.jobs.next_id();
            writeln!(stdout, "[{id}] Started in background")?;
            stdout.flush()?;
            if self.spawn_background(id, pipeline)? {
                return Ok(0);
            }
            debug!(job = id, "running background pipeline in the foreground");
        }

        let mut piped: Option<Vec<u8>> = None;
        let mut code = 0;
        for (i, cmd) in pipeline.commands.iter().enumerate() {
            let mut input = match piped.take() {
                Some(bytes) => Input::buffer(bytes),
                None => Input::Inherited(&mut *stdin),
            };
            let mut output = if i == last {
                Output::Inherited(&mut *stdout)
            } else {
                Output::capture()
            };
            code = self.execute_command(cmd, &mut input, &mut output)?;
            if i < last {
                piped = Some(output.into_captured());
            }
        }
        Ok(code)
    }

    /// Run one stage. Explicit redirections replace the wired streams.
    fn execute_command<'i, 'o>(
        &mut self,
        cmd: &Command,
        input: &mut Input<'i>,
        output: &mut Output<'o>,
    ) -> Result<i32, ExecError> {
        let Some(name) = cmd.name() else {
            return Ok(0);
        };

        let mut own_input: Option<Input<'i>> = None;
        let input = match cmd.input_file.as_deref().map(RedirectTarget::classify) {
            Some(RedirectTarget::Host(path)) => own_input.insert(open_host_input(path)?),
            Some(RedirectTarget::Vfs(path)) => {
                let bytes = read_vfs_input(&self.vfs.lock(), path)?;
                own_input.insert(Input::buffer(bytes))
            }
            None => input,
        };

        let mut own_output: Option<Output<'o>> = None;
        let mut vfs_target = None;
        let output = match cmd.output_file.as_deref().map(RedirectTarget::classify) {
            Some(RedirectTarget::Host(path)) => {
                own_output.insert(open_host_output(path, cmd.append_output)?)
            }
            Some(RedirectTarget::Vfs(path)) => {
                vfs_target = Some(path);
                own_output.insert(Output::capture())
            }
            None => output,
        };

        let code = self.dispatch(cmd, name, input, output)?;
        output.flush()?;

        if let (Some(path), Some(captured)) = (vfs_target, own_output) {
            commit_vfs_output(
                &mut self.vfs.lock(),
                path,
                captured.into_captured(),
                cmd.append_output,
            )?;
        }
        debug!(command = name, code, "command finished");
        Ok(code)
    }

    /// Builtin, else a VFS script of that name, else "command not found".
    fn dispatch(
        &mut self,
        cmd: &Command,
        name: &str,
        input: &mut Input<'_>,
        output: &mut Output<'_>,
    ) -> Result<i32, ExecError> {
        let mut vfs = self.vfs.lock();
        if builtins::is_builtin(name) {
            let mut ctx = BuiltinContext {
                vfs: &mut vfs,
                history: &self.history,
                jobs: &mut self.jobs,
            };
            return Ok(builtins::dispatch(&mut ctx, cmd, input, output));
        }

        if !vfs.exists(name) {
            drop(vfs);
            writeln!(output, "{name}: command not found")?;
            return Ok(1);
        }
        let source = vfs.read_all(name)?;
        drop(vfs);

        match Program::load(&source) {
            Ok(mut program) => {
                debug!(script = name, instructions = program.len(), "running script");
                Ok(program.run(input, output))
            }
            Err(e) => {
                debug!(script = name, error = %e, "script failed to load");
                writeln!(output, "{name}: failed to load script")?;
                Ok(1)
            }
        }
    }
}

#[cfg(test)]
#[path = "../exec_tests/mod.rs"]
mod tests;
