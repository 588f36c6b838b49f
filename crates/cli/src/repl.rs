// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Read-eval-print loop.

use std::io::{BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use vsh_shell::Session;

pub const BANNER: &str = "Custom Shell v1.0\n\
Type 'help' for available commands, 'exit' or 'quit' to quit\n";

/// Interactive loop over a [`Session`].
///
/// Lines are read from `input`, which is also the terminal input handed
/// to each pipeline. Command output goes to `output`; pipeline setup
/// failures go to `errors`.
pub struct Repl<'a, R, W, E> {
    session: &'a mut Session,
    input: R,
    output: W,
    errors: E,
    banner: bool,
    /// Last prompt shown, reprinted after an interrupt.
    prompt: Arc<Mutex<String>>,
}

impl<'a, R: BufRead, W: Write, E: Write> Repl<'a, R, W, E> {
    pub fn new(session: &'a mut Session, input: R, output: W, errors: E) -> Self {
        Self {
            session,
            input,
            output,
            errors,
            banner: true,
            prompt: Arc::default(),
        }
    }

    pub fn banner(mut self, show: bool) -> Self {
        self.banner = show;
        self
    }

    /// Reprint the prompt on a fresh line whenever Ctrl-C is pressed,
    /// abandoning the partially typed line instead of exiting.
    pub fn handle_interrupts(self, runtime: &Handle) -> Self {
        let prompt = Arc::clone(&self.prompt);
        runtime.spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupt");
                let mut stdout = std::io::stdout();
                let _ = write!(stdout, "\n{}", prompt.lock());
                let _ = stdout.flush();
            }
        });
        self
    }

    /// Run until `exit`, `quit` or end of input. Returns the shell's exit
    /// status.
    pub fn run(mut self) -> std::io::Result<i32> {
        if self.banner {
            writeln!(self.output, "{BANNER}")?;
        }

        let mut line = String::new();
        loop {
            self.session.cleanup_jobs();

            let prompt = self.session.prompt();
            write!(self.output, "{prompt}")?;
            self.output.flush()?;
            *self.prompt.lock() = prompt;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(0);
            }

            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            if command == "exit" || command == "quit" {
                return Ok(0);
            }

            self.session.history_mut().add(command);
            if let Err(e) = self
                .session
                .execute_line(command, &mut self.input, &mut self.output)
            {
                warn!(line = command, error = %e, "pipeline aborted");
                writeln!(self.errors, "vsh: {e}")?;
            }
        }
    }
}

#[cfg(test)]
#[path = "repl_tests.rs"]
mod tests;
