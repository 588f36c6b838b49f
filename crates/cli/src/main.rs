// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vsh - interactive shell over an embedded virtual filesystem

mod config;
mod env;
mod repl;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use vsh_shell::Session;
use vsh_storage::Vfs;

use crate::config::{Config, Overrides, DEFAULT_LOG_LEVEL};
use crate::repl::Repl;

/// How long background jobs get to finish once the shell exits.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

#[derive(Parser)]
#[command(
    name = "vsh",
    version,
    about = "Interactive shell over an embedded virtual filesystem"
)]
struct Cli {
    /// Store file, created if missing [default: vfs.dat]
    vfs_file: Option<PathBuf>,

    /// Config file [default: ~/.config/vsh/config.toml]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `vsh_storage=trace`
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,
}

impl From<Cli> for Overrides {
    fn from(cli: Cli) -> Self {
        Self {
            vfs_file: cli.vfs_file,
            config: cli.config,
            log_level: cli.log_level,
            no_banner: cli.no_banner,
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", format_error(&e));
        std::process::exit(1);
    }
}

/// Format an error for display, avoiding duplicate messages.
///
/// Errors that embed their source in the top-level message would print it
/// twice with anyhow's `{:#}`; only print causes that add information.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let mut buf = top.clone();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !top.contains(&cause) {
            buf.push_str(": ");
            buf.push_str(&cause);
        }
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.into())?;
    let _guard = setup_logging(&config)?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let vfs = Vfs::open(&config.vfs_file)
        .with_context(|| format!("cannot open {}", config.vfs_file.display()))?;
    info!(
        vfs = %config.vfs_file.display(),
        files = vfs.num_files(),
        "session started"
    );

    let mut session = Session::new(vfs)
        .history_size(config.history_size)
        .max_jobs(config.max_jobs)
        .runtime(Some(runtime.handle().clone()));

    let code = Repl::new(
        &mut session,
        std::io::stdin().lock(),
        std::io::stdout(),
        std::io::stderr(),
    )
    .banner(config.banner)
    .handle_interrupts(runtime.handle())
    .run()?;

    runtime.shutdown_timeout(SHUTDOWN_GRACE);
    session.vfs().sync().context("failed to save store")?;
    info!(code, "session ended");
    Ok(())
}

fn setup_logging(config: &Config) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(&config.state_dir)
        .with_context(|| format!("cannot create {}", config.state_dir.display()))?;

    let file_name = config
        .log_path
        .file_name()
        .context("log path has no file name")?;
    let file_appender = tracing_appender::rolling::never(&config.state_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
