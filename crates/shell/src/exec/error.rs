// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors that abort a pipeline.

use std::io;
use thiserror::Error;
use vsh_storage::VfsError;

/// Failures while wiring or finishing a pipeline.
///
/// Problems a command reports itself (missing operand, unknown file) are
/// not errors here; they are written to the command's output and show up
/// in its exit code.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{path}: {source}")]
    Redirect {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("storage error: {0}")]
    Storage(#[from] VfsError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
