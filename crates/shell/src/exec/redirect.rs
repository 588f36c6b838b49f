// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Redirection target classification and opening.

use std::fs::{File, OpenOptions};
use std::io;

use vsh_storage::{path, Vfs, VfsError};

use super::error::ExecError;
use super::stream::{Input, Output};

/// Prefix that forces a redirect onto the host filesystem.
pub const HOST_PREFIX: &str = "host:";

/// Where a redirection operand points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectTarget<'a> {
    /// A real file on the host. The prefix, if any, is stripped.
    Host(&'a str),
    Vfs(&'a str),
}

impl<'a> RedirectTarget<'a> {
    /// Drive-letter (`C:\x`), UNC (`\\srv\share`) and `host:`-prefixed
    /// operands are host paths; everything else lives in the VFS.
    pub fn classify(operand: &'a str) -> Self {
        if let Some(rest) = operand.strip_prefix(HOST_PREFIX) {
            return RedirectTarget::Host(rest);
        }
        let bytes = operand.as_bytes();
        let drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
        if drive || operand.starts_with(r"\\") {
            RedirectTarget::Host(operand)
        } else {
            RedirectTarget::Vfs(operand)
        }
    }
}

/// Open a host file for reading.
pub(crate) fn open_host_input<'a>(path: &str) -> Result<Input<'a>, ExecError> {
    File::open(path)
        .map(Input::file)
        .map_err(|source| redirect_error(path, source))
}

/// Whole content of a host file, for jobs that outlive the caller's streams.
pub(crate) fn read_host_input(path: &str) -> Result<Vec<u8>, ExecError> {
    std::fs::read(path).map_err(|source| redirect_error(path, source))
}

/// Open (create, truncate or append) a host file for writing.
pub(crate) fn open_host_file(path: &str, append: bool) -> Result<File, ExecError> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .append(append)
        .truncate(!append)
        .open(path)
        .map_err(|source| redirect_error(path, source))
}

pub(crate) fn open_host_output<'a>(path: &str, append: bool) -> Result<Output<'a>, ExecError> {
    open_host_file(path, append).map(Output::File)
}

fn redirect_error(path: &str, source: io::Error) -> ExecError {
    ExecError::Redirect {
        path: path.to_string(),
        source,
    }
}

/// Whole content of a VFS input file. A missing file reads as empty.
pub(crate) fn read_vfs_input(vfs: &Vfs, path: &str) -> Result<Vec<u8>, VfsError> {
    match vfs.read_all(path) {
        Ok(bytes) => Ok(bytes),
        Err(VfsError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

/// Store captured output at `path`, creating the parent directory entry
/// named in the operand and appending to prior content when asked.
pub(crate) fn commit_vfs_output(
    vfs: &mut Vfs,
    path: &str,
    captured: Vec<u8>,
    append: bool,
) -> Result<(), VfsError> {
    if let Some(parent) = path::parent_name(path) {
        if !vfs.exists(parent) {
            if let Err(e) = vfs.create_dir(parent) {
                tracing::warn!(dir = parent, error = %e, "could not create parent directory");
            }
        }
    }

    let data = if append {
        match vfs.read_all(path) {
            Ok(mut existing) => {
                existing.extend_from_slice(&captured);
                existing
            }
            Err(VfsError::NotFound(_)) => captured,
            Err(e) => return Err(e),
        }
    } else {
        captured
    };
    vfs.write(path, &data)
}

#[cfg(test)]
#[path = "redirect_tests.rs"]
mod tests;
