// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage error types.

use std::io;
use thiserror::Error;

/// Errors that can occur in VFS operations
#[derive(Debug, Error)]
pub enum VfsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("no such file or directory: {0}")]
    NotFound(String),
    #[error("file exists: {0}")]
    AlreadyExists(String),
    #[error("invalid file name: {0:?}")]
    InvalidName(String),
    #[error("not a directory: {0}")]
    NotADirectory(String),
    #[error("is a directory: {0}")]
    IsADirectory(String),
    #[error("file table full ({capacity} entries)")]
    TableFull { capacity: usize },
    #[error("no space left: need {needed} contiguous blocks")]
    NoSpace { needed: usize },
    #[error("corrupt header: {0}")]
    Corrupt(String),
}

impl VfsError {
    /// True for the resource exhaustion family (entry table or blocks).
    pub fn is_exhausted(&self) -> bool {
        matches!(self, VfsError::TableFull { .. } | VfsError::NoSpace { .. })
    }
}
