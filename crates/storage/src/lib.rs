// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Embedded block-based virtual filesystem for vsh

mod alloc;
mod error;
mod layout;
pub mod path;
mod vfs;

pub use alloc::BlockMap;
pub use error::VfsError;
pub use layout::{
    blocks_for, FileEntry, FileKind, BLOCK_SIZE, HEADER_SIZE, MAX_BLOCKS, MAX_FILENAME, MAX_FILES,
    MAX_PATH, STORE_SIZE,
};
pub use vfs::{Vfs, MAX_FILE_SIZE};
