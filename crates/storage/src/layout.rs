// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed on-disk layout of the VFS store.
//!
//! The store is a single host file: a fixed-size header followed by
//! [`MAX_BLOCKS`] data blocks of [`BLOCK_SIZE`] bytes each. The header
//! embeds the whole entry table and the allocation bitmap inline:
//!
//! ```text
//! magic[8] block_size num_blocks num_files root_dir free_list
//! entries[MAX_FILES]   name[256] kind size first_block parent_dir created modified
//! bitmap[MAX_BLOCKS / 8]
//! ```
//!
//! All integers are little-endian `u32`.

use crate::alloc::BlockMap;
use crate::error::VfsError;

/// Magic tag: the 7 bytes `VFS001\n` plus a NUL pad.
pub const MAGIC: &[u8; 8] = b"VFS001\n\0";

pub const MAX_FILENAME: usize = 256;
pub const MAX_PATH: usize = 512;
pub const BLOCK_SIZE: usize = 4096;
pub const MAX_BLOCKS: usize = 1024;
pub const MAX_FILES: usize = 256;

const ENTRY_SIZE: usize = MAX_FILENAME + 6 * 4;
const FIXED_FIELDS: usize = MAGIC.len() + 5 * 4;
const BITMAP_SIZE: usize = MAX_BLOCKS / 8;

/// Size in bytes of the persisted header.
pub const HEADER_SIZE: usize = FIXED_FIELDS + MAX_FILES * ENTRY_SIZE + BITMAP_SIZE;

/// Size in bytes of the whole store file (header + data region).
pub const STORE_SIZE: u64 = (HEADER_SIZE + MAX_BLOCKS * BLOCK_SIZE) as u64;

/// Byte offset of a data block within the store file.
pub fn block_offset(block: usize) -> u64 {
    (HEADER_SIZE + block * BLOCK_SIZE) as u64
}

/// Number of blocks an entry of `len` bytes occupies (at least one).
pub fn blocks_for(len: usize) -> usize {
    len.div_ceil(BLOCK_SIZE).max(1)
}

/// Kind of a VFS entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Script,
}

impl FileKind {
    fn to_raw(self) -> u32 {
        match self {
            FileKind::Regular => 0,
            FileKind::Directory => 1,
            FileKind::Script => 2,
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(FileKind::Regular),
            1 => Some(FileKind::Directory),
            2 => Some(FileKind::Script),
            _ => None,
        }
    }

    /// Human-readable name as shown by `stat`.
    pub fn describe(self) -> &'static str {
        match self {
            FileKind::Regular => "regular file",
            FileKind::Directory => "directory",
            FileKind::Script => "script",
        }
    }
}

/// Metadata record for one VFS entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: FileKind,
    pub size: u32,
    pub first_block: u32,
    pub parent_dir: u32,
    pub created_time: u32,
    pub modified_time: u32,
}

impl FileEntry {
    /// Blocks owned by this entry: `first_block..first_block + block_count()`.
    pub fn block_count(&self) -> usize {
        blocks_for(self.size as usize)
    }

    pub fn extent(&self) -> std::ops::Range<usize> {
        let start = self.first_block as usize;
        start..start + self.block_count()
    }

    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }

    fn encode(&self, buf: &mut [u8]) {
        let name = self.name.as_bytes();
        let len = name.len().min(MAX_FILENAME - 1);
        buf[..len].copy_from_slice(&name[..len]);
        buf[len..MAX_FILENAME].fill(0);

        let mut cursor = MAX_FILENAME;
        for value in [
            self.kind.to_raw(),
            self.size,
            self.first_block,
            self.parent_dir,
            self.created_time,
            self.modified_time,
        ] {
            put_u32(buf, cursor, value);
            cursor += 4;
        }
    }

    fn decode(buf: &[u8], index: usize) -> Result<Self, VfsError> {
        let name_len = buf[..MAX_FILENAME]
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(MAX_FILENAME - 1);
        let name = String::from_utf8_lossy(&buf[..name_len]).into_owned();

        let raw_kind = get_u32(buf, MAX_FILENAME);
        let kind = FileKind::from_raw(raw_kind).ok_or_else(|| {
            VfsError::Corrupt(format!("entry {index} has unknown kind {raw_kind}"))
        })?;

        let entry = FileEntry {
            name,
            kind,
            size: get_u32(buf, MAX_FILENAME + 4),
            first_block: get_u32(buf, MAX_FILENAME + 8),
            parent_dir: get_u32(buf, MAX_FILENAME + 12),
            created_time: get_u32(buf, MAX_FILENAME + 16),
            modified_time: get_u32(buf, MAX_FILENAME + 20),
        };
        if entry.extent().end > MAX_BLOCKS {
            return Err(VfsError::Corrupt(format!(
                "entry {index} ({}) extends past block {MAX_BLOCKS}",
                entry.name
            )));
        }
        Ok(entry)
    }
}

/// In-memory image of the persisted header.
#[derive(Debug, Clone)]
pub struct Header {
    pub block_size: u32,
    pub num_blocks: u32,
    pub root_dir: u32,
    pub free_list: u32,
    pub entries: Vec<FileEntry>,
    pub blocks: BlockMap,
}

impl Header {
    /// Fresh header holding only the root directory, which owns block 0.
    pub fn new(now: u32) -> Self {
        let mut blocks = BlockMap::new(MAX_BLOCKS);
        blocks.mark(0..1);
        Self {
            block_size: BLOCK_SIZE as u32,
            num_blocks: MAX_BLOCKS as u32,
            root_dir: 0,
            free_list: 1,
            entries: vec![FileEntry {
                name: "/".to_string(),
                kind: FileKind::Directory,
                size: 0,
                first_block: 0,
                parent_dir: 0,
                created_time: now,
                modified_time: now,
            }],
            blocks,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut buf = vec![0u8; HEADER_SIZE];
        buf[..MAGIC.len()].copy_from_slice(MAGIC);
        put_u32(&mut buf, 8, self.block_size);
        put_u32(&mut buf, 12, self.num_blocks);
        put_u32(&mut buf, 16, self.entries.len() as u32);
        put_u32(&mut buf, 20, self.root_dir);
        put_u32(&mut buf, 24, self.free_list);

        for (i, entry) in self.entries.iter().enumerate() {
            let start = FIXED_FIELDS + i * ENTRY_SIZE;
            entry.encode(&mut buf[start..start + ENTRY_SIZE]);
        }

        let bitmap_start = FIXED_FIELDS + MAX_FILES * ENTRY_SIZE;
        buf[bitmap_start..].copy_from_slice(&self.blocks.to_bytes());
        buf
    }

    /// Decode and validate a header image.
    ///
    /// Any mismatch (magic, geometry, entry count, entry extents) is reported
    /// as [`VfsError::Corrupt`]; the caller recreates the store.
    pub fn decode(buf: &[u8]) -> Result<Self, VfsError> {
        if buf.len() < HEADER_SIZE {
            return Err(VfsError::Corrupt(format!(
                "header truncated: {} of {HEADER_SIZE} bytes",
                buf.len()
            )));
        }
        if &buf[..MAGIC.len()] != MAGIC {
            return Err(VfsError::Corrupt("bad magic".to_string()));
        }

        let block_size = get_u32(buf, 8);
        let num_blocks = get_u32(buf, 12);
        if block_size as usize != BLOCK_SIZE || num_blocks as usize != MAX_BLOCKS {
            return Err(VfsError::Corrupt(format!(
                "geometry {block_size}x{num_blocks} does not match {BLOCK_SIZE}x{MAX_BLOCKS}"
            )));
        }
        let num_files = get_u32(buf, 16) as usize;
        if num_files > MAX_FILES {
            return Err(VfsError::Corrupt(format!(
                "entry count {num_files} exceeds {MAX_FILES}"
            )));
        }

        let entries = (0..num_files)
            .map(|i| {
                let start = FIXED_FIELDS + i * ENTRY_SIZE;
                FileEntry::decode(&buf[start..start + ENTRY_SIZE], i)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bitmap_start = FIXED_FIELDS + MAX_FILES * ENTRY_SIZE;
        let blocks = BlockMap::from_bytes(&buf[bitmap_start..HEADER_SIZE], MAX_BLOCKS);

        Ok(Self {
            block_size,
            num_blocks,
            root_dir: get_u32(buf, 20),
            free_list: get_u32(buf, 24),
            entries,
            blocks,
        })
    }
}

fn put_u32(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

fn get_u32(buf: &[u8], at: usize) -> u32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&buf[at..at + 4]);
    u32::from_le_bytes(raw)
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
