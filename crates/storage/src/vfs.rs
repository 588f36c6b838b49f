// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Block-based virtual filesystem backed by a single host file.
//!
//! The namespace is flat: every operation looks entries up by the final
//! component of the resolved path, so `/a/x` and `/b/x` name the same
//! entry. Each entry owns one contiguous run of blocks sized to its
//! content. Mutations rewrite the whole header and sync before returning.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::error::VfsError;
use crate::layout::{
    block_offset, blocks_for, FileEntry, FileKind, Header, BLOCK_SIZE, HEADER_SIZE, MAX_BLOCKS,
    MAX_FILENAME, MAX_FILES, STORE_SIZE,
};
use crate::path;

/// Largest payload a single entry can hold.
pub const MAX_FILE_SIZE: usize = MAX_BLOCKS * BLOCK_SIZE;

/// An open VFS store.
#[derive(Debug)]
pub struct Vfs {
    file: File,
    path: PathBuf,
    header: Header,
    current_dir: String,
}

impl Vfs {
    /// Open the store at `path`, creating it when absent.
    ///
    /// A file whose header fails validation is moved aside to `<path>.bak` and a
    /// fresh store holding only the root directory takes its place.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, VfsError> {
        let path = path.into();
        match load_header(&path)? {
            Some(header) => {
                let file = OpenOptions::new().read(true).write(true).open(&path)?;
                if file.metadata()?.len() < STORE_SIZE {
                    file.set_len(STORE_SIZE)?;
                }
                debug!(
                    path = %path.display(),
                    entries = header.entries.len(),
                    "opened VFS store"
                );
                Ok(Self {
                    file,
                    path,
                    header,
                    current_dir: "/".to_string(),
                })
            }
            None => Self::create_store(path),
        }
    }

    fn create_store(path: PathBuf) -> Result<Self, VfsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        file.set_len(STORE_SIZE)?;

        let vfs = Self {
            file,
            path,
            header: Header::new(now()),
            current_dir: "/".to_string(),
        };
        vfs.persist()?;
        info!(path = %vfs.path.display(), "created VFS store");
        Ok(vfs)
    }

    /// Host path of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    /// Resolve `path` against the current directory.
    pub fn resolve(&self, path: &str) -> String {
        path::resolve(&self.current_dir, path)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.index_of(path).is_some()
    }

    pub fn stat(&self, path: &str) -> Option<&FileEntry> {
        self.index_of(path).map(|i| &self.header.entries[i])
    }

    /// The whole entry table, root first.
    pub fn entries(&self) -> &[FileEntry] {
        &self.header.entries
    }

    /// Entries visible from `dir`. The namespace is flat, so this is
    /// always the full table regardless of `dir`.
    pub fn list(&self, _dir: &str) -> Vec<FileEntry> {
        self.header.entries.clone()
    }

    pub fn num_files(&self) -> usize {
        self.header.entries.len()
    }

    pub fn block_used(&self, block: usize) -> bool {
        self.header.blocks.is_used(block)
    }

    pub fn blocks_in_use(&self) -> usize {
        self.header.blocks.used_count()
    }

    /// Create an empty entry of `kind`. Allocates one block.
    pub fn create(&mut self, path: &str, kind: FileKind) -> Result<(), VfsError> {
        let resolved = self.resolve(path);
        let name = valid_name(&resolved)?;
        if self.find(name).is_some() {
            return Err(VfsError::AlreadyExists(name.to_string()));
        }
        self.ensure_table_room()?;
        let block = self
            .header
            .blocks
            .find_run(1, 0..0)
            .ok_or(VfsError::NoSpace { needed: 1 })?;

        let ts = now();
        self.header.entries.push(FileEntry {
            name: name.to_string(),
            kind,
            size: 0,
            first_block: block as u32,
            parent_dir: self.header.root_dir,
            created_time: ts,
            modified_time: ts,
        });
        self.header.blocks.mark(block..block + 1);
        debug!(name, ?kind, block, "created entry");
        self.persist()
    }

    pub fn create_dir(&mut self, path: &str) -> Result<(), VfsError> {
        self.create(path, FileKind::Directory)
    }

    /// Read at most `max_len` bytes of the entry's content.
    pub fn read(&self, path: &str, max_len: usize) -> Result<Vec<u8>, VfsError> {
        let entry = self
            .stat(path)
            .ok_or_else(|| VfsError::NotFound(self.resolve(path)))?;
        let len = (entry.size as usize).min(max_len);
        let mut buf = vec![0u8; len];
        if len > 0 {
            let mut file = &self.file;
            file.seek(SeekFrom::Start(block_offset(entry.first_block as usize)))?;
            file.read_exact(&mut buf)?;
        }
        Ok(buf)
    }

    /// Read the entry's full content.
    pub fn read_all(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        self.read(path, usize::MAX)
    }

    /// Replace the entry's content with `data`, creating a regular file
    /// when absent.
    ///
    /// The extent grows in place when the following blocks are free and is
    /// otherwise moved to the first run that fits. When enough blocks are
    /// free but scattered, the store is compacted first. Only when the free
    /// blocks cannot hold `data` does the call fail with
    /// [`VfsError::NoSpace`], and then nothing changes.
    pub fn write(&mut self, path: &str, data: &[u8]) -> Result<(), VfsError> {
        let needed = blocks_for(data.len());
        if data.len() > MAX_FILE_SIZE {
            return Err(VfsError::NoSpace { needed });
        }
        let resolved = self.resolve(path);
        let name = valid_name(&resolved)?.to_string();

        let existing = self.find(&name);
        if existing.is_none() {
            self.ensure_table_room()?;
        }
        if let Some(idx) = existing {
            if self.header.entries[idx].is_dir() {
                return Err(VfsError::IsADirectory(name));
            }
        }

        let (mut old_extent, mut start) = self.place(existing, needed);
        if start.is_none() && self.free_blocks() + old_extent.len() >= needed {
            self.compact(existing)?;
            (old_extent, start) = self.place(existing, needed);
        }
        let start = start.ok_or(VfsError::NoSpace { needed })?;

        let mut file = &self.file;
        file.seek(SeekFrom::Start(block_offset(start)))?;
        file.write_all(data)?;

        let ts = now();
        match existing {
            Some(idx) => {
                let entry = &mut self.header.entries[idx];
                entry.first_block = start as u32;
                entry.size = data.len() as u32;
                entry.modified_time = ts;
            }
            None => self.header.entries.push(FileEntry {
                name: name.clone(),
                kind: FileKind::Regular,
                size: data.len() as u32,
                first_block: start as u32,
                parent_dir: self.header.root_dir,
                created_time: ts,
                modified_time: ts,
            }),
        }
        if old_extent.start != start {
            debug!(name = %name, from = old_extent.start, to = start, "relocated extent");
        }
        self.header.blocks.release(old_extent);
        self.header.blocks.mark(start..start + needed);
        self.persist()
    }

    /// Remove the entry and free its blocks. Later entries shift down.
    pub fn delete(&mut self, path: &str) -> Result<(), VfsError> {
        let idx = self
            .index_of(path)
            .ok_or_else(|| VfsError::NotFound(self.resolve(path)))?;
        let entry = self.header.entries.remove(idx);
        self.header.blocks.release(entry.extent());
        debug!(name = %entry.name, "deleted entry");
        self.persist()
    }

    /// Change the current directory. `/` is always accepted; anything else
    /// must name a directory entry.
    pub fn change_dir(&mut self, path: &str) -> Result<(), VfsError> {
        let resolved = self.resolve(path);
        if resolved == "/" {
            self.current_dir = resolved;
            return Ok(());
        }
        let entry = self
            .find(path::base_name(&resolved))
            .map(|i| &self.header.entries[i])
            .ok_or_else(|| VfsError::NotFound(resolved.clone()))?;
        if !entry.is_dir() {
            return Err(VfsError::NotADirectory(resolved));
        }
        self.current_dir = resolved;
        Ok(())
    }

    /// Flush the header to disk.
    pub fn sync(&self) -> Result<(), VfsError> {
        self.persist()
    }

    fn index_of(&self, path: &str) -> Option<usize> {
        let resolved = self.resolve(path);
        self.find(path::base_name(&resolved))
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.header.entries.iter().position(|e| e.name == name)
    }

    /// Current extent of `existing` (empty for a new entry) and where a
    /// `needed`-block extent would go.
    fn place(&self, existing: Option<usize>, needed: usize) -> (Range<usize>, Option<usize>) {
        let blocks = &self.header.blocks;
        match existing {
            Some(idx) => {
                let old = self.header.entries[idx].extent();
                let start = if blocks.fits_at(old.start, needed, old.clone()) {
                    Some(old.start)
                } else {
                    blocks.find_run(needed, old.clone())
                };
                (old, start)
            }
            None => (0..0, blocks.find_run(needed, 0..0)),
        }
    }

    fn free_blocks(&self) -> usize {
        self.header.blocks.len() - self.header.blocks.used_count()
    }

    /// Slide every extent down to the lowest free block, in block order,
    /// so all free space ends up in one run at the end of the store. The
    /// header is persisted after each move.
    ///
    /// `replacing` is an entry whose content is about to be overwritten.
    /// It is taken out of the table while the others move and comes back
    /// empty, holding the first block of the free run.
    fn compact(&mut self, replacing: Option<usize>) -> Result<(), VfsError> {
        let detached = match replacing {
            Some(idx) => {
                let entry = self.header.entries.remove(idx);
                self.header.blocks.release(entry.extent());
                Some((idx, entry))
            }
            None => None,
        };

        let mut order: Vec<usize> = (0..self.header.entries.len()).collect();
        order.sort_by_key(|&i| self.header.entries[i].first_block);

        let mut cursor = 0;
        let mut moved = 0;
        for idx in order {
            let extent = self.header.entries[idx].extent();
            if extent.start > cursor {
                let data = self.read_extent(idx)?;
                let mut file = &self.file;
                file.seek(SeekFrom::Start(block_offset(cursor)))?;
                file.write_all(&data)?;

                self.header.blocks.release(extent.clone());
                self.header.blocks.mark(cursor..cursor + extent.len());
                self.header.entries[idx].first_block = cursor as u32;
                self.persist()?;
                moved += 1;
            }
            cursor += extent.len();
        }

        if let Some((idx, mut entry)) = detached {
            entry.first_block = cursor as u32;
            entry.size = 0;
            self.header.blocks.mark(cursor..cursor + 1);
            self.header.entries.insert(idx, entry);
            self.persist()?;
        }
        debug!(moved, free_from = cursor, "compacted store");
        Ok(())
    }

    fn read_extent(&self, idx: usize) -> Result<Vec<u8>, VfsError> {
        let entry = &self.header.entries[idx];
        let mut buf = vec![0u8; entry.size as usize];
        if !buf.is_empty() {
            let mut file = &self.file;
            file.seek(SeekFrom::Start(block_offset(entry.first_block as usize)))?;
            file.read_exact(&mut buf)?;
        }
        Ok(buf)
    }

    fn ensure_table_room(&self) -> Result<(), VfsError> {
        if self.header.entries.len() >= MAX_FILES {
            return Err(VfsError::TableFull {
                capacity: MAX_FILES,
            });
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), VfsError> {
        let mut file = &self.file;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&self.header.encode())?;
        self.file.sync_data()?;
        Ok(())
    }
}

/// Read and validate the header of an existing store.
///
/// `Ok(None)` when there is nothing usable to open: the file is missing,
/// empty, or corrupt (in which case it is renamed to `<path>.bak`).
fn load_header(path: &Path) -> Result<Option<Header>, VfsError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut buf = Vec::with_capacity(HEADER_SIZE);
    file.take(HEADER_SIZE as u64).read_to_end(&mut buf)?;
    if buf.is_empty() {
        return Ok(None);
    }

    match Header::decode(&buf) {
        Ok(header) => Ok(Some(header)),
        Err(VfsError::Corrupt(reason)) => {
            let bak = backup_path(path);
            warn!(
                path = %path.display(),
                bak = %bak.display(),
                %reason,
                "corrupt VFS header, moving aside and starting fresh",
            );
            fs::rename(path, &bak)?;
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// `path` with `.bak` appended to the whole file name.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

fn valid_name(resolved: &str) -> Result<&str, VfsError> {
    let name = path::base_name(resolved);
    if name.is_empty() || name.len() >= MAX_FILENAME {
        return Err(VfsError::InvalidName(name.to_string()));
    }
    Ok(name)
}

fn now() -> u32 {
    u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[path = "vfs_tests.rs"]
mod tests;
