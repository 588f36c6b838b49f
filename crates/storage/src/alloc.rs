// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Block allocation bitmap.

use std::ops::Range;

/// One bit per data block; set means allocated.
///
/// Allocation is a first-fit linear scan, `O(blocks)` per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMap {
    used: Vec<bool>,
}

impl BlockMap {
    pub fn new(len: usize) -> Self {
        Self {
            used: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub fn is_used(&self, block: usize) -> bool {
        self.used.get(block).copied().unwrap_or(false)
    }

    pub fn used_count(&self) -> usize {
        self.used.iter().filter(|&&u| u).count()
    }

    pub fn mark(&mut self, range: Range<usize>) {
        for block in range {
            if let Some(slot) = self.used.get_mut(block) {
                *slot = true;
            }
        }
    }

    pub fn release(&mut self, range: Range<usize>) {
        for block in range {
            if let Some(slot) = self.used.get_mut(block) {
                *slot = false;
            }
        }
    }

    /// Find the first run of `len` consecutive blocks that are free or lie
    /// inside `reusable` (the caller's own extent). Does not mark anything.
    pub fn find_run(&self, len: usize, reusable: Range<usize>) -> Option<usize> {
        if len == 0 || len > self.used.len() {
            return None;
        }
        let available = |b: usize| !self.used[b] || reusable.contains(&b);

        let mut run_start = 0;
        let mut run_len = 0;
        for block in 0..self.used.len() {
            if available(block) {
                if run_len == 0 {
                    run_start = block;
                }
                run_len += 1;
                if run_len == len {
                    return Some(run_start);
                }
            } else {
                run_len = 0;
            }
        }
        None
    }

    /// Whether `start..start + len` can be taken without touching blocks
    /// outside `reusable` that are already allocated.
    pub fn fits_at(&self, start: usize, len: usize, reusable: Range<usize>) -> bool {
        start + len <= self.used.len()
            && (start..start + len).all(|b| !self.used[b] || reusable.contains(&b))
    }

    /// Pack into `len / 8` bytes, bit `i % 8` of byte `i / 8`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.used.len().div_ceil(8)];
        for (i, used) in self.used.iter().enumerate() {
            if *used {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8], len: usize) -> Self {
        let used = (0..len)
            .map(|i| bytes.get(i / 8).is_some_and(|b| b & (1 << (i % 8)) != 0))
            .collect();
        Self { used }
    }
}

#[cfg(test)]
#[path = "alloc_tests.rs"]
mod tests;
