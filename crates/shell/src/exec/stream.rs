// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream handles wired into each pipeline stage.
//!
//! Owned variants close when dropped; the inherited variants borrow the
//! session's terminal streams and are never closed here.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Readable end wired to a stage.
pub enum Input<'a> {
    /// The session's own standard input.
    Inherited(&'a mut dyn BufRead),
    /// In-memory bytes: a drained pipe or an eagerly read VFS file.
    Buffer(Cursor<Vec<u8>>),
    /// A host file.
    File(BufReader<File>),
}

impl<'a> Input<'a> {
    pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
        Input::Buffer(Cursor::new(bytes.into()))
    }

    pub fn empty() -> Self {
        Input::buffer(Vec::new())
    }

    pub fn file(file: File) -> Self {
        Input::File(BufReader::new(file))
    }

    /// Builtins only consume input that was explicitly wired to them.
    pub fn is_inherited(&self) -> bool {
        matches!(self, Input::Inherited(_))
    }
}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Input::Inherited(_) => f.write_str("Input::Inherited"),
            Input::Buffer(c) => write!(f, "Input::Buffer({} bytes)", c.get_ref().len()),
            Input::File(_) => f.write_str("Input::File"),
        }
    }
}

impl Read for Input<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Input::Inherited(r) => r.read(buf),
            Input::Buffer(c) => c.read(buf),
            Input::File(f) => f.read(buf),
        }
    }
}

impl BufRead for Input<'_> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        match self {
            Input::Inherited(r) => r.fill_buf(),
            Input::Buffer(c) => c.fill_buf(),
            Input::File(f) => f.fill_buf(),
        }
    }

    fn consume(&mut self, amt: usize) {
        match self {
            Input::Inherited(r) => r.consume(amt),
            Input::Buffer(c) => c.consume(amt),
            Input::File(f) => f.consume(amt),
        }
    }
}

/// A writer shared between the session and its background jobs.
#[derive(Clone)]
pub struct SharedOutput(Arc<Mutex<Box<dyn Write + Send>>>);

impl SharedOutput {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(Box::new(writer))))
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for SharedOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for SharedOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedOutput")
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.lock().flush()
    }
}

/// Writable end wired to a stage.
pub enum Output<'a> {
    /// The session's own standard output.
    Inherited(&'a mut dyn Write),
    /// A host file.
    File(File),
    /// Bytes held until the stage finishes: a pipe or a VFS redirect.
    Capture(Vec<u8>),
    /// Writer shared with background jobs.
    Shared(SharedOutput),
}

impl<'a> Output<'a> {
    pub fn capture() -> Self {
        Output::Capture(Vec::new())
    }

    /// Captured bytes, or nothing for non-capturing outputs.
    pub fn into_captured(self) -> Vec<u8> {
        match self {
            Output::Capture(bytes) => bytes,
            _ => Vec::new(),
        }
    }
}

impl fmt::Debug for Output<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Inherited(_) => f.write_str("Output::Inherited"),
            Output::File(_) => f.write_str("Output::File"),
            Output::Capture(b) => write!(f, "Output::Capture({} bytes)", b.len()),
            Output::Shared(_) => f.write_str("Output::Shared"),
        }
    }
}

impl Write for Output<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Inherited(w) => w.write(buf),
            Output::File(f) => f.write(buf),
            Output::Capture(v) => v.write(buf),
            Output::Shared(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Inherited(w) => w.flush(),
            Output::File(f) => f.flush(),
            Output::Capture(_) => Ok(()),
            Output::Shared(s) => s.flush(),
        }
    }
}

#[cfg(test)]
#[path = "stream_tests.rs"]
mod tests;
