// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generated-header output sinks.

use std::io::{self, Write};

/// Append-only text sink for the generated header.
pub trait HeaderSink {
    fn append(&mut self, text: &str) -> io::Result<()>;
}

impl HeaderSink for String {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.push_str(text);
        Ok(())
    }
}

/// Header sink over any writer (file, stdout, buffer).
#[derive(Debug)]
pub struct HeaderWriter<W: Write> {
    inner: W,
    bytes_written: usize,
}

impl<W: Write> HeaderWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            bytes_written: 0,
        }
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Flush and hand back the writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> HeaderSink for HeaderWriter<W> {
    fn append(&mut self, text: &str) -> io::Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.bytes_written += text.len();
        Ok(())
    }
}
