// Copyright 2025 Cameron Swords
// SPDX-License-Identifier: Apache-2.0

use std::io::{self, Write};

/// Output adapter that suppresses trailing whitespace.
///
/// Whitespace is parked in a side buffer: a newline discards it, any other
/// non-whitespace character flushes it first. This is the sole mechanism
/// dropping the spaces a reselected choice can leave dangling at the end of
/// a line. Whitespace still parked when printing finishes is discarded.
pub(crate) struct TrimWriter<W> {
    inner: W,
    pending: String,
}

impl<W: Write> TrimWriter<W> {
    pub fn new(inner: W) -> TrimWriter<W> {
        TrimWriter {
            inner,
            pending: String::new(),
        }
    }

    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        let mut out = String::new();
        for ch in text.chars() {
            if ch == '\n' {
                self.pending.clear();
                out.push('\n');
            } else if ch.is_whitespace() {
                self.pending.push(ch);
            } else {
                out.push_str(&self.pending);
                self.pending.clear();
                out.push(ch);
            }
        }
        if !out.is_empty() {
            self.inner.write_all(out.as_bytes())?;
        }
        Ok(())
    }
}
