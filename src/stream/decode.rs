//! Incremental event decoder (bytes -> typed events).
//!
//! The transport may split the body anywhere, including inside a line or a
//! multi-byte UTF-8 sequence, so bytes are buffered until a full line is
//! available and only then decoded to text.

use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::warn;

/// Prefix marking a data line.
pub const DATA_PREFIX: &str = "data:";
/// Payload marking a clean end of stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded unit of the stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame<T> {
    Event(T),
    /// The sentinel was seen; nothing after it is meaningful.
    Done,
}

/// A line-oriented decoder over a single rolling buffer:
/// - splits on `\n` (a trailing `\r` is dropped)
/// - ignores blank lines and lines without the `data:` prefix
/// - stops on `data: [DONE]`
/// - logs and skips payloads that do not parse as `T`
pub struct EventDecoder<T> {
    buf: Vec<u8>,
    /// Bytes of `buf` already known to contain no newline.
    scanned: usize,
    prefix: String,
    sentinel: String,
    done: bool,
    skipped: u64,
    _event: PhantomData<fn() -> T>,
}

impl<T> Default for EventDecoder<T> {
    fn default() -> Self {
        Self::with_markers(DATA_PREFIX, DONE_SENTINEL)
    }
}

impl<T> EventDecoder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom line prefix and termination sentinel.
    pub fn with_markers(prefix: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self {
            buf: Vec::new(),
            scanned: 0,
            prefix: prefix.into(),
            sentinel: sentinel.into(),
            done: false,
            skipped: 0,
            _event: PhantomData,
        }
    }

    /// Append raw bytes from the network.
    pub fn feed(&mut self, chunk: &[u8]) {
        if !self.done {
            self.buf.extend_from_slice(chunk);
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of data lines that failed to parse and were skipped.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Bytes buffered but not yet forming a complete line.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

impl<T: DeserializeOwned> EventDecoder<T> {
    /// Next frame from complete lines already buffered, or `None` if more
    /// bytes are needed.
    pub fn next_frame(&mut self) -> Option<Frame<T>> {
        while !self.done {
            let Some(offset) = self.buf[self.scanned..].iter().position(|b| *b == b'\n') else {
                self.scanned = self.buf.len();
                return None;
            };
            let idx = self.scanned + offset;
            self.scanned = 0;
            let line: Vec<u8> = self.buf.drain(..=idx).collect();
            if let Some(frame) = self.decode_line(&line[..idx]) {
                return Some(frame);
            }
        }
        None
    }

    /// Flush at end of input: an unterminated last line still counts.
    pub fn finish(&mut self) -> Option<Frame<T>> {
        if let Some(frame) = self.next_frame() {
            return Some(frame);
        }
        if self.done || self.buf.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buf);
        self.scanned = 0;
        self.decode_line(&line)
    }

    /// Feed a chunk and drain every frame it completes.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Frame<T>> {
        self.feed(chunk);
        std::iter::from_fn(|| self.next_frame()).collect()
    }

    fn decode_line(&mut self, raw: &[u8]) -> Option<Frame<T>> {
        let text = String::from_utf8_lossy(raw);
        let line = text.trim_end_matches('\r');
        if line.trim().is_empty() {
            return None;
        }

        let payload = line.strip_prefix(self.prefix.as_str())?;
        let payload = payload.strip_prefix(' ').unwrap_or(payload).trim();

        if payload == self.sentinel {
            self.done = true;
            self.buf.clear();
            self.scanned = 0;
            return Some(Frame::Done);
        }

        match serde_json::from_str::<T>(payload) {
            Ok(event) => Some(Frame::Event(event)),
            Err(e) => {
                self.skipped += 1;
                warn!(
                    error = %e,
                    fragment = truncate(payload, 200),
                    "failed to parse stream fragment, skipping"
                );
                None
            }
        }
    }
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
