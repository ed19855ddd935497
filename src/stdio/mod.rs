//! Narrow-encoded standard stream interface over wide-character-only
//! consoles.
//!
//! Application code above this layer reads and writes the canonical narrow
//! encoding through ordinary [`io::Read`]/[`io::Write`] objects. On hosts
//! whose console API speaks wide code units, [`Utf8Writer`] and
//! [`Utf8Reader`] bridge through [`crate::codec`], carrying the dangling
//! remainder of a split sequence from one call to the next: the writer keeps
//! the 0..=3 truncated narrow bytes reported by the chunked conversion, the
//! reader holds back an unpaired high surrogate until its low half arrives.
//!
//! Bridging is process-wide by nature. [`Utf8Stdio::init`] hands the bridged
//! streams to exactly one caller, which must thread them through explicitly;
//! once bridged, mixing in the native stream objects is a usage error this
//! layer does not attempt to detect.

#[cfg(test)]
mod tests;

use std::io::{self, Read, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::codec;

/// A stream producing wide (UTF-16) code units, the shape of a wide console
/// input API.
pub trait WideSource {
    /// Read up to `buf.len()` wide units, returning how many were read.
    /// Zero means end of stream.
    ///
    /// # Errors
    ///
    /// Any underlying transport error.
    fn read_wide(&mut self, buf: &mut [u16]) -> io::Result<usize>;
}

/// A stream consuming wide (UTF-16) code units, the shape of a wide console
/// output API.
pub trait WideSink {
    /// Write a prefix of `units`, returning how many were consumed.
    ///
    /// # Errors
    ///
    /// Any underlying transport error.
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize>;

    /// Flush buffered output to the underlying device.
    ///
    /// # Errors
    ///
    /// Any underlying transport error.
    fn flush_wide(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl WideSink for Vec<u16> {
    fn write_wide(&mut self, units: &[u16]) -> io::Result<usize> {
        self.extend_from_slice(units);
        Ok(units.len())
    }
}

/// Narrow writer bridging to a wide sink through the chunked conversion.
#[derive(Debug)]
pub struct Utf8Writer<S> {
    sink: S,
    carry: [u8; 3],
    carry_len: u8,
}

impl<S: WideSink> Utf8Writer<S> {
    /// Wrap a wide sink.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            carry: [0; 3],
            carry_len: 0,
        }
    }

    /// Borrow the underlying sink.
    pub fn get_ref(&self) -> &S {
        &self.sink
    }

    /// Unwrap, discarding any dangling incomplete sequence.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S: WideSink> Write for Utf8Writer<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        let mut staged = Vec::with_capacity(usize::from(self.carry_len) + buf.len());
        staged.extend_from_slice(&self.carry[..usize::from(self.carry_len)]);
        staged.extend_from_slice(buf);

        let mut wide = vec![0u16; staged.len()];
        let chunk = codec::to_utf16_chunked(&mut wide, &staged)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;

        let mut remaining = &wide[..chunk.written];
        while !remaining.is_empty() {
            let sent = self.sink.write_wide(remaining)?;
            if sent == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "wide sink accepted no units",
                ));
            }
            remaining = &remaining[sent..];
        }

        let keep = usize::from(chunk.truncated);
        self.carry[..keep].copy_from_slice(&staged[staged.len() - keep..]);
        self.carry_len = chunk.truncated;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // A dangling incomplete sequence stays in the carry; a later write
        // may complete it.
        self.sink.flush_wide()
    }
}

/// Narrow reader bridging from a wide source.
#[derive(Debug)]
pub struct Utf8Reader<S> {
    source: S,
    pending: Vec<u8>,
    surrogate: Option<u16>,
}

impl<S: WideSource> Utf8Reader<S> {
    /// Wrap a wide source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pending: Vec::new(),
            surrogate: None,
        }
    }

    /// Pull one batch of wide units from the source, decode, and queue the
    /// narrow bytes. Returns false when the source is exhausted.
    fn fill(&mut self) -> io::Result<bool> {
        let mut wide = [0u16; 512];
        let mut len = 0;
        if let Some(unit) = self.surrogate.take() {
            wide[0] = unit;
            len = 1;
        }

        let got = self.source.read_wide(&mut wide[len..])?;
        if got == 0 {
            if len != 0 {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "unpaired surrogate at end of wide stream",
                ));
            }
            return Ok(false);
        }
        len += got;

        let mut units = &wide[..len];
        if let Some(&last) = units.last() {
            // Hold back a trailing high surrogate; its low half belongs to
            // the next read.
            if (0xD800..0xDC00).contains(&last) {
                self.surrogate = Some(last);
                units = &units[..units.len() - 1];
            }
        }

        let narrow = codec::to_utf8(units)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.pending.extend_from_slice(narrow.as_bytes());
        Ok(true)
    }
}

impl<S: WideSource> Read for Utf8Reader<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pending.is_empty() {
            if !self.fill()? {
                return Ok(0);
            }
        }
        let take = self.pending.len().min(buf.len());
        buf[..take].copy_from_slice(&self.pending[..take]);
        self.pending.drain(..take);
        Ok(take)
    }
}

static CLAIMED: AtomicBool = AtomicBool::new(false);

/// Process-wide capability over the narrow-encoded standard streams.
///
/// Produced once by [`Utf8Stdio::init`] and threaded explicitly through the
/// program; there is no ambient rebinding and no runtime reconfiguration.
pub struct Utf8Stdio {
    stdin: Box<dyn Read + Send>,
    stdout: Box<dyn Write + Send>,
    stderr: Box<dyn Write + Send>,
}

impl Utf8Stdio {
    /// Claim the process standard streams, narrow-encoded. Returns `None` on
    /// every call after the first; initialization cannot be undone.
    ///
    /// On narrow-native hosts the handles pass straight through to the std
    /// streams. Hosts that expose wide-only consoles construct the bridged
    /// form with [`Utf8Stdio::from_wide`] instead.
    pub fn init() -> Option<Self> {
        if CLAIMED.swap(true, Ordering::SeqCst) {
            return None;
        }
        info!("standard streams claimed for narrow encoding");
        Some(Self {
            stdin: Box::new(io::stdin()),
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        })
    }

    /// Build a fully bridged triple over caller-supplied wide streams.
    pub fn from_wide(
        stdin: impl WideSource + Send + 'static,
        stdout: impl WideSink + Send + 'static,
        stderr: impl WideSink + Send + 'static,
    ) -> Self {
        Self {
            stdin: Box::new(Utf8Reader::new(stdin)),
            stdout: Box::new(Utf8Writer::new(stdout)),
            stderr: Box::new(Utf8Writer::new(stderr)),
        }
    }

    /// Narrow-encoded standard input.
    pub fn stdin(&mut self) -> &mut (dyn Read + Send) {
        &mut *self.stdin
    }

    /// Narrow-encoded standard output.
    pub fn stdout(&mut self) -> &mut (dyn Write + Send) {
        &mut *self.stdout
    }

    /// Narrow-encoded standard error.
    pub fn stderr(&mut self) -> &mut (dyn Write + Send) {
        &mut *self.stderr
    }
}
