//! Stateless conversions between the canonical narrow (UTF-8) encoding and
//! the wide (UTF-16) encoding required by certain host platform APIs.
//!
//! The chunked forms operate on caller-owned fixed-capacity buffers and are
//! the primitives everything else composes: a narrow byte stream may be read
//! in arbitrary-sized chunks, so a multi-byte sequence can be split at a
//! chunk boundary. Rather than buffering internally, [`to_utf16_chunked`]
//! reports how many trailing bytes were left unconsumed and the caller
//! re-presents them as the prefix of the next chunk. This keeps the codec
//! purely functional and safe to call from any thread.


use crate::error::{Error, Result};

/// Outcome of one chunked narrow-to-wide conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WideChunk {
    /// Number of wide code units written to the output buffer.
    pub written: usize,
    /// Number of trailing input bytes, in `0..=3`, that begin a multi-byte
    /// sequence whose remaining bytes were not present in this chunk. The
    /// caller must re-present them at the start of the next chunk.
    pub truncated: u8,
}

/// Convert a chunk of narrow (UTF-8) bytes into wide (UTF-16) code units.
///
/// Decodes the maximal complete-code-point prefix of `input` into `out` and
/// reports both the units written and the length of any incomplete trailing
/// sequence. An input of length zero yields zero written and zero truncated.
/// An input consisting entirely of one incomplete sequence yields zero
/// written and the whole input length as truncated, which by UTF-8's
/// four-byte maximum is never more than three.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] when the input holds an invalid (not
/// merely incomplete) sequence, and [`Error::CapacityExceeded`] when the
/// converted prefix would not fit `out`. Nothing is written on error.
pub fn to_utf16_chunked(out: &mut [u16], input: &[u8]) -> Result<WideChunk> {
    let (complete, truncated) = split_complete_prefix(input)?;

    let required: usize = complete.chars().map(char::len_utf16).sum();
    if required > out.len() {
        return Err(Error::capacity(required, out.len()));
    }

    let mut written = 0;
    let mut units = [0u16; 2];
    for ch in complete.chars() {
        for &unit in &*ch.encode_utf16(&mut units) {
            out[written] = unit;
            written += 1;
        }
    }
    Ok(WideChunk { written, truncated })
}

/// Convert a chunk of wide (UTF-16) code units into narrow (UTF-8) bytes,
/// returning the number of bytes written.
///
/// There is no truncation concept in this direction: surrogate pairs are
/// always presented whole by the caller, so an unpaired surrogate is a
/// decode error rather than a deferred remainder.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] for an unpaired surrogate and
/// [`Error::CapacityExceeded`] when the full conversion would not fit `out`.
/// Nothing is written on error.
pub fn to_utf8_chunked(out: &mut [u8], input: &[u16]) -> Result<usize> {
    // Validate and size in a first pass so a capacity failure commits
    // nothing to the destination.
    let mut required = 0usize;
    let mut offset = 0usize;
    for decoded in char::decode_utf16(input.iter().copied()) {
        let ch = decoded.map_err(|_| Error::malformed(offset))?;
        required += ch.len_utf8();
        offset += ch.len_utf16();
    }
    if required > out.len() {
        return Err(Error::capacity(required, out.len()));
    }

    let mut written = 0;
    for decoded in char::decode_utf16(input.iter().copied()) {
        let ch = decoded.map_err(|_| Error::malformed(written))?;
        written += ch.encode_utf8(&mut out[written..]).len();
    }
    Ok(written)
}

/// Convert an entire narrow (UTF-8) string to an owned wide (UTF-16) string.
///
/// Composed from [`to_utf16_chunked`] with a buffer sized to the theoretical
/// maximum expansion (one wide unit per input byte), then trimmed to the
/// written length.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] for any invalid sequence, including
/// an incomplete sequence at the very end: a complete string has no next
/// chunk to defer it to.
pub fn to_utf16(narrow: &[u8]) -> Result<Vec<u16>> {
    let mut out = vec![0u16; narrow.len()];
    let chunk = to_utf16_chunked(&mut out, narrow)?;
    if chunk.truncated != 0 {
        return Err(Error::malformed(narrow.len() - chunk.truncated as usize));
    }
    out.truncate(chunk.written);
    Ok(out)
}

/// Convert an entire wide (UTF-16) string to an owned narrow (UTF-8) string.
///
/// Composed from [`to_utf8_chunked`] with a buffer sized to the theoretical
/// maximum expansion (three bytes per wide unit), then trimmed to the
/// written length.
///
/// # Errors
///
/// Returns [`Error::MalformedSequence`] for an unpaired surrogate, whether
/// trailing or interior.
pub fn to_utf8(wide: &[u16]) -> Result<String> {
    let mut out = vec![0u8; wide.len().saturating_mul(3)];
    let written = to_utf8_chunked(&mut out, wide)?;
    out.truncate(written);
    String::from_utf8(out).map_err(|err| Error::malformed(err.utf8_error().valid_up_to()))
}

/// Split `input` into its maximal valid prefix and the length of the
/// incomplete sequence dangling at the end, if any.
fn split_complete_prefix(input: &[u8]) -> Result<(&str, u8)> {
    match core::str::from_utf8(input) {
        Ok(text) => Ok((text, 0)),
        Err(err) => {
            let valid = err.valid_up_to();
            if err.error_len().is_some() {
                // Invalid bytes, not a chunk boundary.
                return Err(Error::malformed(valid));
            }
            // At most three bytes can dangle: a sequence needs four at most.
            #[allow(clippy::cast_possible_truncation)]
            let dangling = (input.len() - valid) as u8;
            debug_assert!(dangling <= 3);
            let text = core::str::from_utf8(&input[..valid])
                .map_err(|inner| Error::malformed(inner.valid_up_to()))?;
            Ok((text, dangling))
        }
    }
}
