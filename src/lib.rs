#![deny(clippy::all, clippy::perf, clippy::suspicious)] // Catch correctness + perf + suspicious patterns early.
#![deny(clippy::unwrap_used, clippy::expect_used)]

//! Boundary-layer codec between the canonical narrow (UTF-8) encoding and
//! the wide (UTF-16) encoding certain host platform APIs require.
//!
//! The design goal is "UTF-8 everywhere": application code treats the
//! narrow encoding as canonical and the wide representation exists only at
//! the narrowest possible edge — process entry, host API calls, console
//! streams. [`codec`] holds the pure conversions, including the chunked
//! truncation-aware form for streamed input; [`environment`] adapts host
//! wide argument vectors and environment blocks; [`stdio`] bridges
//! wide-only console streams behind ordinary narrow readers and writers.

pub mod codec;
pub mod environment;
pub mod error;
pub mod kdf;
pub mod logging;
pub mod normalize;
pub mod stdio;

pub use codec::{WideChunk, to_utf8, to_utf8_chunked, to_utf16, to_utf16_chunked};
pub use environment::NarrowEnvironment;
pub use error::{Error, Result};
pub use stdio::{Utf8Reader, Utf8Stdio, Utf8Writer, WideSink, WideSource};
