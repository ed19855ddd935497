//! Forwarding wrapper over the scrypt key-derivation primitive.
//!
//! Adapts the fixed-size-result call signature to a caller-supplied
//! destination. No computation happens here; everything is delegated to the
//! `scrypt` crate.

use scrypt::Params;

use crate::error::{Error, Result};

/// Derive `out.len()` bytes from `data` and `salt` with the given scrypt
/// tuning parameters, writing into the caller's destination.
///
/// `work` is the CPU/memory cost (N) and must be a power of two greater
/// than one; `resources` is the block size (r); `parallelism` is the
/// parallelization count (p).
///
/// # Errors
///
/// Returns [`Error::UnsupportedOperation`] when the parameter combination or
/// the destination length is rejected by the primitive.
pub fn derive_key(
    data: &[u8],
    salt: &[u8],
    work: u64,
    resources: u32,
    parallelism: u32,
    out: &mut [u8],
) -> Result<()> {
    if !work.is_power_of_two() || work < 2 {
        return Err(Error::unsupported(format!(
            "scrypt work parameter {work} is not a power of two greater than one"
        )));
    }
    #[allow(clippy::cast_possible_truncation)]
    let log_n = work.trailing_zeros() as u8;
    let params = Params::new(log_n, resources, parallelism, Params::RECOMMENDED_LEN)
        .map_err(|err| Error::unsupported(err.to_string()))?;
    scrypt::scrypt(data, salt, &params, out).map_err(|err| Error::unsupported(err.to_string()))
}

/// Derive a fixed-size array, the shape the original fixed-size-result
/// signature exposes.
///
/// # Errors
///
/// See [`derive_key`].
pub fn derive_array<const N: usize>(
    data: &[u8],
    salt: &[u8],
    work: u64,
    resources: u32,
    parallelism: u32,
) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    derive_key(data, salt, work, resources, parallelism, &mut out)?;
    Ok(out)
}
