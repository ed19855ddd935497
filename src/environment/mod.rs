//! Owned narrow renditions of host wide argument vectors and environment
//! blocks.
//!
//! Host platforms whose process entry hands over UTF-16 `argv`/`environ`
//! arrays need those arrays translated once, up front, into the canonical
//! narrow encoding. [`NarrowEnvironment`] owns every converted string plus a
//! null-terminated pointer table shaped like the host's own arrays, so it
//! can be handed straight back to host APIs expecting `char**`. The type is
//! move-only with a single consuming [`release`](NarrowEnvironment::release);
//! releasing twice or using after release is unrepresentable.
//!
//! All byte-level decoding is delegated to [`crate::codec`]; this module
//! never inspects wide code units beyond locating NUL terminators.

#![allow(unsafe_code)]


use std::ffi::{CStr, CString, c_char};
use std::ptr;
use std::slice;

use tracing::debug;

use crate::codec;
use crate::error::{Error, Result};

/// An owned array of independently heap-allocated, NUL-terminated narrow
/// strings with a null-terminated pointer table, converted from host wide
/// entries.
///
/// Construction is all-or-nothing: if any entry fails to convert, everything
/// already built is dropped before the failure is returned and no partial
/// array is ever observable.
#[derive(Debug)]
pub struct NarrowEnvironment {
    entries: Vec<CString>,
    // Pointers into `entries`' stable heap allocations, plus a trailing
    // null. Rebuilt only on construction; `entries` is never mutated after.
    table: Vec<*mut c_char>,
}

impl NarrowEnvironment {
    /// Convert an ordered collection of wide entries into an owned narrow
    /// array, preserving entry order and exact content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedSequence`] if an entry is not valid UTF-16
    /// or converts to a string with an interior NUL, and
    /// [`Error::AllocationFailure`] if backing storage cannot be reserved.
    pub fn from_wide_entries<I, T>(wide: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u16]>,
    {
        let iter = wide.into_iter();
        let mut entries: Vec<CString> = Vec::new();
        entries
            .try_reserve_exact(iter.size_hint().0)
            .map_err(|_| Error::AllocationFailure)?;

        for entry in iter {
            let narrow = codec::to_utf8(entry.as_ref())?;
            let owned =
                CString::new(narrow).map_err(|err| Error::malformed(err.nul_position()))?;
            entries.push(owned);
        }

        let table = build_table(&entries)?;
        debug!(entries = entries.len(), "converted wide block to narrow");
        Ok(Self { entries, table })
    }

    /// Convert a count-bounded wide argument vector.
    ///
    /// # Errors
    ///
    /// See [`NarrowEnvironment::from_wide_entries`].
    ///
    /// # Safety
    ///
    /// `argv` must point to at least `argc` valid pointers, each referencing
    /// a NUL-terminated wide string that stays alive for the duration of the
    /// call.
    pub unsafe fn from_wide_argv(argc: usize, argv: *const *const u16) -> Result<Self> {
        let mut slices = Vec::new();
        slices
            .try_reserve_exact(argc)
            .map_err(|_| Error::AllocationFailure)?;
        for index in 0..argc {
            let entry = unsafe { *argv.add(index) };
            slices.push(unsafe { wide_units(entry) });
        }
        Self::from_wide_entries(slices)
    }

    /// Convert a wide environment block terminated by a null entry.
    ///
    /// # Errors
    ///
    /// See [`NarrowEnvironment::from_wide_entries`].
    ///
    /// # Safety
    ///
    /// `environ` must point to a null-terminated array of pointers, each
    /// referencing a NUL-terminated wide string that stays alive for the
    /// duration of the call.
    pub unsafe fn from_wide_environ(environ: *const *const u16) -> Result<Self> {
        let mut slices = Vec::new();
        let mut cursor = environ;
        loop {
            let entry = unsafe { *cursor };
            if entry.is_null() {
                break;
            }
            slices.push(unsafe { wide_units(entry) });
            cursor = unsafe { cursor.add(1) };
        }
        Self::from_wide_entries(slices)
    }

    /// Number of entries, excluding the terminating null.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the array holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CStr> {
        self.entries.get(index).map(CString::as_c_str)
    }

    /// Iterate entries in their original order.
    pub fn iter(&self) -> impl Iterator<Item = &CStr> {
        self.entries.iter().map(CString::as_c_str)
    }

    /// Null-terminated pointer table in the host's `char**` shape. Valid for
    /// as long as `self` is alive.
    #[must_use]
    pub fn as_ptr(&self) -> *const *mut c_char {
        self.table.as_ptr()
    }

    /// Release the array and every owned string. Consuming `self` is the
    /// only way to free the allocation, so a second release cannot compile.
    pub fn release(self) {
        debug!(entries = self.entries.len(), "released narrow block");
    }
}

fn build_table(entries: &[CString]) -> Result<Vec<*mut c_char>> {
    let mut table: Vec<*mut c_char> = Vec::new();
    table
        .try_reserve_exact(entries.len() + 1)
        .map_err(|_| Error::AllocationFailure)?;
    table.extend(entries.iter().map(|entry| entry.as_ptr().cast_mut()));
    table.push(ptr::null_mut());
    Ok(table)
}

/// View the units of a NUL-terminated wide string, excluding the terminator.
unsafe fn wide_units<'a>(entry: *const u16) -> &'a [u16] {
    let mut len = 0;
    while unsafe { *entry.add(len) } != 0 {
        len += 1;
    }
    unsafe { slice::from_raw_parts(entry, len) }
}
