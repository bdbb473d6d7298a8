//! Serialization of an argument vector into a single line.

use std::ffi::CStr;

use crate::bytescan;
use crate::error::{Error, Result};

const SEPARATOR: u8 = b' ';
const NEWLINE: u8 = b'\n';

/// Sum of the string lengths of every element of `args`.
pub fn total_bytes<A: AsRef<[u8]>>(args: &[A]) -> usize {
    args.iter()
        .map(|a| bytescan::strlen(Some(a.as_ref())))
        .sum()
}

/// An argument vector packed as `"a b c\n"` followed by a NUL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedArgs {
    buf: Vec<u8>,
}

impl PackedArgs {
    /// Length including the newline, excluding the NUL.
    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    /// Never true: empty vectors are rejected by [`pack`].
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The packed bytes including the newline.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_c_str(&self) -> &CStr {
        // Elements are cut at their first NUL, so the only NUL is the
        // final one.
        CStr::from_bytes_with_nul(&self.buf).unwrap_or_default()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}

/// Join `args` with single spaces and terminate with a newline and a NUL.
///
/// # Errors
///
/// `NothingToPack` when the elements hold no bytes at all (including an
/// empty vector), and `Alloc` when the buffer cannot be allocated.
pub fn pack<A: AsRef<[u8]>>(args: &[A]) -> Result<PackedArgs> {
    let bytes = total_bytes(args);
    if bytes == 0 {
        return Err(Error::NothingToPack);
    }

    let size = bytes + (args.len() - 1) + 2;
    let mut buf = Vec::new();
    buf.try_reserve_exact(size).map_err(|_| Error::Alloc)?;

    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            buf.push(SEPARATOR);
        }
        buf.extend_from_slice(bytescan::terminated(arg.as_ref()));
    }
    buf.push(NEWLINE);
    buf.push(0);
    debug_assert_eq!(buf.len(), size);

    tracing::debug!(args = args.len(), bytes, size, "packed argument buffer");
    Ok(PackedArgs { buf })
}
