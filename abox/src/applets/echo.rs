use abox_utils::{pack, write_all, Error};

use super::{options, Streams};
use crate::error::Result;

/// `echo [-n] [ARG]...`
pub fn run(argv: &[Vec<u8>], streams: &Streams) -> Result<i32> {
    let mut newline = true;
    let operands = options(argv, "n", |c, _| {
        if c == b'n' {
            newline = false;
        }
    })?;

    let line = match pack(operands) {
        Ok(packed) => packed.into_vec(),
        // Nothing but empty strings: only the separators remain.
        Err(Error::NothingToPack) => {
            let mut spaces = vec![b' '; operands.len().saturating_sub(1)];
            spaces.extend_from_slice(b"\n\0");
            spaces
        }
        Err(e) => return Err(e.into()),
    };

    // Drop the NUL, and the newline too under -n.
    let end = line.len() - if newline { 1 } else { 2 };
    write_all(streams.stdout, &line[..end])?;
    Ok(0)
}
