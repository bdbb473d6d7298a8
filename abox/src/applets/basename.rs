use abox_utils::bytescan;
use abox_utils::write_all;

use super::{options, Streams};
use crate::error::{AboxError, Result};

/// `basename PATH [SUFFIX]`: POSIX basename(1).
pub fn run(argv: &[Vec<u8>], streams: &Streams) -> Result<i32> {
    let operands = options(argv, "", |_, _| {})?;
    let (path, suffix) = match operands {
        [path] => (path, None),
        [path, suffix] => (path, Some(suffix)),
        [] => return Err(AboxError::Usage("missing operand".into())),
        _ => return Err(AboxError::Usage("extra operand".into())),
    };

    let mut name = bytescan::basename(Some(path.as_slice()));
    if let Some(suffix) = suffix {
        let suffix = bytescan::terminated(suffix);
        if name.len() > suffix.len() && name.ends_with(suffix) {
            name = &name[..name.len() - suffix.len()];
        }
    }

    let mut line = Vec::with_capacity(name.len() + 1);
    line.extend_from_slice(name);
    line.push(b'\n');
    write_all(streams.stdout, &line)?;
    Ok(0)
}
