use abox_utils::intparse;

use super::{options, Streams};
use crate::error::{AboxError, Result};

/// `sleep SECONDS[.FRACTION]`
pub fn run(argv: &[Vec<u8>], _streams: &Streams) -> Result<i32> {
    let operands = options(argv, "", |_, _| {})?;
    let [interval] = operands else {
        return Err(AboxError::Usage(
            if operands.is_empty() { "missing operand" } else { "extra operand" }.into(),
        ));
    };

    let duration = intparse::num_to_duration(Some(interval.as_slice())).map_err(|_| {
        AboxError::Usage(format!(
            "invalid time interval '{}'",
            String::from_utf8_lossy(interval)
        ))
    })?;
    tracing::debug!(?duration, "sleeping");
    std::thread::sleep(duration);
    Ok(0)
}
