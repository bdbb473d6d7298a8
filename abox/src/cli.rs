//! Multi-call dispatch: `abox APPLET [ARG]...`, or any applet invoked
//! directly through a link named after it.

use abox_utils::{bytescan, write_all};

use crate::applets::{self, options, prog_name, Applet, Streams, APPLETS};
use crate::error::{AboxError, Result};

const USAGE: &str = "abox [-hl] APPLET [ARG]...";

/// Run whatever `argv` names and return the process exit status.
pub fn run(argv: &[Vec<u8>], streams: &Streams) -> i32 {
    let invoked = bytescan::basename(argv.first().map(Vec::as_slice));
    if let Some(applet) = applets::find(invoked) {
        return run_applet(applet, argv, streams);
    }

    match front_end(argv, streams) {
        Ok(code) => code,
        Err(e) => {
            eprint!("{}", report(&prog_name(argv), USAGE, &e));
            e.exit_code()
        }
    }
}

fn run_applet(applet: &Applet, argv: &[Vec<u8>], streams: &Streams) -> i32 {
    tracing::debug!(applet = applet.name, args = argv.len().saturating_sub(1), "running");
    match (applet.run)(argv, streams) {
        Ok(code) => code,
        Err(e) => {
            eprint!("{}", report(applet.name, applet.usage, &e));
            e.exit_code()
        }
    }
}

fn front_end(argv: &[Vec<u8>], streams: &Streams) -> Result<i32> {
    let mut help = false;
    let mut list = false;
    let operands = options(argv, "+hl", |c, _| match c {
        b'h' => help = true,
        b'l' => list = true,
        _ => {}
    })?;

    if help {
        write_all(streams.stdout, help_text().as_bytes())?;
        return Ok(0);
    }
    if list {
        let names: String = APPLETS.iter().map(|a| format!("{}\n", a.name)).collect();
        write_all(streams.stdout, names.as_bytes())?;
        return Ok(0);
    }

    let Some(name) = operands.first() else {
        return Err(AboxError::Usage("no applet given".into()));
    };
    match applets::find(name) {
        Some(applet) => Ok(run_applet(applet, operands, streams)),
        None => Err(AboxError::Usage(format!(
            "unknown applet '{}'",
            String::from_utf8_lossy(name)
        ))),
    }
}

fn help_text() -> String {
    let mut text = format!("usage: {}\n\napplets:\n", USAGE);
    for applet in APPLETS {
        text.push_str("  ");
        text.push_str(applet.usage);
        text.push('\n');
    }
    text
}

/// The stderr text for a failed run of `prog`.
fn report(prog: &str, usage: &str, err: &AboxError) -> String {
    match err {
        AboxError::BadOption(msg) => format!("{}\nusage: {}\n", msg, usage),
        AboxError::Usage(msg) => format!("{}: {}\nusage: {}\n", prog, msg, usage),
        other => format!("{}: {}\n", prog, other),
    }
}
