//! The tools bundled in the multi-call binary.

use std::os::fd::RawFd;

use abox_utils::{Getopt, Outcome};

use crate::error::{AboxError, Result};

pub mod basename;
pub mod cat;
pub mod echo;
pub mod sleep;

/// Descriptors an applet reads from and writes to.
#[derive(Debug, Clone, Copy)]
pub struct Streams {
    pub stdin: RawFd,
    pub stdout: RawFd,
}

impl Default for Streams {
    fn default() -> Self {
        Streams {
            stdin: nix::libc::STDIN_FILENO,
            stdout: nix::libc::STDOUT_FILENO,
        }
    }
}

/// Runs an applet over its full argv (argv[0] is the applet name) and
/// returns the exit status.
pub type Runner = fn(&[Vec<u8>], &Streams) -> Result<i32>;

pub struct Applet {
    pub name: &'static str,
    pub usage: &'static str,
    pub run: Runner,
}

pub const APPLETS: &[Applet] = &[
    Applet {
        name: "basename",
        usage: "basename PATH [SUFFIX]",
        run: basename::run,
    },
    Applet {
        name: "cat",
        usage: "cat [-u] [FILE]...",
        run: cat::run,
    },
    Applet {
        name: "echo",
        usage: "echo [-n] [ARG]...",
        run: echo::run,
    },
    Applet {
        name: "sleep",
        usage: "sleep SECONDS[.FRACTION]",
        run: sleep::run,
    },
];

pub fn find(name: &[u8]) -> Option<&'static Applet> {
    APPLETS.iter().find(|a| a.name.as_bytes() == name)
}

pub(crate) fn prog_name(argv: &[Vec<u8>]) -> String {
    let name = abox_utils::bytescan::basename(argv.first().map(Vec::as_slice));
    String::from_utf8_lossy(name).into_owned()
}

/// Walk the options of `argv` against `spec`, handing each match to
/// `on_option`, and return the operands.
pub(crate) fn options<'a, F>(
    argv: &'a [Vec<u8>],
    spec: &'a str,
    mut on_option: F,
) -> Result<&'a [Vec<u8>]>
where
    F: FnMut(u8, Option<&'a [u8]>),
{
    let mut g = Getopt::new(argv, spec);
    loop {
        match g.parse() {
            Outcome::Matched(c) => on_option(c, g.optarg()),
            Outcome::End => return Ok(g.operands()),
            Outcome::Unknown | Outcome::MissingArgument => {
                let msg = g
                    .diagnostic(&prog_name(argv))
                    .unwrap_or_else(|| format!("{}: bad option", prog_name(argv)));
                return Err(AboxError::BadOption(msg));
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn capture(run: Runner, argv: &[&str], stdin: &[u8]) -> (Result<i32>, Vec<u8>) {
    use abox_utils::{read_all, write_all};
    use std::os::fd::AsRawFd;

    let (in_r, in_w) = nix::unistd::pipe().unwrap();
    let (out_r, out_w) = nix::unistd::pipe().unwrap();
    write_all(in_w.as_raw_fd(), stdin).unwrap();
    drop(in_w);

    let argv: Vec<Vec<u8>> = argv.iter().map(|a| a.as_bytes().to_vec()).collect();
    let streams = Streams {
        stdin: in_r.as_raw_fd(),
        stdout: out_w.as_raw_fd(),
    };
    let result = run(&argv, &streams);
    drop(out_w);

    let mut out = vec![0u8; 1 << 16];
    let n = read_all(out_r.as_raw_fd(), &mut out).unwrap();
    out.truncate(n);
    (result, out)
}
