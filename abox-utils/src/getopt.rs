//! POSIX `getopt` as an explicit parse session.
//!
//! The C interface keeps its cursor in process globals (`optind`,
//! `optarg`, `optopt`). Here the cursor lives in a [`Getopt`] value owned
//! by the caller; one value covers one walk over one argument vector, and
//! [`Getopt::reset`] rewinds it.
//!
//! Only POSIX ordering is supported: scanning stops at the first operand.
//! A leading `+` in the option string is accepted for compatibility and
//! otherwise ignored. A leading `:` (after any `+`) selects silent mode,
//! where a missing argument is reported as `':'` and no diagnostic is
//! produced.
//!
//! Characters following a flag in the same token are read as more
//! bundled options (`-ab` is `-a -b`). So `-datoz` against `"c:d"` yields
//! `d` and then an unknown-option error for each of `a`, `t`, `o`, `z`;
//! treating the tail as an unexpected value is not supported.

use crate::bytescan;

const STRICT_ORDER: u8 = b'+';
const ARG_MARKER: u8 = b':';

/// Whether a recognized option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgMode {
    Flag,
    Required,
}

/// A parsed option string such as `"ab:c"`.
#[derive(Debug, Clone, Copy)]
pub struct OptSpec<'s> {
    letters: &'s [u8],
    silent: bool,
}

impl<'s> OptSpec<'s> {
    pub fn new<S: AsRef<[u8]> + ?Sized>(spec: &'s S) -> Self {
        let mut letters = bytescan::terminated(spec.as_ref());
        if letters.first() == Some(&STRICT_ORDER) {
            letters = &letters[1..];
        }
        let silent = letters.first() == Some(&ARG_MARKER);
        if silent {
            letters = &letters[1..];
        }
        OptSpec { letters, silent }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Look up option letter `c`. Lookup is case-sensitive and `:` never
    /// matches.
    pub fn lookup(&self, c: u8) -> Option<ArgMode> {
        if c == ARG_MARKER {
            return None;
        }
        let pos = self.letters.iter().position(|&b| b == c)?;
        if self.letters.get(pos + 1) == Some(&ARG_MARKER) {
            Some(ArgMode::Required)
        } else {
            Some(ArgMode::Flag)
        }
    }
}

/// Result of one [`Getopt::parse`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A recognized option letter.
    Matched(u8),
    /// A letter missing from the option string; see [`Getopt::optopt`].
    Unknown,
    /// An option whose argument is missing; see [`Getopt::optopt`].
    MissingArgument,
    /// No more options.
    End,
}

impl Outcome {
    /// The value C `getopt` returns for this outcome in non-silent mode.
    pub fn code(self) -> i32 {
        match self {
            Outcome::Matched(c) => c as i32,
            Outcome::Unknown | Outcome::MissingArgument => b'?' as i32,
            Outcome::End => -1,
        }
    }

    pub fn is_error(self) -> bool {
        matches!(self, Outcome::Unknown | Outcome::MissingArgument)
    }
}

/// Position in the argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Element being scanned (`optind`).
    pub index: usize,
    /// Offset inside a bundled token, 0 when between tokens.
    pub subindex: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor {
            index: 1,
            subindex: 0,
        }
    }
}

/// One parse session over `args`.
#[derive(Debug)]
pub struct Getopt<'a, A> {
    args: &'a [A],
    spec: OptSpec<'a>,
    cursor: Cursor,
    finished: bool,
    optarg: Option<&'a [u8]>,
    optopt: Option<u8>,
    opterr: bool,
    last: Outcome,
}

impl<'a, A: AsRef<[u8]>> Getopt<'a, A> {
    pub fn new<S: AsRef<[u8]> + ?Sized>(args: &'a [A], spec: &'a S) -> Self {
        Getopt {
            args,
            spec: OptSpec::new(spec),
            cursor: Cursor::default(),
            finished: false,
            optarg: None,
            optopt: None,
            opterr: true,
            last: Outcome::End,
        }
    }

    /// Rewind to the start of the vector and clear all outputs.
    pub fn reset(&mut self) {
        self.cursor = Cursor::default();
        self.finished = false;
        self.optarg = None;
        self.optopt = None;
        self.last = Outcome::End;
    }

    /// Enable or disable [`Getopt::diagnostic`] messages (`opterr`).
    pub fn set_opterr(&mut self, on: bool) {
        self.opterr = on;
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Index of the next element to scan.
    pub fn optind(&self) -> usize {
        self.cursor.index
    }

    /// Argument of the option matched by the last call.
    pub fn optarg(&self) -> Option<&'a [u8]> {
        self.optarg
    }

    /// Offending letter of the last error.
    pub fn optopt(&self) -> Option<u8> {
        self.optopt
    }

    /// Elements left once parsing has ended.
    pub fn operands(&self) -> &'a [A] {
        let args: &'a [A] = self.args;
        &args[self.cursor.index.min(args.len())..]
    }

    fn arg(&self, i: usize) -> &'a [u8] {
        let args: &'a [A] = self.args;
        bytescan::terminated(args[i].as_ref())
    }

    fn next_token(&mut self) {
        self.cursor.index += 1;
        self.cursor.subindex = 0;
    }

    /// Scan the next option.
    pub fn parse(&mut self) -> Outcome {
        self.optarg = None;
        self.optopt = None;
        let outcome = self.step();
        tracing::trace!(
            ?outcome,
            index = self.cursor.index,
            subindex = self.cursor.subindex,
            "getopt"
        );
        self.last = outcome;
        outcome
    }

    /// Like [`Getopt::parse`] but returns the C `getopt` value, including
    /// `':'` for a missing argument in silent mode.
    pub fn parse_code(&mut self) -> i32 {
        match self.parse() {
            Outcome::MissingArgument if self.spec.is_silent() => ARG_MARKER as i32,
            outcome => outcome.code(),
        }
    }

    fn step(&mut self) -> Outcome {
        let argc = self.args.len();
        if self.finished {
            return Outcome::End;
        }

        if self.cursor.subindex == 0 {
            if self.cursor.index >= argc {
                return Outcome::End;
            }
            let arg = self.arg(self.cursor.index);
            if arg.len() < 2 || arg[0] != b'-' {
                if arg == b"-" {
                    self.finished = true;
                }
                return Outcome::End;
            }
            if arg[1] == b'-' {
                if arg.len() == 2 {
                    self.next_token();
                    self.finished = true;
                }
                return Outcome::End;
            }
            self.cursor.subindex = 1;
        }

        let token = self.arg(self.cursor.index);
        let c = token[self.cursor.subindex];
        self.cursor.subindex += 1;
        let exhausted = self.cursor.subindex >= token.len();

        match self.spec.lookup(c) {
            None => {
                self.optopt = Some(c);
                if exhausted {
                    self.next_token();
                }
                Outcome::Unknown
            }
            Some(ArgMode::Flag) => {
                if exhausted {
                    self.next_token();
                }
                Outcome::Matched(c)
            }
            Some(ArgMode::Required) => {
                if !exhausted {
                    self.optarg = Some(&token[self.cursor.subindex..]);
                    self.next_token();
                } else if self.cursor.index + 1 < argc {
                    self.optarg = Some(self.arg(self.cursor.index + 1));
                    self.cursor = Cursor {
                        index: self.cursor.index + 2,
                        subindex: 0,
                    };
                } else {
                    self.optopt = Some(c);
                    self.cursor = Cursor {
                        index: argc + 1,
                        subindex: 0,
                    };
                    return Outcome::MissingArgument;
                }
                Outcome::Matched(c)
            }
        }
    }

    /// The message C `getopt` would print to stderr for the last call.
    ///
    /// `None` after a successful call, in silent mode, or with `opterr`
    /// off. The offending letter is copied as a raw byte, so a non-ASCII
    /// letter comes out exactly as glibc prints it.
    pub fn diagnostic_bytes(&self, prog: &[u8]) -> Option<Vec<u8>> {
        if !self.opterr || self.spec.is_silent() {
            return None;
        }
        let c = self.optopt?;
        let text: &[u8] = match self.last {
            Outcome::Unknown => b": invalid option -- '",
            Outcome::MissingArgument => b": option requires an argument -- '",
            _ => return None,
        };
        let mut msg = Vec::with_capacity(prog.len() + text.len() + 2);
        msg.extend_from_slice(prog);
        msg.extend_from_slice(text);
        msg.push(c);
        msg.push(b'\'');
        Some(msg)
    }

    /// [`Getopt::diagnostic_bytes`] as text; a non-UTF-8 letter shows as
    /// U+FFFD.
    pub fn diagnostic(&self, prog: &str) -> Option<String> {
        self.diagnostic_bytes(prog.as_bytes())
            .map(|msg| String::from_utf8_lossy(&msg).into_owned())
    }
}

impl<'a, A: AsRef<[u8]>> Iterator for Getopt<'a, A> {
    type Item = Outcome;

    fn next(&mut self) -> Option<Outcome> {
        match self.parse() {
            Outcome::End => None,
            outcome => Some(outcome),
        }
    }
}
