use std::fs::File;
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::ffi::OsStrExt;

use abox_utils::{read_some, write_all};

use super::{options, prog_name, Streams};
use crate::error::{AboxError, Result};

const CHUNK: usize = 64 * 1024;

/// `cat [-u] [FILE]...`, where `-` names standard input. Whatever each
/// read returns is written out before the next read, so `-u` is accepted
/// and ignored.
pub fn run(argv: &[Vec<u8>], streams: &Streams) -> Result<i32> {
    let operands = options(argv, "u", |_, _| {})?;
    let stdin_only = [b"-".to_vec()];
    let files = if operands.is_empty() { &stdin_only[..] } else { operands };

    let mut buf = vec![0u8; CHUNK];
    let mut status = 0;
    for name in files {
        if name.as_slice() == b"-" {
            copy(streams.stdin, streams.stdout, &mut buf)?;
            continue;
        }
        let path = std::ffi::OsStr::from_bytes(name);
        match File::open(path) {
            Ok(file) => {
                copy(file.as_raw_fd(), streams.stdout, &mut buf)?;
            }
            Err(source) => {
                let err = AboxError::Open {
                    path: path.to_string_lossy().into_owned(),
                    source,
                };
                eprintln!("{}: {}", prog_name(argv), err);
                status = 1;
            }
        }
    }
    Ok(status)
}

fn copy(from: RawFd, to: RawFd, buf: &mut [u8]) -> Result<u64> {
    let mut total = 0u64;
    loop {
        let n = read_some(from, buf)?;
        if n == 0 {
            break;
        }
        write_all(to, &buf[..n])?;
        total += n as u64;
    }
    tracing::debug!(fd = from, bytes = total, "copied");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applets::capture;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn copies_stdin_by_default() {
        let (result, out) = capture(run, &["cat"], b"line one\nline two\n");
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, b"line one\nline two\n");
    }

    #[test]
    fn concatenates_files_and_stdin() {
        let mut a = tempfile::NamedTempFile::new().unwrap();
        a.write_all(b"first\n").unwrap();
        let mut b = tempfile::NamedTempFile::new().unwrap();
        b.write_all(b"third\n").unwrap();
        let a_path = a.path().to_str().unwrap().to_string();
        let b_path = b.path().to_str().unwrap().to_string();

        let (result, out) = capture(run, &["cat", "-u", &a_path, "-", &b_path], b"second\n");
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, b"first\nsecond\nthird\n");
    }

    #[test]
    fn copies_more_than_one_chunk() {
        let data: Vec<u8> = (0..CHUNK * 3 + 17).map(|i| (i % 251) as u8).collect();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let (streams_in, _) = nix::unistd::pipe().unwrap();
        let out = tempfile::tempfile().unwrap();
        let streams = Streams {
            stdin: streams_in.as_raw_fd(),
            stdout: out.as_raw_fd(),
        };
        let argv = vec![b"cat".to_vec(), path.into_bytes()];
        assert_eq!(run(&argv, &streams).unwrap(), 0);

        let written = std::fs::read(format!("/proc/self/fd/{}", out.as_raw_fd())).unwrap();
        assert_eq!(written.len(), data.len());
        assert!(written == data);
    }

    #[test]
    fn forwards_input_before_eof() {
        use nix::fcntl::{fcntl, FcntlArg, OFlag};
        use std::time::{Duration, Instant};

        let (in_r, in_w) = nix::unistd::pipe().unwrap();
        let (out_r, out_w) = nix::unistd::pipe().unwrap();
        fcntl(out_r.as_raw_fd(), FcntlArg::F_SETFL(OFlag::O_NONBLOCK)).unwrap();

        let cat = std::thread::spawn(move || {
            let streams = Streams {
                stdin: in_r.as_raw_fd(),
                stdout: out_w.as_raw_fd(),
            };
            run(&[b"cat".to_vec(), b"-u".to_vec()], &streams)
        });

        write_all(in_w.as_raw_fd(), b"hello\n").unwrap();
        let mut buf = [0u8; 16];
        let deadline = Instant::now() + Duration::from_secs(5);
        let n = loop {
            match nix::unistd::read(out_r.as_raw_fd(), &mut buf) {
                Ok(n) => break n,
                Err(nix::errno::Errno::EAGAIN) if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(e) => panic!("no output while stdin is open: {e}"),
            }
        };
        assert_eq!(&buf[..n], b"hello\n");

        drop(in_w);
        assert_eq!(cat.join().unwrap().unwrap(), 0);
    }

    #[test]
    fn missing_file_sets_status_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");
        let missing = missing.to_str().unwrap();
        let (result, out) = capture(run, &["cat", missing, "-"], b"still here\n");
        assert_eq!(result.unwrap(), 1);
        assert_eq!(out, b"still here\n");
    }

    #[test]
    fn unknown_option() {
        let (result, _) = capture(run, &["cat", "-v"], b"");
        assert_eq!(result.unwrap_err().to_string(), "cat: invalid option -- 'v'");
    }
}
