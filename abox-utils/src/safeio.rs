//! Blocking reads and writes that survive interruptions.
//!
//! A single `read(2)` or `write(2)` may transfer fewer bytes than asked
//! for (pipes hand out at most one buffer's worth at a time) or fail
//! with `EINTR`/`EAGAIN`. These wrappers loop until the whole buffer has
//! moved, the other end reports EOF, or a real error occurs.

use std::os::fd::RawFd;

use nix::errno::Errno;

use crate::error::{Error, Result};

/// Errors that are retried instead of reported.
pub fn is_transient(err: Errno) -> bool {
    matches!(err, Errno::EINTR | Errno::EAGAIN)
}

/// Drive `op` until `len` bytes have been transferred.
///
/// `op` receives the number of bytes done so far and performs one
/// transfer on the remainder. A zero-byte transfer ends the loop
/// (EOF) and the running total is returned.
pub fn transfer_all<F>(what: &'static str, len: usize, mut op: F) -> Result<usize>
where
    F: FnMut(usize) -> nix::Result<usize>,
{
    let mut done = 0;
    while done < len {
        match op(done) {
            Ok(0) => break,
            Ok(n) => {
                debug_assert!(n <= len - done);
                done += n;
            }
            Err(e) if is_transient(e) => continue,
            Err(e) => {
                tracing::warn!(op = what, done, len, errno = %e, "transfer failed");
                return Err(Error::Io(e));
            }
        }
    }
    Ok(done)
}

fn check_fd(fd: RawFd) -> Result<()> {
    if fd < 0 {
        return Err(Error::InvalidArgument("negative file descriptor"));
    }
    Ok(())
}

fn sys_read(fd: RawFd, buf: &mut [u8]) -> nix::Result<usize> {
    // SAFETY: the pointer and length describe a live, writable slice.
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    Errno::result(n).map(|n| n as usize)
}

fn sys_write(fd: RawFd, buf: &[u8]) -> nix::Result<usize> {
    // SAFETY: the pointer and length describe a live slice.
    let n = unsafe { libc::write(fd, buf.as_ptr().cast(), buf.len()) };
    Errno::result(n).map(|n| n as usize)
}

/// Fill `buf` from `fd`.
///
/// Returns `buf.len()` unless EOF came first, in which case the number of
/// bytes read before it. An empty `buf` returns 0 without touching `fd`.
///
/// # Errors
///
/// `InvalidArgument` for a negative descriptor, `Io` for any error other
/// than `EINTR`/`EAGAIN`.
pub fn read_all(fd: RawFd, buf: &mut [u8]) -> Result<usize> {
    check_fd(fd)?;
    if buf.is_empty() {
        return Ok(0);
    }
    let len = buf.len();
    transfer_all("read", len, |done| sys_read(fd, &mut buf[done..]))
}

/// One `read(2)` into `buf`, retried while it fails transiently.
///
/// Returns as soon as any bytes arrive, so a reader on a pipe or a
/// terminal sees data without waiting for `buf` to fill. 0 means EOF, or
/// an empty `buf`.
///
/// # Errors
///
/// Same as [`read_all`].
pub fn read_some(fd: RawFd, buf: &mut [u8]) -> Result<usize> {
    check_fd(fd)?;
    if buf.is_empty() {
        return Ok(0);
    }
    loop {
        match sys_read(fd, buf) {
            Ok(n) => return Ok(n),
            Err(e) if is_transient(e) => continue,
            Err(e) => {
                tracing::warn!(op = "read", len = buf.len(), errno = %e, "transfer failed");
                return Err(Error::Io(e));
            }
        }
    }
}

/// Write all of `buf` to `fd`.
///
/// # Errors
///
/// `InvalidArgument` for a negative descriptor, `Io` for any error other
/// than `EINTR`/`EAGAIN`.
pub fn write_all(fd: RawFd, buf: &[u8]) -> Result<usize> {
    check_fd(fd)?;
    if buf.is_empty() {
        return Ok(0);
    }
    transfer_all("write", buf.len(), |done| sys_write(fd, &buf[done..]))
}
