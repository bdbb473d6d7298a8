//! Access to the calling thread's `errno`.

pub use nix::errno::Errno;

pub fn last_errno() -> Errno {
    Errno::last()
}

pub fn set_errno(value: Errno) {
    Errno::set_raw(value as i32);
}
