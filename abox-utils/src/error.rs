use nix::errno::Errno;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("invalid number")]
    InvalidNumber,

    #[error("number out of range")]
    OutOfRange,

    #[error("I/O error: {0}")]
    Io(#[from] Errno),

    #[error("nothing to pack")]
    NothingToPack,

    #[error("allocation failed")]
    Alloc,
}

pub type Result<T> = std::result::Result<T, Error>;
