//! POSIX primitives for the abox toolset.
//!
//! - [`getopt`]: single-letter option parsing with an explicit cursor
//! - [`safeio`]: `read(2)`/`write(2)` loops that retry on `EINTR`/`EAGAIN`
//! - [`argpack`]: argument vectors packed into one newline-terminated line
//! - [`bytescan`]: NULL-tolerant `strlen`, `strchr` and `basename`
//! - [`intparse`]: strict `strtol` and seconds-to-duration conversion
//! - [`errno`]: the calling thread's `errno`

pub mod argpack;
pub mod bytescan;
pub mod errno;
pub mod error;
pub mod getopt;
pub mod intparse;
pub mod safeio;

pub use argpack::{pack, total_bytes, PackedArgs};
pub use error::{Error, Result};
pub use getopt::{Getopt, Outcome};
pub use safeio::{read_all, read_some, write_all};
