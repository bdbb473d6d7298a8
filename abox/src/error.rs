use std::io;

#[derive(Debug, thiserror::Error)]
pub enum AboxError {
    /// A getopt diagnostic, already prefixed with the program name.
    #[error("{0}")]
    BadOption(String),

    #[error("{0}")]
    Usage(String),

    #[error("{path}: {source}")]
    Open { path: String, source: io::Error },

    #[error(transparent)]
    Utils(#[from] abox_utils::Error),
}

impl AboxError {
    pub fn exit_code(&self) -> i32 {
        match self {
            AboxError::BadOption(_) | AboxError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, AboxError>;
