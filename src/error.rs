use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubError {
    #[error("cannot access {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is too small to fingerprint ({size} bytes)", .path.display())]
    UnsupportedFile { path: PathBuf, size: u64 },

    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed lookup response: {0}")]
    MalformedResponse(String),

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not an existing directory", .0.display())]
    NotADirectory(PathBuf),
}

pub type Result<T> = std::result::Result<T, SubError>;
