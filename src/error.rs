//! Errors raised while assembling or writing a job document.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("\"{key}\" is not a valid key for {option} (expected one of: {})", .allowed.join(", "))]
    InvalidKey {
        key: String,
        option: String,
        allowed: &'static [&'static str],
    },
    #[error("unsupported KeepAlive branch \"{0}\" (expected \"always\" or \"depends\")")]
    UnsupportedBranch(String),
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
