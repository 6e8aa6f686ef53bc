use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("git clone failed (status {status}): {stderr}")]
    GitClone { status: ExitStatus, stderr: String },

    #[error("cannot derive a repository name from '{0}'")]
    InvalidRepoUrl(String),

    #[error("invalid source path '{0}'")]
    InvalidSourcePath(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}
