use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid version format '{0}'")]
    InvalidFormat(String),
}
