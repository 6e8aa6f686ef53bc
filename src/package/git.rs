//! Git clone wrapper shelling out to the system `git` binary

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::package::error::PackageError;

/// Derive the checkout directory name from a clone URL: the last path
/// segment with any `.git` suffix stripped.
pub fn repo_dir_name(repo_url: &str) -> Result<String, PackageError> {
    repo_url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .map(|segment| segment.strip_suffix(".git").unwrap_or(segment))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| PackageError::InvalidRepoUrl(repo_url.to_string()))
}

/// Run `git clone <url> <dest>`. An existing destination is removed first.
pub async fn clone_repository(repo_url: &str, dest: &Path) -> Result<(), PackageError> {
    if dest.exists() {
        info!("removing existing checkout at {}", dest.display());
        std::fs::remove_dir_all(dest)?;
    }

    info!("cloning {repo_url}");

    let mut cmd = Command::new("git");
    cmd.arg("clone").arg(repo_url).arg(dest);

    cmd.env("GIT_TERMINAL_PROMPT", "0");
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    debug!("spawning git clone");

    let output = cmd.output().await?;

    if !output.status.success() {
        return Err(PackageError::GitClone {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    debug!("git clone succeeded");
    Ok(())
}
