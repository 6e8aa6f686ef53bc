//! End-to-end packaging flow: clone, prune, stamp, archive

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::package::archive::{archive_name, create_archive};
use crate::package::error::PackageError;
use crate::package::git::{clone_repository, repo_dir_name};
use crate::package::manifest::write_manifest;

/// Inputs for a packaging run.
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Repository clone URL.
    pub repo_url: String,
    /// Path of the source tree to keep, relative to the checkout root.
    pub source_path: PathBuf,
    /// Version written into the manifest.
    pub version: String,
    /// Directory the checkout and archive are created in.
    pub work_dir: PathBuf,
}

/// Remove every top-level directory under `root` except `keep`.
///
/// Files at the root are left in place. Deletion failures are logged and
/// skipped so one stubborn entry does not abort the run.
pub fn prune_checkout(root: &Path, keep: &str) -> Result<(), PackageError> {
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() || entry.file_name() == keep {
            continue;
        }

        info!("removing {}", path.display());
        if let Err(err) = fs::remove_dir_all(&path) {
            warn!("failed to remove {}: {err}", path.display());
        }
    }
    Ok(())
}

fn first_component(path: &Path) -> Result<String, PackageError> {
    path.components()
        .next()
        .and_then(|component| component.as_os_str().to_str())
        .map(str::to_string)
        .ok_or_else(|| PackageError::InvalidSourcePath(path.display().to_string()))
}

/// Clone, prune, stamp, and archive. Returns the path of the created
/// archive.
pub async fn run(opts: &PackageOptions) -> Result<PathBuf, PackageError> {
    let repo_name = repo_dir_name(&opts.repo_url)?;
    let checkout = opts.work_dir.join(&repo_name);

    clone_repository(&opts.repo_url, &checkout).await?;

    let keep = first_component(&opts.source_path)?;
    prune_checkout(&checkout, &keep)?;

    let source_dir = checkout.join(&opts.source_path);
    write_manifest(&source_dir, &opts.version)?;

    let dir_name = source_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PackageError::InvalidSourcePath(source_dir.display().to_string()))?;
    let archive_path = opts
        .work_dir
        .join(archive_name(dir_name, Local::now().date_naive()));
    create_archive(&source_dir, &archive_path)?;

    info!("packaging complete");
    Ok(archive_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("src/app", "src")]
    #[case("app", "app")]
    #[case("a/b/c", "a")]
    fn first_component_takes_the_leading_segment(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(first_component(Path::new(path)).unwrap(), expected);
    }

    #[test]
    fn first_component_rejects_empty_paths() {
        assert!(matches!(
            first_component(Path::new("")),
            Err(PackageError::InvalidSourcePath(_))
        ));
    }

    #[test]
    fn prune_checkout_keeps_only_the_named_directory_and_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        for dir in ["src", "docs", "vendor"] {
            fs::create_dir(root.join(dir)).unwrap();
        }
        fs::write(root.join("README.md"), "readme").unwrap();

        prune_checkout(root, "src").unwrap();

        assert!(root.join("src").is_dir());
        assert!(!root.join("docs").exists());
        assert!(!root.join("vendor").exists());
        assert!(root.join("README.md").is_file());
    }
}
