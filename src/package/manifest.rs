//! `version.json` stamping for a packaged source tree

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::package::error::PackageError;

/// File name the manifest is written under.
pub const MANIFEST_FILE: &str = "version.json";

/// Extensions of files listed in the manifest.
const SOURCE_EXTENSIONS: [&str; 3] = ["py", "js", "sh"];

/// Contents of the stamped manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub files: Vec<String>,
}

/// Write `version.json` into `source_dir`, creating the directory if needed.
///
/// `files` lists the directory's source files by extension, sorted so the
/// manifest is stable across runs.
pub fn write_manifest(source_dir: &Path, version: &str) -> Result<Manifest, PackageError> {
    if !source_dir.exists() {
        fs::create_dir_all(source_dir)?;
    }

    let mut files: Vec<String> = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
        })
        .collect();
    files.sort();

    let manifest = Manifest {
        name: "hello world".to_string(),
        version: version.to_string(),
        files,
    };

    let path = source_dir.join(MANIFEST_FILE);
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
    info!("wrote manifest to {}", path.display());

    Ok(manifest)
}
