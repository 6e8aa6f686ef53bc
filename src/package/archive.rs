//! Zip archive creation for a packaged source tree

use std::fs::File;
use std::io;
use std::path::Path;

use chrono::NaiveDate;
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::package::error::PackageError;

/// Archive file name: the source directory's name followed by the date as
/// `DDMMYYYY`.
pub fn archive_name(source_dir_name: &str, date: NaiveDate) -> String {
    format!("{}{}.zip", source_dir_name, date.format("%d%m%Y"))
}

/// Zip `source_dir` into `archive_path`.
///
/// Entries are rooted at `source_dir`'s final component, so unpacking the
/// archive recreates the directory itself rather than spilling its
/// contents.
pub fn create_archive(source_dir: &Path, archive_path: &Path) -> Result<(), PackageError> {
    let root_name = source_dir
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| PackageError::InvalidSourcePath(source_dir.display().to_string()))?;

    info!("creating archive {}", archive_path.display());

    let file = File::create(archive_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_dir_recursive(&mut writer, source_dir, root_name, options)?;
    writer.finish()?;

    info!("archive created: {}", archive_path.display());
    Ok(())
}

fn add_dir_recursive(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    prefix: &str,
    options: SimpleFileOptions,
) -> Result<(), PackageError> {
    writer.add_directory(format!("{prefix}/"), options)?;

    // sorted entries keep the archive layout stable across runs
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<Result<_, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = entry.file_name();
        let entry_name = format!("{}/{}", prefix, name.to_string_lossy());

        if path.is_dir() {
            add_dir_recursive(writer, &path, &entry_name, options)?;
        } else {
            writer.start_file(entry_name, options)?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, writer)?;
        }
    }

    Ok(())
}
