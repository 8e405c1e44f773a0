//! Unpacking of zip bundles returned for templated downloads.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use zip::ZipArchive;

use crate::domain::AppError;
use crate::domain::template_key::directory_before_template_key;

/// Name parts of the temporary archive written next to the extracted files.
pub const ARCHIVE_PREFIX: &str = "translations";
pub const ARCHIVE_SUFFIX: &str = ".zip";

const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Whether the payload is a zip archive rather than a translation file.
pub fn is_archive(body: &[u8]) -> bool {
    body.starts_with(ZIP_SIGNATURE)
}

/// Unpack `body` into the directory preceding the first placeholder of `template`.
///
/// The archive is stored under a unique `translations*.zip` name in that
/// directory, so concurrent unpacks never share it, and is removed once
/// extraction finishes, whether or not it succeeded.
pub fn unpack_into_template(template: &str, body: &[u8]) -> Result<Vec<PathBuf>, AppError> {
    let root = match directory_before_template_key(template) {
        "" => Path::new("."),
        dir => Path::new(dir),
    };
    fs::create_dir_all(root).map_err(|e| AppError::file_access(root, e))?;

    let mut archive = tempfile::Builder::new()
        .prefix(ARCHIVE_PREFIX)
        .suffix(ARCHIVE_SUFFIX)
        .tempfile_in(root)
        .map_err(|e| AppError::file_access(root, e))?;
    let archive_path = archive.path().to_path_buf();
    archive.write_all(body).map_err(|e| AppError::file_access(&archive_path, e))?;

    let extracted = extract(&archive_path, root);
    let removed = archive.close().map_err(|e| AppError::file_access(&archive_path, e));
    let extracted = extracted?;
    removed?;

    debug!("Unpacked {} file(s) into {}", extracted.len(), root.display());
    Ok(extracted)
}

fn extract(archive_path: &Path, root: &Path) -> Result<Vec<PathBuf>, AppError> {
    let file = File::open(archive_path).map_err(|e| AppError::file_access(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| AppError::Archive(e.to_string()))?;

    let mut written = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| AppError::Archive(e.to_string()))?;
        let Some(name) = entry.enclosed_name() else {
            return Err(AppError::Archive(format!(
                "entry '{}' points outside the target directory",
                entry.name()
            )));
        };
        let target = root.join(name);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|e| AppError::file_access(&target, e))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::file_access(parent, e))?;
        }
        let mut output = File::create(&target).map_err(|e| AppError::file_access(&target, e))?;
        io::copy(&mut entry, &mut output).map_err(|e| AppError::file_access(&target, e))?;
        written.push(target);
    }

    Ok(written)
}
