use std::fs;
use std::path::{Path, PathBuf};

use crate::adapters::archive;
use crate::domain::AppError;
use crate::domain::template_key::render;
use crate::ports::DownloadableFile;

/// Write `body` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, body: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AppError::file_access(parent, e))?;
    }
    fs::write(path, body).map_err(|e| AppError::file_access(path, e))
}

/// Write one listed file into `template`.
///
/// Zip payloads are unpacked around the template's placeholder; anything else
/// lands on the rendered path.
pub fn write_downloaded(
    template: &str,
    file: &DownloadableFile,
    body: &[u8],
) -> Result<Vec<PathBuf>, AppError> {
    if archive::is_archive(body) {
        return archive::unpack_into_template(template, body);
    }

    let target = PathBuf::from(render(template, file.language.as_deref(), file.namespace.as_deref()));
    write_file(&target, body)?;
    Ok(vec![target])
}
