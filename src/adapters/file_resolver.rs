//! Resolution of configured upload paths into files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::domain::template_key::{FileNamePattern, TemplateKey};
use crate::domain::{AppError, FileToUpload, UploadMode};

/// Files to upload for the selected mode.
pub fn files_to_upload(mode: &UploadMode) -> Result<Vec<FileToUpload>, AppError> {
    match mode {
        UploadMode::Single { path, language } => {
            Ok(vec![FileToUpload::with_language(path, language.clone())])
        }
        UploadMode::Templated { path } => find_matching_files(path, TemplateKey::Language),
        UploadMode::MultiFile { root } => files_for_multi_file_upload(Path::new(root)),
    }
}

/// Siblings of the templated path whose names fit the placeholder pattern.
///
/// A path without the placeholder resolves to itself with no language.
pub fn find_matching_files(
    path_with_template_key: &str,
    key: TemplateKey,
) -> Result<Vec<FileToUpload>, AppError> {
    let Some(pattern) = FileNamePattern::parse(path_with_template_key, key)? else {
        return Ok(vec![FileToUpload::with_language(path_with_template_key, None)]);
    };

    let parent = match Path::new(path_with_template_key).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let entries = fs::read_dir(&parent).map_err(|e| AppError::file_access(&parent, e))?;
    let mut found = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| AppError::file_access(&parent, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(language) = pattern.extract(file_name) {
            found.push(FileToUpload::with_language(path.clone(), Some(language)));
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(found)
}

/// Every file under `root`, keyed by its `/`-separated path relative to `root`.
pub fn files_for_multi_file_upload(root: &Path) -> Result<Vec<FileToUpload>, AppError> {
    if !root.is_dir() {
        return Err(AppError::config_error(format!(
            "Upload path '{}' must be a directory to use the MULTI_FILE upload option",
            root.display()
        )));
    }

    Ok(walk_files(root, &|_| false, Unreadable::Fail)?
        .into_iter()
        .filter_map(|path| {
            let relative = relative_path(root, &path)?;
            Some(FileToUpload::with_relative_path(path, relative))
        })
        .collect())
}

/// What `walk_files` does with a directory or entry below the root that cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unreadable {
    Fail,
    /// Log a warning and keep walking.
    Skip,
}

/// Regular files below `root`, sorted, descending into every directory
/// for which `skip_dir` returns false. An unreadable `root` is always an error.
pub fn walk_files(
    root: &Path,
    skip_dir: &dyn Fn(&Path) -> bool,
    unreadable: Unreadable,
) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let policy = if dir == root { Unreadable::Fail } else { unreadable };
        let read = fs::read_dir(&dir).map_err(|e| AppError::file_access(&dir, e));
        let Some(entries) = tolerate(read, policy)? else {
            continue;
        };
        for entry in entries {
            let entry = entry.map_err(|e| AppError::file_access(&dir, e));
            let Some(entry) = tolerate(entry, unreadable)? else {
                continue;
            };
            let path = entry.path();
            let file_type = entry.file_type().map_err(|e| AppError::file_access(&path, e));
            let Some(file_type) = tolerate(file_type, unreadable)? else {
                continue;
            };
            if file_type.is_dir() {
                if !skip_dir(&path) {
                    pending.push(path);
                }
            } else if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// `Ok(None)` when the failure was logged and the entry is skipped.
fn tolerate<T>(result: Result<T, AppError>, unreadable: Unreadable) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if unreadable == Unreadable::Skip => {
            warn!("Skipping unreadable path: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    Some(parts.join("/"))
}
