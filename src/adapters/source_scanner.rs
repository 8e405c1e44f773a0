//! Source tree scanning for translation keys.

use std::path::{Component, Path, PathBuf};

use log::{debug, warn};

use crate::adapters::file_resolver::{Unreadable, walk_files};
use crate::domain::{AppError, ExtractionResult, KeyExtractor};

const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", "build", "dist", "target"];

/// Scan `search_dir` with `extractor`, skipping `ignore_paths`.
///
/// An ignore entry matches a path when the path, or the path relative to
/// `search_dir`, starts with it. Unreadable files and directories below
/// `search_dir` are logged and skipped.
pub fn scan(
    search_dir: &Path,
    extractor: &KeyExtractor,
    ignore_paths: &[String],
) -> Result<ExtractionResult, AppError> {
    let ignored = |path: &Path| is_ignored(search_dir, path, ignore_paths);
    let skip_dir = |path: &Path| {
        ignored(path)
            || path.file_name().and_then(|n| n.to_str()).is_some_and(|name| {
                name.starts_with('.') || SKIPPED_DIRECTORIES.contains(&name)
            })
    };

    let mut result = ExtractionResult::default();
    for path in walk_files(search_dir, &skip_dir, Unreadable::Skip)? {
        if !extractor.handles(&path) || ignored(&path) {
            continue;
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!("Cannot read file from path {}: {}", path.display(), err);
                continue;
            }
        };

        let keys = extractor.extract(&content);
        debug!("{}: {} key(s)", path.display(), keys.len());
        result.keys.extend(keys);
        result.processed_files.push(path);
    }

    Ok(result)
}

fn is_ignored(search_dir: &Path, path: &Path, ignore_paths: &[String]) -> bool {
    let search_dir = without_current_dir(search_dir);
    let path = without_current_dir(path);
    let relative = path.strip_prefix(&search_dir).unwrap_or(&path);
    ignore_paths.iter().any(|ignored| {
        let ignored = without_current_dir(Path::new(ignored));
        let ignored_relative = ignored.strip_prefix(&search_dir).unwrap_or(&ignored);
        path.starts_with(&ignored)
            || relative.starts_with(&ignored)
            || relative.starts_with(ignored_relative)
    })
}

fn without_current_dir(path: &Path) -> PathBuf {
    path.components().filter(|c| !matches!(c, Component::CurDir)).collect()
}
