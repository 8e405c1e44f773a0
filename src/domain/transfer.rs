use std::path::PathBuf;

/// A local file scheduled for upload.
///
/// Files found by placeholder matching carry the inferred language. Multi-file
/// uploads carry the path relative to the upload root instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileToUpload {
    pub path: PathBuf,
    pub language: Option<String>,
    pub relative_path: Option<String>,
}

impl FileToUpload {
    pub fn with_language(path: impl Into<PathBuf>, language: Option<String>) -> Self {
        Self { path: path.into(), language, relative_path: None }
    }

    pub fn with_relative_path(path: impl Into<PathBuf>, relative_path: String) -> Self {
        Self { path: path.into(), language: None, relative_path: Some(relative_path) }
    }
}
