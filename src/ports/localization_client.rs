//! SimpleLocalize API client port definition.

use std::path::PathBuf;

use crate::domain::AppError;

/// Multipart upload of one translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub path: PathBuf,
    pub format: String,
    /// Comma-separated upload options.
    pub options: Option<String>,
    pub language: Option<String>,
    /// Discriminator for multi-file uploads.
    pub relative_path: Option<String>,
}

/// Single-payload download, written as-is by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectDownload {
    pub format: String,
    pub language: Option<String>,
}

/// Query for the files the server prepared for a format and option set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub format: String,
    pub options: Vec<String>,
    pub language: Option<String>,
}

/// One server-side file ready to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadableFile {
    pub url: String,
    pub language: Option<String>,
    pub namespace: Option<String>,
}

/// Server summary after a key batch was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeysReport {
    pub unique_keys_processed: u64,
    pub processed_with_warnings: bool,
}

/// Quality gate verdict computed by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateStatus {
    pub gate_result: String,
    pub message: String,
    pub status: i32,
}

/// Port for SimpleLocalize API operations.
///
/// Implementations are shared between download workers, hence `Sync`.
pub trait LocalizationClient: Sync {
    /// Send one batch of extracted keys.
    fn send_keys(&self, keys: &[String]) -> Result<KeysReport, AppError>;

    /// Upload one translation file.
    fn upload_file(&self, request: &UploadRequest) -> Result<(), AppError>;

    /// Download a single payload for a format and optional language.
    fn download_file(&self, request: &DirectDownload) -> Result<Vec<u8>, AppError>;

    /// List the files prepared for a templated download.
    fn fetch_downloadable_files(
        &self,
        request: &DownloadRequest,
    ) -> Result<Vec<DownloadableFile>, AppError>;

    /// Fetch the content of one listed file.
    fn fetch_file(&self, file: &DownloadableFile) -> Result<Vec<u8>, AppError>;

    /// Query the quality gate for the configured profile.
    fn fetch_gate_status(&self) -> Result<GateStatus, AppError>;
}
