use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{
    DirectDownload, DownloadRequest, DownloadableFile, GateStatus, KeysReport, LocalizationClient,
    UploadRequest,
};

/// Records every call and answers from canned data.
#[derive(Default)]
pub struct FakeLocalizationClient {
    pub sent_batches: Mutex<Vec<Vec<String>>>,
    pub uploads: Mutex<Vec<UploadRequest>>,
    pub direct_downloads: Mutex<Vec<DirectDownload>>,
    pub listings: Mutex<Vec<DownloadRequest>>,
    pub fetched_urls: Mutex<Vec<String>>,
    direct_body: Vec<u8>,
    files: Vec<(DownloadableFile, Vec<u8>)>,
    failing_batches: Vec<usize>,
    failing_upload: Option<String>,
    gate: Option<GateStatus>,
}

impl FakeLocalizationClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_direct_body(mut self, body: &[u8]) -> Self {
        self.direct_body = body.to_vec();
        self
    }

    pub fn with_file(mut self, language: Option<&str>, namespace: Option<&str>, body: &[u8]) -> Self {
        let url = format!(
            "https://cdn.example.com/{}/{}",
            namespace.unwrap_or("-"),
            language.unwrap_or("-")
        );
        let file = DownloadableFile {
            url,
            language: language.map(String::from),
            namespace: namespace.map(String::from),
        };
        self.files.push((file, body.to_vec()));
        self
    }

    /// Zero-based batch indices answered with a rejection.
    pub fn failing_batches(mut self, indices: &[usize]) -> Self {
        self.failing_batches = indices.to_vec();
        self
    }

    /// Reject uploads of files whose path ends with `suffix`.
    pub fn failing_upload(mut self, suffix: &str) -> Self {
        self.failing_upload = Some(suffix.to_string());
        self
    }

    pub fn with_gate(mut self, gate: GateStatus) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn sent_batches(&self) -> Vec<Vec<String>> {
        self.sent_batches.lock().unwrap().clone()
    }

    pub fn fetched_urls(&self) -> Vec<String> {
        let mut urls = self.fetched_urls.lock().unwrap().clone();
        urls.sort();
        urls
    }

    fn rejection(message: &str) -> AppError {
        AppError::ServerRejection { status: 400, message: message.to_string() }
    }
}

impl LocalizationClient for FakeLocalizationClient {
    fn send_keys(&self, keys: &[String]) -> Result<KeysReport, AppError> {
        let mut batches = self.sent_batches.lock().unwrap();
        let index = batches.len();
        batches.push(keys.to_vec());
        if self.failing_batches.contains(&index) {
            return Err(Self::rejection("batch rejected"));
        }
        Ok(KeysReport { unique_keys_processed: keys.len() as u64, processed_with_warnings: false })
    }

    fn upload_file(&self, request: &UploadRequest) -> Result<(), AppError> {
        self.uploads.lock().unwrap().push(request.clone());
        match &self.failing_upload {
            Some(suffix) if request.path.to_string_lossy().ends_with(suffix.as_str()) => {
                Err(Self::rejection("upload rejected"))
            }
            _ => Ok(()),
        }
    }

    fn download_file(&self, request: &DirectDownload) -> Result<Vec<u8>, AppError> {
        self.direct_downloads.lock().unwrap().push(request.clone());
        Ok(self.direct_body.clone())
    }

    fn fetch_downloadable_files(
        &self,
        request: &DownloadRequest,
    ) -> Result<Vec<DownloadableFile>, AppError> {
        self.listings.lock().unwrap().push(request.clone());
        Ok(self
            .files
            .iter()
            .filter(|(file, _)| request.language.is_none() || file.language == request.language)
            .map(|(file, _)| file.clone())
            .collect())
    }

    fn fetch_file(&self, file: &DownloadableFile) -> Result<Vec<u8>, AppError> {
        self.fetched_urls.lock().unwrap().push(file.url.clone());
        self.files
            .iter()
            .find(|(candidate, _)| candidate.url == file.url)
            .map(|(_, body)| body.clone())
            .ok_or_else(|| AppError::ServerRejection { status: 404, message: file.url.clone() })
    }

    fn fetch_gate_status(&self) -> Result<GateStatus, AppError> {
        self.gate.clone().ok_or_else(|| Self::rejection("no gate configured"))
    }
}
