//! SimpleLocalize API client implementation using reqwest.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, Configuration};
use crate::ports::{
    DirectDownload, DownloadRequest, DownloadableFile, GateStatus, KeysReport, LocalizationClient,
    UploadRequest,
};

const TOKEN_HEADER: &str = "X-SimpleLocalize-Token";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// HTTP client for the SimpleLocalize CLI endpoints.
#[derive(Clone)]
pub struct HttpLocalizationClient {
    api_key: String,
    base_url: Url,
    profile: String,
    client: Client,
}

impl std::fmt::Debug for HttpLocalizationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpLocalizationClient")
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpLocalizationClient {
    /// Create a client for the given server root.
    ///
    /// A path in `base_url` is kept as a prefix of every endpoint.
    pub fn new(api_key: String, mut base_url: Url, profile: String) -> Result<Self, AppError> {
        if api_key.trim().is_empty() {
            return Err(AppError::config_error("API key must not be empty"));
        }

        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { api_key, base_url, profile, client })
    }

    /// Create from the loaded configuration.
    pub fn from_configuration(config: &Configuration) -> Result<Self, AppError> {
        let api_key = config.require_api_key()?.to_string();
        Self::new(api_key, config.server_url()?, config.profile.clone())
    }

    fn endpoint(&self, path: &str, query: &[(&str, Option<&str>)]) -> Result<Url, AppError> {
        let mut url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::config_error(format!("Invalid endpoint '{}': {}", path, e)))?;
        let present: Vec<(&str, &str)> =
            query.iter().filter_map(|(name, value)| value.map(|v| (*name, v))).collect();
        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }
        Ok(url)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response, AppError> {
        let response = request
            .header(TOKEN_HEADER, &self.api_key)
            .send()
            .map_err(|e| AppError::Network(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        debug!("{} responded with {}", what, status);
        if status.is_success() { Ok(response) } else { Err(rejection(response)) }
    }

    fn send_for_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, AppError> {
        let envelope: Envelope<T> = self.send(request, what)?.json().map_err(|e| {
            AppError::ParseError { what: format!("{} response", what), details: e.to_string() }
        })?;
        Ok(envelope.data)
    }

    fn send_for_bytes(&self, request: RequestBuilder, what: &str) -> Result<Vec<u8>, AppError> {
        let bytes = self
            .send(request, what)?
            .bytes()
            .map_err(|e| AppError::Network(format!("{} body could not be read: {}", what, e)))?;
        Ok(bytes.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    msg: Option<String>,
}

#[derive(Debug, Serialize)]
struct KeysBody<'a> {
    keys: &'a [String],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeysData {
    #[serde(default)]
    unique_keys_processed: u64,
    #[serde(default)]
    processed_with_warnings: bool,
}

#[derive(Debug, Deserialize)]
struct FilesData {
    #[serde(default)]
    files: Vec<FileDto>,
}

#[derive(Debug, Deserialize)]
struct FileDto {
    url: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    namespace: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GateData {
    gate_result: String,
    #[serde(default)]
    message: String,
    status: i32,
}

fn rejection(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    let envelope_message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|envelope| envelope.msg)
        .filter(|msg| !msg.trim().is_empty());
    let message = match envelope_message {
        Some(message) => message,
        None if body.trim().is_empty() => "Unknown error".to_string(),
        None => body,
    };
    AppError::ServerRejection { status, message }
}

impl LocalizationClient for HttpLocalizationClient {
    fn send_keys(&self, keys: &[String]) -> Result<KeysReport, AppError> {
        let url = self.endpoint("/cli/v1/keys", &[("profile", Some(self.profile.as_str()))])?;
        let data: KeysData =
            self.send_for_data(self.client.post(url).json(&KeysBody { keys }), "Keys upload")?;

        Ok(KeysReport {
            unique_keys_processed: data.unique_keys_processed,
            processed_with_warnings: data.processed_with_warnings,
        })
    }

    fn upload_file(&self, request: &UploadRequest) -> Result<(), AppError> {
        let url = self.endpoint(
            "/cli/v1/upload",
            &[
                ("uploadFormat", Some(request.format.as_str())),
                ("uploadOptions", request.options.as_deref()),
            ],
        )?;

        let mut form = multipart::Form::new()
            .file("file", &request.path)
            .map_err(|e| AppError::file_access(&request.path, e))?;
        if let Some(language) = &request.language {
            form = form.text("languageKey", language.clone());
        }
        if let Some(relative_path) = &request.relative_path {
            form = form.text("relativePath", relative_path.clone());
        }

        self.send(self.client.post(url).multipart(form), "Upload")?;
        Ok(())
    }

    fn download_file(&self, request: &DirectDownload) -> Result<Vec<u8>, AppError> {
        let url = self.endpoint(
            "/cli/v1/download",
            &[
                ("downloadFormat", Some(request.format.as_str())),
                ("languageKey", request.language.as_deref()),
            ],
        )?;
        self.send_for_bytes(self.client.get(url), "Download")
    }

    fn fetch_downloadable_files(
        &self,
        request: &DownloadRequest,
    ) -> Result<Vec<DownloadableFile>, AppError> {
        let options = request.options.join(",");
        let url = self.endpoint(
            "/cli/v2/download",
            &[
                ("downloadFormat", Some(request.format.as_str())),
                ("downloadOptions", (!options.is_empty()).then_some(options.as_str())),
                ("languageKey", request.language.as_deref()),
            ],
        )?;
        let data: FilesData = self.send_for_data(self.client.get(url), "Download listing")?;

        Ok(data
            .files
            .into_iter()
            .map(|file| DownloadableFile {
                url: file.url,
                language: file.language,
                namespace: file.namespace,
            })
            .collect())
    }

    fn fetch_file(&self, file: &DownloadableFile) -> Result<Vec<u8>, AppError> {
        let url = Url::parse(&file.url).or_else(|_| self.base_url.join(&file.url)).map_err(|e| {
            AppError::ParseError { what: format!("file URL '{}'", file.url), details: e.to_string() }
        })?;

        // The token only travels to the API host; listed files may live elsewhere.
        if url.origin() == self.base_url.origin() {
            return self.send_for_bytes(self.client.get(url), "File download");
        }

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::Network(format!("File download request failed: {}", e)))?;
        if !response.status().is_success() {
            return Err(rejection(response));
        }
        response
            .bytes()
            .map(|bytes| bytes.to_vec())
            .map_err(|e| AppError::Network(format!("File download body could not be read: {}", e)))
    }

    fn fetch_gate_status(&self) -> Result<GateStatus, AppError> {
        let url = self.endpoint("/cli/v1/analysis", &[("profile", Some(self.profile.as_str()))])?;
        let data: GateData = self.send_for_data(self.client.get(url), "Gate status")?;

        Ok(GateStatus { gate_result: data.gate_result, message: data.message, status: data.status })
    }
}
