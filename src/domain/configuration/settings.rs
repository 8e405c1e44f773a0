//! Project configuration model loaded from `simplelocalize.yml`.

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::domain::AppError;

pub const DEFAULT_PROFILE: &str = "default";
pub const DEFAULT_SEARCH_DIR: &str = ".";
pub const DEFAULT_BASE_URL: &str = "https://api.simplelocalize.io";

/// Upload option switching the upload path to a directory walked recursively.
pub const MULTI_FILE_OPTION: &str = "MULTI_FILE";

/// Download option requesting one file per language.
pub const SPLIT_BY_LANGUAGES_OPTION: &str = "SPLIT_BY_LANGUAGES";
/// Download option requesting one file per namespace.
pub const SPLIT_BY_NAMESPACES_OPTION: &str = "SPLIT_BY_NAMESPACES";

/// Format which carries every language in a single payload.
pub const MULTI_LANGUAGE_JSON_FORMAT: &str = "multi-language-json";

/// Raw document as written by users. Field names follow the YAML keys.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ConfigurationFile {
    api_key: Option<String>,
    /// Legacy name for `apiKey`.
    upload_token: Option<String>,
    base_url: Option<String>,
    profile: Option<String>,
    search_dir: Option<String>,
    project_type: Option<String>,
    ignore_keys: Vec<String>,
    ignore_paths: Vec<String>,
    upload_path: Option<String>,
    upload_format: Option<String>,
    #[serde(deserialize_with = "option_list")]
    upload_options: Vec<String>,
    download_path: Option<String>,
    download_format: Option<String>,
    #[serde(deserialize_with = "option_list")]
    download_options: Vec<String>,
    language_key: Option<String>,
    secondary_download_path: Option<String>,
    secondary_download_languages: Vec<String>,
}

/// Normalized configuration shared by every command.
///
/// Built once per invocation; commands only read it.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub api_key: Option<String>,
    pub base_url: String,
    pub profile: String,
    pub search_dir: String,
    pub project_type: Option<String>,
    pub ignore_keys: Vec<String>,
    pub ignore_paths: Vec<String>,
    pub upload_path: Option<String>,
    pub upload_format: Option<String>,
    pub upload_options: Vec<String>,
    pub download_path: Option<String>,
    pub download_format: Option<String>,
    pub download_options: Vec<String>,
    pub language_key: Option<String>,
    pub secondary_download_path: Option<String>,
    pub secondary_download_languages: Vec<String>,
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("profile", &self.profile)
            .field("search_dir", &self.search_dir)
            .field("project_type", &self.project_type)
            .field("upload_path", &self.upload_path)
            .field("upload_format", &self.upload_format)
            .field("upload_options", &self.upload_options)
            .field("download_path", &self.download_path)
            .field("download_format", &self.download_format)
            .field("download_options", &self.download_options)
            .field("language_key", &self.language_key)
            .finish_non_exhaustive()
    }
}

impl Default for Configuration {
    fn default() -> Self {
        ConfigurationFile::default().into()
    }
}

impl From<ConfigurationFile> for Configuration {
    fn from(file: ConfigurationFile) -> Self {
        Self {
            api_key: non_blank(file.api_key).or_else(|| non_blank(file.upload_token)),
            base_url: non_blank(file.base_url).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            profile: non_blank(file.profile).unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            search_dir: non_blank(file.search_dir)
                .unwrap_or_else(|| DEFAULT_SEARCH_DIR.to_string()),
            project_type: non_blank(file.project_type),
            ignore_keys: file.ignore_keys,
            ignore_paths: file.ignore_paths,
            upload_path: non_blank(file.upload_path),
            upload_format: non_blank(file.upload_format),
            upload_options: normalize_options(file.upload_options),
            download_path: non_blank(file.download_path),
            download_format: non_blank(file.download_format),
            download_options: normalize_options(file.download_options),
            language_key: non_blank(file.language_key),
            secondary_download_path: non_blank(file.secondary_download_path),
            secondary_download_languages: file.secondary_download_languages,
        }
    }
}

/// Values passed on the command line. Each present value replaces the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub profile: Option<String>,
    pub search_dir: Option<String>,
    pub project_type: Option<String>,
    pub upload_path: Option<String>,
    pub upload_format: Option<String>,
    pub upload_options: Option<String>,
    pub download_path: Option<String>,
    pub download_format: Option<String>,
    pub download_options: Option<String>,
    pub language_key: Option<String>,
}

impl Configuration {
    /// Apply command-line overrides on top of the loaded file.
    pub fn with_overrides(mut self, overrides: ConfigurationOverrides) -> Self {
        fn replace(target: &mut Option<String>, value: Option<String>) {
            if let Some(value) = non_blank(value) {
                *target = Some(value);
            }
        }

        replace(&mut self.api_key, overrides.api_key);
        replace(&mut self.project_type, overrides.project_type);
        replace(&mut self.upload_path, overrides.upload_path);
        replace(&mut self.upload_format, overrides.upload_format);
        replace(&mut self.download_path, overrides.download_path);
        replace(&mut self.download_format, overrides.download_format);
        replace(&mut self.language_key, overrides.language_key);
        if let Some(base_url) = non_blank(overrides.base_url) {
            self.base_url = base_url;
        }
        if let Some(profile) = non_blank(overrides.profile) {
            self.profile = profile;
        }
        if let Some(search_dir) = non_blank(overrides.search_dir) {
            self.search_dir = search_dir;
        }
        if let Some(options) = overrides.upload_options {
            self.upload_options = split_options(&options);
        }
        if let Some(options) = overrides.download_options {
            self.download_options = split_options(&options);
        }
        self
    }

    /// API key required by every network operation.
    pub fn require_api_key(&self) -> Result<&str, AppError> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::config_error(
                "Missing API key. Set 'apiKey' in the configuration file or pass --apiKey.",
            )
        })
    }

    /// Parsed server root.
    pub fn server_url(&self) -> Result<Url, AppError> {
        Url::parse(&self.base_url).map_err(|e| {
            AppError::config_error(format!("Invalid baseUrl '{}': {}", self.base_url, e))
        })
    }

    pub fn is_multi_file_upload(&self) -> bool {
        self.upload_options.iter().any(|option| option.to_uppercase().contains(MULTI_FILE_OPTION))
    }

    /// Upload options in the comma-separated form the upload endpoint expects.
    pub fn upload_options_query(&self) -> Option<String> {
        (!self.upload_options.is_empty()).then(|| self.upload_options.join(","))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn normalize_options(options: Vec<String>) -> Vec<String> {
    options.iter().flat_map(|option| split_options(option)).collect()
}

fn split_options(joined: &str) -> Vec<String> {
    joined.split(',').map(str::trim).filter(|o| !o.is_empty()).map(str::to_string).collect()
}

/// Accepts either `OPTION_A,OPTION_B` or a YAML sequence.
fn option_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OptionList {
        Joined(String),
        Items(Vec<String>),
    }

    Ok(match Option::<OptionList>::deserialize(deserializer)? {
        Some(OptionList::Joined(joined)) => split_options(&joined),
        Some(OptionList::Items(items)) => items,
        None => Vec::new(),
    })
}
