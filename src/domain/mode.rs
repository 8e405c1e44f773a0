//! Transfer mode selection for the upload and download commands.

use crate::domain::template_key::{TemplateKey, has_template_key};
use crate::domain::{
    AppError, Configuration, SPLIT_BY_LANGUAGES_OPTION, SPLIT_BY_NAMESPACES_OPTION,
};

/// How the configured upload path is turned into files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadMode {
    /// The path names one file; the language comes from `languageKey`, if any.
    Single { path: String, language: Option<String> },
    /// The file name holds `{lang}`; siblings matching it are uploaded.
    Templated { path: String },
    /// The path is a directory uploaded recursively, keyed by relative path.
    MultiFile { root: String },
}

/// How downloaded content is mapped onto local paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadMode {
    /// Write the response body to the configured path.
    Direct { path: String },
    /// Fetch one file per language/namespace and render each into the template.
    Templated { template: String },
}

/// Pick the upload mode.
///
/// `MULTI_FILE` wins over placeholder detection, which wins over the
/// single-file default. An explicit language key together with `{lang}` in the
/// path is rejected.
pub fn select_upload_mode(config: &Configuration) -> Result<UploadMode, AppError> {
    let path = config
        .upload_path
        .clone()
        .ok_or_else(|| AppError::config_error("Missing 'uploadPath' in configuration"))?;
    let has_language_key_in_path = TemplateKey::Language.is_in(&path);

    if has_language_key_in_path && config.language_key.is_some() {
        return Err(AppError::config_error(format!(
            "You cannot use '{}' in upload path and 'languageKey' option together",
            TemplateKey::Language.token()
        )));
    }

    if config.is_multi_file_upload() {
        return Ok(UploadMode::MultiFile { root: path });
    }

    if has_language_key_in_path {
        return Ok(UploadMode::Templated { path });
    }

    Ok(UploadMode::Single { path, language: config.language_key.clone() })
}

/// Pick the download mode for a target path.
pub fn select_download_mode(path: &str) -> DownloadMode {
    if has_template_key(path) {
        DownloadMode::Templated { template: path.to_string() }
    } else {
        DownloadMode::Direct { path: path.to_string() }
    }
}

/// Configured download options plus the split flags implied by the path.
pub fn derived_download_options(config: &Configuration, path: &str) -> Vec<String> {
    let mut options = config.download_options.clone();
    let implied = [
        (TemplateKey::Namespace, SPLIT_BY_NAMESPACES_OPTION),
        (TemplateKey::Language, SPLIT_BY_LANGUAGES_OPTION),
    ];
    for (key, option) in implied {
        if key.is_in(path) && !options.iter().any(|o| o.eq_ignore_ascii_case(option)) {
            options.push(option.to_string());
        }
    }
    options
}
