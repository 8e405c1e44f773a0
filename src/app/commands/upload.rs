//! Upload command: resolve the configured path into files and post each one.

use std::path::PathBuf;

use log::info;

use crate::adapters::file_resolver;
use crate::domain::{AppError, Configuration, select_upload_mode};
use crate::ports::{LocalizationClient, UploadRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadOutcome {
    pub uploaded: Vec<PathBuf>,
}

/// Run the upload. The first failed file aborts the run.
pub fn execute<C>(config: &Configuration, client: &C) -> Result<UploadOutcome, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let format = config
        .upload_format
        .clone()
        .ok_or_else(|| AppError::config_error("Missing 'uploadFormat' in configuration"))?;
    let mode = select_upload_mode(config)?;
    let files = file_resolver::files_to_upload(&mode)?;

    if files.is_empty() {
        info!(
            "No files found matching '{}', nothing to upload",
            config.upload_path.as_deref().unwrap_or_default()
        );
        return Ok(UploadOutcome::default());
    }

    let options = config.upload_options_query();
    let mut outcome = UploadOutcome::default();
    for file in files {
        match (&file.language, &file.relative_path) {
            (_, Some(relative_path)) => {
                info!("Uploading {} as '{}'", file.path.display(), relative_path)
            }
            (Some(language), None) => {
                info!("Uploading {} with language key '{}'", file.path.display(), language)
            }
            (None, None) => info!("Uploading {}", file.path.display()),
        }

        client.upload_file(&UploadRequest {
            path: file.path.clone(),
            format: format.clone(),
            options: options.clone(),
            language: file.language,
            relative_path: file.relative_path,
        })?;
        outcome.uploaded.push(file.path);
    }

    Ok(outcome)
}
