//! Download command: fetch translations and write them to the configured paths.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use log::{error, info};

use crate::adapters::translation_writer::{write_downloaded, write_file};
use crate::domain::template_key::render;
use crate::domain::{
    AppError, Configuration, DownloadMode, MULTI_LANGUAGE_JSON_FORMAT, derived_download_options,
    select_download_mode,
};
use crate::ports::{DirectDownload, DownloadRequest, DownloadableFile, LocalizationClient};

/// Upper bound on concurrent file fetches in a templated download.
pub const DOWNLOAD_WORKERS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOutcome {
    pub written: Vec<PathBuf>,
}

/// Optional mirror of every download into a second location.
struct SecondaryTarget<'a> {
    path: &'a str,
    languages: &'a [String],
}

impl<'a> SecondaryTarget<'a> {
    fn from_config(config: &'a Configuration) -> Option<Self> {
        config
            .secondary_download_path
            .as_deref()
            .filter(|path| !path.trim().is_empty())
            .map(|path| SecondaryTarget { path, languages: &config.secondary_download_languages })
    }

    fn accepts(&self, language: Option<&str>) -> bool {
        self.languages.is_empty()
            || language.is_some_and(|lang| self.languages.iter().any(|l| l == lang))
    }
}

pub fn execute<C>(config: &Configuration, client: &C) -> Result<DownloadOutcome, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let path = config
        .download_path
        .as_deref()
        .ok_or_else(|| AppError::config_error("Missing 'downloadPath' in configuration"))?;
    let format = config
        .download_format
        .clone()
        .ok_or_else(|| AppError::config_error("Missing 'downloadFormat' in configuration"))?;
    let secondary = SecondaryTarget::from_config(config);

    let written = match select_download_mode(path) {
        DownloadMode::Direct { path } => {
            download_direct(client, config, format, &path, secondary.as_ref())?
        }
        DownloadMode::Templated { template } => {
            let request = DownloadRequest {
                format,
                options: derived_download_options(config, &template),
                language: config.language_key.clone(),
            };
            info!("Preparing files for download into '{}'", template);
            let files = client.fetch_downloadable_files(&request)?;
            if files.is_empty() {
                info!("No files to download");
                return Ok(DownloadOutcome::default());
            }
            download_all(client, &files, &template, secondary.as_ref())?
        }
    };

    Ok(DownloadOutcome { written })
}

fn download_direct<C>(
    client: &C,
    config: &Configuration,
    format: String,
    path: &str,
    secondary: Option<&SecondaryTarget<'_>>,
) -> Result<Vec<PathBuf>, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let language = config.language_key.clone();
    if format.eq_ignore_ascii_case(MULTI_LANGUAGE_JSON_FORMAT) {
        info!("Downloading all languages to '{}'", path);
    } else {
        info!("Downloading translations to '{}'", path);
    }
    let body = client.download_file(&DirectDownload { format, language: language.clone() })?;

    write_file(Path::new(path), &body)?;
    let mut written = vec![PathBuf::from(path)];

    if let Some(secondary) = secondary.filter(|s| s.accepts(language.as_deref())) {
        let target = PathBuf::from(render(secondary.path, language.as_deref(), None));
        write_file(&target, &body)?;
        written.push(target);
    }
    Ok(written)
}

/// Fetch every listed file over a bounded pool of scoped workers.
///
/// Workers keep draining the queue after a failure; the first error is
/// returned once all of them have joined.
fn download_all<C>(
    client: &C,
    files: &[DownloadableFile],
    template: &str,
    secondary: Option<&SecondaryTarget<'_>>,
) -> Result<Vec<PathBuf>, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let next = AtomicUsize::new(0);
    let workers = DOWNLOAD_WORKERS.min(files.len()).max(1);

    let results: Vec<Result<Vec<PathBuf>, AppError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                scope.spawn(|| {
                    let mut results = Vec::new();
                    while let Some(file) = files.get(next.fetch_add(1, Ordering::Relaxed)) {
                        results.push(download_one(client, file, template, secondary));
                    }
                    results
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| {
                handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload))
            })
            .collect()
    });

    let mut written = Vec::new();
    let mut first_error = None;
    for result in results {
        match result {
            Ok(paths) => written.extend(paths),
            Err(err) => {
                error!("Download failed: {}", err);
                first_error.get_or_insert(err);
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => {
            written.sort();
            Ok(written)
        }
    }
}

fn download_one<C>(
    client: &C,
    file: &DownloadableFile,
    template: &str,
    secondary: Option<&SecondaryTarget<'_>>,
) -> Result<Vec<PathBuf>, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let body = client.fetch_file(file)?;
    let mut written = write_downloaded(template, file, &body)?;
    if let Some(secondary) = secondary.filter(|s| s.accepts(file.language.as_deref())) {
        written.extend(write_downloaded(secondary.path, file, &body)?);
    }
    Ok(written)
}
