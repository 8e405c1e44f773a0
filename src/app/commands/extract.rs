//! Extract command: scan sources for keys and send them in batches.

use std::path::Path;

use log::{error, info, warn};

use crate::adapters::source_scanner;
use crate::domain::{AppError, Configuration, KeyExtractor, ProjectType};
use crate::ports::LocalizationClient;

/// Keys sent per request.
pub const BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractOutcome {
    pub keys_found: usize,
    pub files_processed: usize,
    pub batches_sent: usize,
    pub batches_failed: usize,
}

/// Run the extraction. A rejected batch is logged and the remaining batches still go out.
pub fn execute<C>(config: &Configuration, client: &C) -> Result<ExtractOutcome, AppError>
where
    C: LocalizationClient + ?Sized,
{
    let project_type = config
        .project_type
        .as_deref()
        .ok_or_else(|| AppError::config_error("Missing 'projectType' in configuration"))?;
    let extractor = KeyExtractor::new(ProjectType::parse(project_type)?)?;

    info!("Running keys extraction for {}", extractor.project_type().as_str());
    let mut result =
        source_scanner::scan(Path::new(&config.search_dir), &extractor, &config.ignore_paths)?;
    info!(
        "Found {} unique keys in {} components",
        result.keys.len(),
        result.processed_files.len()
    );

    result.remove_ignored(&config.ignore_keys);
    let keys: Vec<String> = result.keys.into_iter().collect();

    let mut outcome = ExtractOutcome {
        keys_found: keys.len(),
        files_processed: result.processed_files.len(),
        ..Default::default()
    };

    for batch in keys.chunks(BATCH_SIZE) {
        match client.send_keys(batch) {
            Ok(report) => {
                if report.processed_with_warnings {
                    warn!("SimpleLocalize processed your request with warnings, but it was successful");
                }
                info!("Successfully uploaded {} keys", report.unique_keys_processed);
                outcome.batches_sent += 1;
            }
            Err(err) => {
                error!("Could not send keys chunk: {}", err);
                outcome.batches_failed += 1;
            }
        }
    }

    Ok(outcome)
}
