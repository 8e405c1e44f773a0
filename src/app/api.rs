//! API Facade for the application.
//!
//! Each function validates the configuration, builds the HTTP client and runs
//! one command.

use crate::adapters::HttpLocalizationClient;
use crate::app::AppContext;
use crate::app::commands::{download, extract, status, upload};
use crate::domain::{AppError, Configuration};

pub use crate::app::commands::download::DownloadOutcome;
pub use crate::app::commands::extract::ExtractOutcome;
pub use crate::app::commands::upload::UploadOutcome;
pub use crate::ports::GateStatus;

fn create_context(configuration: Configuration) -> Result<AppContext<HttpLocalizationClient>, AppError> {
    let client = HttpLocalizationClient::from_configuration(&configuration)?;
    Ok(AppContext::new(configuration, client))
}

/// Scan sources for translation keys and send them to SimpleLocalize.
pub fn extract(configuration: Configuration) -> Result<ExtractOutcome, AppError> {
    let ctx = create_context(configuration)?;
    extract::execute(ctx.configuration(), ctx.client())
}

/// Upload local translation files.
pub fn upload(configuration: Configuration) -> Result<UploadOutcome, AppError> {
    let ctx = create_context(configuration)?;
    upload::execute(ctx.configuration(), ctx.client())
}

/// Download translations into the configured paths.
pub fn download(configuration: Configuration) -> Result<DownloadOutcome, AppError> {
    let ctx = create_context(configuration)?;
    download::execute(ctx.configuration(), ctx.client())
}

/// Query the quality gate for the configured profile.
pub fn status(configuration: Configuration) -> Result<GateStatus, AppError> {
    let ctx = create_context(configuration)?;
    status::execute(ctx.client())
}
