//! simplelocalize: extract, upload and download translations with SimpleLocalize.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    DownloadOutcome, ExtractOutcome, GateStatus, UploadOutcome, download, extract, status, upload,
};
pub use domain::{AppError, Configuration, ConfigurationOverrides};
