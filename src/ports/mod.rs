mod localization_client;

pub use localization_client::{
    DirectDownload, DownloadRequest, DownloadableFile, GateStatus, KeysReport, LocalizationClient,
    UploadRequest,
};
