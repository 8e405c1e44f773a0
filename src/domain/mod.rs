pub mod configuration;
pub mod error;
pub mod extraction;
pub mod mode;
pub mod template_key;
pub mod transfer;

pub use configuration::{
    Configuration, ConfigurationOverrides, DEFAULT_BASE_URL, DEFAULT_PROFILE, MULTI_FILE_OPTION,
    MULTI_LANGUAGE_JSON_FORMAT, SPLIT_BY_LANGUAGES_OPTION, SPLIT_BY_NAMESPACES_OPTION,
};
pub use error::AppError;
pub use extraction::{ExtractionResult, KeyExtractor, ProjectType};
pub use mode::{DownloadMode, UploadMode, derived_download_options, select_download_mode, select_upload_mode};
pub use template_key::{LANGUAGE_TEMPLATE_KEY, NAMESPACE_TEMPLATE_KEY, TemplateKey};
pub use transfer::FileToUpload;
