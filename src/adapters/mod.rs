pub mod archive;
pub mod file_resolver;
pub mod http_client;
pub mod source_scanner;
pub mod translation_writer;

pub use http_client::HttpLocalizationClient;
