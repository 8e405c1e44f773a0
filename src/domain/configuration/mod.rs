pub mod loader;
pub mod settings;

pub use loader::{DEFAULT_CONFIG_FILE, load_or_default, parse_config_content};
pub use settings::{
    Configuration, ConfigurationOverrides, DEFAULT_BASE_URL, DEFAULT_PROFILE, MULTI_FILE_OPTION,
    MULTI_LANGUAGE_JSON_FORMAT, SPLIT_BY_LANGUAGES_OPTION, SPLIT_BY_NAMESPACES_OPTION,
};
