//! Configuration file loading.

use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};

use super::settings::{Configuration, ConfigurationFile};
use crate::domain::AppError;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "simplelocalize.yml";

/// Load the configuration at `path`, or defaults when the file does not exist.
pub fn load_or_default(path: Option<&Path>) -> Result<Configuration, AppError> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
    info!("Loading configuration from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            warn!("Could not find configuration file in: {}", path.display());
            return Ok(Configuration::default());
        }
        Err(err) => {
            return Err(AppError::config_error(format!(
                "Could not read configuration file in {}: {}",
                path.display(),
                err
            )));
        }
    };

    parse_config_content(&content).map_err(|err| match err {
        AppError::ParseError { details, .. } => AppError::config_error(format!(
            "Could not read configuration file in {}: {}",
            path.display(),
            details
        )),
        other => other,
    })
}

/// Parse configuration from YAML content.
pub fn parse_config_content(content: &str) -> Result<Configuration, AppError> {
    if content.trim().is_empty() {
        return Ok(Configuration::default());
    }

    let file: ConfigurationFile = serde_yaml::from_str(content).map_err(|e| {
        AppError::ParseError { what: "configuration".into(), details: e.to_string() }
    })?;
    Ok(file.into())
}
