use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::save::save_settings_to_path;
use super::{AppSettings, CONFIG_FILE_NAME, ConfigError, ENDPOINT_ENV, map_app_dir_error};

/// Resolve the settings file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings from disk and apply environment overrides.
///
/// A missing file is created with the defaults so it can be edited later.
/// The resulting endpoint URL is validated before returning.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    let settings = if path.exists() {
        load_settings_from(&path)?
    } else {
        let defaults = AppSettings::default();
        if let Err(err) = save_settings_to_path(&defaults, &path) {
            tracing::warn!("Could not write default config: {err}");
        }
        defaults
    };
    let settings = apply_env_overrides(settings, |key| std::env::var(key).ok());
    settings.endpoint.parsed_url()?;
    Ok(settings)
}

/// Replace settings with values supplied through the environment.
pub fn apply_env_overrides(
    mut settings: AppSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppSettings {
    if let Some(url) = lookup(ENDPOINT_ENV).filter(|url| !url.trim().is_empty()) {
        tracing::info!(endpoint = %url.trim(), "Endpoint overridden from {ENDPOINT_ENV}");
        settings.endpoint.url = url;
    }
    settings.normalized()
}

pub(super) fn load_settings_from(path: &Path) -> Result<AppSettings, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<AppSettings>(&text)
        .map(AppSettings::normalized)
        .map_err(|source| ConfigError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
}
