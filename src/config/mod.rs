//! Settings for the collaborator endpoint, stored as TOML in the app directory.

use crate::app_dirs;

mod errors;
mod load;
mod save;
mod types;


/// Default filename used to store the app settings.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable that replaces `endpoint.url`.
pub const ENDPOINT_ENV: &str = "DETAILFORM_ENDPOINT";

pub use errors::ConfigError;
pub use load::{apply_env_overrides, config_path, load_or_default};
pub use save::save_to_path;
pub use types::{AppSettings, DEFAULT_ENDPOINT_URL, EndpointSettings};

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => {
            ConfigError::CreateDir { path, source }
        }
    }
}
