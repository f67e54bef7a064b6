use std::io::Write;
use std::path::Path;

use super::{AppSettings, ConfigError};

/// Save settings to a specific path, creating parent directories as needed.
pub fn save_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    save_settings_to_path(settings, path)
}

/// Write the TOML settings file atomically to prevent partial writes on crash.
pub(super) fn save_settings_to_path(settings: &AppSettings, path: &Path) -> Result<(), ConfigError> {
    let data = toml::to_string_pretty(settings).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    atomic_write(path, data.as_bytes())
}

fn write_error(path: &Path, message: impl Into<String>) -> ConfigError {
    ConfigError::Write {
        path: path.to_path_buf(),
        source: std::io::Error::other(message.into()),
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> Result<(), ConfigError> {
    use rand::TryRngCore;
    let dir = path
        .parent()
        .ok_or_else(|| write_error(path, "config path has no parent directory"))?;
    let file_name = path
        .file_name()
        .ok_or_else(|| write_error(path, "config path has no file name"))?;

    let mut last_err = None;
    for _ in 0..5 {
        let mut bytes = [0u8; 6];
        rand::rngs::OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|source| {
                write_error(path, format!("failed to generate temporary file suffix: {source}"))
            })?;
        let suffix: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        let tmp_path = dir.join(format!("{}.tmp-{suffix}", file_name.to_string_lossy()));

        let mut file = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&tmp_path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                last_err = Some(err);
                continue;
            }
            Err(source) => {
                return Err(ConfigError::Write {
                    path: tmp_path,
                    source,
                });
            }
        };

        if let Err(source) = file.write_all(data).and_then(|()| file.sync_all()) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ConfigError::Write {
                path: tmp_path,
                source,
            });
        }
        drop(file);
        if let Err(source) = replace_file(&tmp_path, path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(ConfigError::Write {
                path: path.to_path_buf(),
                source,
            });
        }
        return Ok(());
    }

    Err(write_error(
        path,
        format!(
            "failed to create temporary file: {}",
            last_err
                .map(|err| err.to_string())
                .unwrap_or_else(|| "unknown error".into())
        ),
    ))
}

fn replace_file(temp_path: &Path, path: &Path) -> Result<(), std::io::Error> {
    match std::fs::rename(temp_path, path) {
        Ok(()) => Ok(()),
        Err(err) => {
            #[cfg(target_os = "windows")]
            if err.kind() == std::io::ErrorKind::AlreadyExists
                || err.kind() == std::io::ErrorKind::PermissionDenied
            {
                if let Err(inner) = std::fs::remove_file(path) {
                    if inner.kind() != std::io::ErrorKind::NotFound {
                        return Err(inner);
                    }
                }
                return std::fs::rename(temp_path, path);
            }
            Err(err)
        }
    }
}
