use std::{
    path::PathBuf,
    sync::{Mutex, OnceLock},
};

const CONFIG_HOME_ENV: &str = "DETAILFORM_CONFIG_HOME";
const ENDPOINT_ENV: &str = "DETAILFORM_ENDPOINT";

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

/// Points the app at a scratch config home and clears the endpoint override
/// for the guard's lifetime.
pub struct DetailformEnvGuard {
    previous: Vec<(&'static str, Option<String>)>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

impl DetailformEnvGuard {
    pub fn set_config_home(path: PathBuf) -> Self {
        let lock = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|err| err.into_inner());
        let previous = [CONFIG_HOME_ENV, ENDPOINT_ENV]
            .into_iter()
            .map(|key| (key, std::env::var(key).ok()))
            .collect();
        // SAFETY: tests run under a global lock to prevent concurrent env mutations.
        unsafe {
            std::env::set_var(CONFIG_HOME_ENV, path);
            std::env::remove_var(ENDPOINT_ENV);
        }
        Self {
            previous,
            _lock: lock,
        }
    }

    pub fn set_endpoint(&self, url: &str) {
        // SAFETY: the guard holds the global env lock.
        unsafe {
            std::env::set_var(ENDPOINT_ENV, url);
        }
    }
}

impl Drop for DetailformEnvGuard {
    fn drop(&mut self) {
        for (key, value) in self.previous.drain(..) {
            // SAFETY: tests run under a global lock to prevent concurrent env mutations.
            unsafe {
                match value {
                    Some(value) => std::env::set_var(key, value),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
