use std::{collections::BTreeMap, path::PathBuf};
use tokio::fs;
use tracing::{error, warn};

pub const USER_ID_KEY: &str = "user_id";

/// String key/value store standing in for the browser's local storage.
///
/// When a path is configured every write is flushed to it as JSON.
#[derive(Debug, Default)]
pub struct LocalStorage {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStorage {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub async fn open(path: PathBuf) -> Self {
        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    error!("failed to parse local storage file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!("failed to read local storage file: {err}");
                BTreeMap::new()
            }
        };

        Self {
            path: Some(path),
            entries,
        }
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub async fn set_item(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
        self.flush().await;
    }

    pub async fn remove_item(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush().await;
        }
    }

    /// Session id saved at login, if it still parses as a user id.
    pub fn user_id(&self) -> Option<i64> {
        let raw = self.get_item(USER_ID_KEY)?;
        match raw.trim().parse() {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("ignoring malformed stored user id {raw:?}");
                None
            }
        }
    }

    async fn flush(&self) {
        let Some(path) = &self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = fs::create_dir_all(parent).await {
                error!("failed to create local storage directory: {err}");
                return;
            }
        }

        match serde_json::to_vec_pretty(&self.entries) {
            Ok(payload) => {
                if let Err(err) = fs::write(path, payload).await {
                    error!("failed to write local storage file: {err}");
                }
            }
            Err(err) => error!("failed to encode local storage: {err}"),
        }
    }
}
