use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum StorageConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,

    #[error("Failed to read storage config at {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse storage config at {path}: {source}")]
    ParseError {
        path: String,
        source: serde_json::Error,
    },
}

/// Object-storage credentials, kept outside any project in the user's home
/// directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub region: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    pub bucket: String,
    /// Custom access domain, e.g. `https://cdn.example.com`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl StorageConfig {
    /// Public base URL for uploaded objects.
    pub fn access_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            format!("https://{}.{}.aliyuncs.com", self.bucket, self.region)
        })
    }
}

/// Fixed per-user location of the storage config (`~/.packsmith/storage.json`)
pub fn get_storage_config_path() -> Result<PathBuf, StorageConfigError> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| StorageConfigError::HomeDirNotFound)?;

    Ok(PathBuf::from(home).join(".packsmith").join("storage.json"))
}

/// Read the storage config. Any failure here is fatal for an upload run.
pub async fn read_storage_config() -> Result<StorageConfig, StorageConfigError> {
    let path = get_storage_config_path()?;
    let display = path.display().to_string();

    let content = fs::read_to_string(&path)
        .await
        .map_err(|source| StorageConfigError::ReadError {
            path: display.clone(),
            source,
        })?;

    serde_json::from_str(&content).map_err(|source| StorageConfigError::ParseError {
        path: display,
        source,
    })
}
