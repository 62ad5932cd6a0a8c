use super::config::StorageConfig;
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("Remote rejected {path}: HTTP {status}")]
    Rejected { path: String, status: u16 },
}

/// The seam to the object-storage backend. One call per file; the pipeline
/// never issues two puts concurrently.
#[async_trait]
pub trait ObjectStore {
    async fn put(&self, remote_path: &str, local_path: &Path) -> Result<(), StoreError>;
}

/// HTTP-backed store: one PUT per object against the configured endpoint.
pub struct HttpObjectStore {
    client: reqwest::Client,
    endpoint: String,
    access_key_id: String,
    access_key_secret: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.access_base_url(),
            access_key_id: config.access_key_id.clone(),
            access_key_secret: config.access_key_secret.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn put(&self, remote_path: &str, local_path: &Path) -> Result<(), StoreError> {
        let body = fs::read(local_path).await?;
        let url = format!("{}/{}", self.endpoint, remote_path);

        let response = self
            .client
            .put(&url)
            .basic_auth(&self.access_key_id, Some(&self.access_key_secret))
            .body(body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(StoreError::Rejected {
                path: remote_path.to_string(),
                status: response.status().as_u16(),
            })
        }
    }
}
