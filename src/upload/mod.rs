mod collect;
mod config;
mod pipeline;
mod progress;
mod store;

pub use collect::{collect_tasks, UploadTask};
pub use config::{
    get_storage_config_path, read_storage_config, StorageConfig, StorageConfigError,
};
pub use pipeline::{upload_dir, UploadError, UploadReport};
pub use progress::render_progress;
pub use store::{HttpObjectStore, ObjectStore, StoreError};
