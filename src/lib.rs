pub mod config;
pub mod manifest;
pub mod project;
pub mod reconcile;
pub mod templates;
pub mod upload;
pub mod utils;

// Re-export commonly used types
pub use config::{OverwritePolicy, PacksmithConfig};
pub use manifest::{PackageManifest, SyncMode};
pub use project::{
    create_project, update_project, CreateOptions, UpdateOptions, UpdateSummary,
};
pub use reconcile::{
    managed_artifacts, reconcile, ArtifactContext, ManagedArtifact, ReconcileReport,
};
pub use templates::RenderContext;
pub use upload::{upload_dir, HttpObjectStore, ObjectStore, UploadReport};
