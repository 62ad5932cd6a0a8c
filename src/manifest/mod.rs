mod order;
mod patch;
mod types;

pub use order::{reorder_manifest, FIELD_ORDER, SCRIPT_ORDER};
pub use patch::{
    inject_scripts, normalize_entry_points, set_lint_staged, standard_scripts,
    sync_dependencies, SyncMode,
};
pub use types::{FormatStyle, PackageManifest};

use crate::utils::get_package_path;
use std::path::Path;
use thiserror::Error;
use tokio::fs;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse package.json: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("No package.json found in {0}")]
    NotFound(String),
}

/// Read the package descriptor from the project path.
pub async fn read_manifest(project_path: &Path) -> Result<Option<PackageManifest>, ManifestError> {
    let package_path = get_package_path(project_path);

    if !package_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&package_path).await?;
    let manifest = PackageManifest::parse(&content)?;
    Ok(Some(manifest))
}

/// Read the package descriptor, failing when it is missing. Patch
/// operations have no safe default for name/version, so absence is a hard
/// error at this level.
pub async fn require_manifest(project_path: &Path) -> Result<PackageManifest, ManifestError> {
    read_manifest(project_path)
        .await?
        .ok_or_else(|| ManifestError::NotFound(project_path.display().to_string()))
}

/// Write the manifest back only when some field changed value. Returns
/// whether a write happened.
pub async fn write_manifest_if_changed(
    project_path: &Path,
    manifest: &PackageManifest,
) -> Result<bool, ManifestError> {
    if !manifest.is_dirty() {
        return Ok(false);
    }

    let package_path = get_package_path(project_path);
    fs::write(&package_path, manifest.to_content()).await?;
    Ok(true)
}
