use super::update::{scaffold_minimal_project, update_project, UpdateError, UpdateOptions};
use crate::config::{config_to_string, detect_schema_path, PacksmithConfig};
use crate::utils::get_config_path;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Error, Debug)]
pub enum CreateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Update error: {0}")]
    UpdateError(#[from] UpdateError),

    #[error("Project name is required")]
    NameRequired,

    #[error("Directory {0} already contains a package.json")]
    AlreadyExists(String),
}

/// Options for creating a project
#[derive(Debug, Clone)]
pub struct CreateOptions {
    pub directory: PathBuf,
    pub examples: bool,
    pub vitest: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            examples: true,
            vitest: true,
        }
    }
}

/// Scaffold a new house-style package at `<directory>/<name>` and run the
/// full update flow over it.
pub async fn create_project(name: &str, options: &CreateOptions) -> Result<PathBuf, CreateError> {
    if name.trim().is_empty() {
        return Err(CreateError::NameRequired);
    }

    let project_dir = options.directory.join(name);
    if project_dir.join("package.json").exists() {
        return Err(CreateError::AlreadyExists(project_dir.display().to_string()));
    }

    let scoped_name = scoped_package_name(name);
    scaffold_minimal_project(&project_dir, Some(&scoped_name)).await?;

    // Seed the project config so the toggles survive into the update flow
    let mut config =
        PacksmithConfig::with_identity(&scoped_name, &detect_schema_path(&project_dir));
    config.vitest.enabled = options.vitest;
    config.templates.examples = options.examples;
    fs::write(get_config_path(&project_dir), config_to_string(&config)?).await?;
    info!("created: packsmith.json");

    if options.examples {
        scaffold_examples_dir(&project_dir).await?;
    }

    update_project(&UpdateOptions::for_directory(&project_dir)).await?;

    Ok(project_dir)
}

/// House scope applied to bare package names.
fn scoped_package_name(name: &str) -> String {
    if name.starts_with('@') {
        name.to_string()
    } else {
        format!("@packsmith/{name}")
    }
}

async fn scaffold_examples_dir(project_dir: &Path) -> Result<(), CreateError> {
    let examples_dir = project_dir.join("examples");
    fs::create_dir_all(&examples_dir).await?;
    fs::write(
        examples_dir.join("index.html"),
        "<!doctype html>\n<html>\n<body>\n<script type=\"module\" src=\"../src/index.ts\"></script>\n</body>\n</html>\n",
    )
    .await?;
    info!("created: examples/index.html");
    Ok(())
}
