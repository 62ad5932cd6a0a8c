use crate::config::{
    detect_schema_path, load_or_create_config, ConfigError, PacksmithConfig,
};
use crate::manifest::{
    inject_scripts, normalize_entry_points, require_manifest, set_lint_staged,
    standard_scripts, sync_dependencies, write_manifest_if_changed, ManifestError,
    PackageManifest, SyncMode,
};
use crate::reconcile::{
    managed_artifacts, reconcile, ArtifactContext, ArtifactGroup, ReconcileError,
    ReconcileReport,
};
use crate::templates::{
    src_index_template, standard_dev_dependencies, DevDependencyOptions, RenderContext,
    TemplateError,
};
use crate::utils::get_package_path;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::info;

#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    ManifestError(#[from] ManifestError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Reconcile error: {0}")]
    ReconcileError(#[from] ReconcileError),

    #[error("Template error: {0}")]
    TemplateError(#[from] TemplateError),
}

/// Which artifact groups an `update` invocation touches. No flag set means
/// everything (subject to the `update` section of `packsmith.json`).
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    pub directory: PathBuf,
    pub eslint: bool,
    pub gitignore: bool,
    pub cursorrules: bool,
    pub publish: bool,
    pub pages: bool,
    pub pull_request: bool,
    pub typedoc: bool,
    pub test: bool,
    pub deps: bool,
    pub husky: bool,
    pub license: bool,
    pub vscode: bool,
    pub tsconfig: bool,
    pub all: bool,
}

impl UpdateOptions {
    pub fn for_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    fn none_selected(&self) -> bool {
        !(self.eslint
            || self.gitignore
            || self.cursorrules
            || self.publish
            || self.pages
            || self.pull_request
            || self.typedoc
            || self.test
            || self.deps
            || self.husky
            || self.license
            || self.vscode
            || self.tsconfig)
    }

    /// Whether a group is selected, intersected with the config toggles.
    fn group_selected(&self, group: ArtifactGroup, config: &PacksmithConfig) -> bool {
        let everything = self.all || self.none_selected();
        let (flag, toggle) = match group {
            ArtifactGroup::Config => (false, config.update.config),
            ArtifactGroup::Gitignore => (self.gitignore, config.update.gitignore),
            ArtifactGroup::Cursorrules => (self.cursorrules, config.update.cursorrules),
            ArtifactGroup::Eslint => (self.eslint, config.update.eslint),
            ArtifactGroup::Typedoc => (self.typedoc, config.update.typedoc),
            ArtifactGroup::Test => (self.test, config.update.test),
            ArtifactGroup::Husky => (self.husky, config.update.husky),
            ArtifactGroup::License => (self.license, config.update.license),
            ArtifactGroup::Vscode => (self.vscode, config.update.vscode),
            ArtifactGroup::Tsconfig => (self.tsconfig, config.update.tsconfig),
            ArtifactGroup::Publish => (self.publish, config.update.publish),
            ArtifactGroup::Pages => (self.pages, config.update.pages),
            ArtifactGroup::PullRequest => (self.pull_request, config.update.pull_request),
        };
        (everything || flag) && toggle
    }

    fn deps_selected(&self, config: &PacksmithConfig) -> bool {
        (self.all || self.none_selected() || self.deps) && config.update.deps
    }

    fn husky_selected(&self, config: &PacksmithConfig) -> bool {
        (self.all || self.none_selected() || self.husky) && config.update.husky
    }
}

/// Outcome of an update run.
#[derive(Debug, Clone, Default)]
pub struct UpdateSummary {
    pub report: ReconcileReport,
    pub manifest_written: bool,
}

/// Bring a project's managed artifacts and package descriptor up to the
/// house standard.
pub async fn update_project(options: &UpdateOptions) -> Result<UpdateSummary, UpdateError> {
    let project_dir = options.directory.as_path();

    // A directory without a package.json becomes a fresh minimal project
    if !get_package_path(project_dir).exists() {
        scaffold_minimal_project(project_dir, None).await?;
    }

    let mut manifest = require_manifest(project_dir).await?;
    let package_name = manifest
        .name()
        .map(str::to_string)
        .unwrap_or_else(|| directory_name(project_dir));

    let config = load_or_create_config(project_dir, &package_name).await?;

    // The artifact pass honors the selected groups; the ignore sweep
    // always covers the whole registry
    let registry = managed_artifacts(&config);
    let selected: Vec<_> = registry
        .iter()
        .filter(|artifact| options.group_selected(artifact.group, &config))
        .cloned()
        .collect();

    let ctx = ArtifactContext {
        render: RenderContext::new(&package_name),
        schema_path: detect_schema_path(project_dir),
    };

    let report = reconcile(project_dir, &selected, &registry, &ctx).await?;

    // Patch the package descriptor
    patch_manifest(&mut manifest, &config, options);

    let manifest_written = write_manifest_if_changed(project_dir, &manifest).await?;
    if manifest_written {
        info!("updated: package.json");
    }

    Ok(UpdateSummary {
        report,
        manifest_written,
    })
}

fn patch_manifest(
    manifest: &mut PackageManifest,
    config: &PacksmithConfig,
    options: &UpdateOptions,
) {
    if options.all || options.none_selected() {
        let scripts = standard_scripts(
            config.vitest.enabled,
            config.typedoc.enabled,
            config.eslint.enabled,
        );
        inject_scripts(manifest, &scripts, false);
        normalize_entry_points(manifest, false);
    }

    if options.husky_selected(config) {
        set_lint_staged(manifest);
    }

    if options.deps_selected(config) {
        let versions = standard_dev_dependencies(DevDependencyOptions {
            include_vitest: config.vitest.enabled,
            include_typedoc: config.typedoc.enabled,
        });
        sync_dependencies(manifest, &versions, SyncMode::Additive);
    }
}

fn directory_name(project_dir: &Path) -> String {
    project_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string())
}

/// Synthesize a minimal package: descriptor plus `src/index.ts`.
pub(crate) async fn scaffold_minimal_project(
    project_dir: &Path,
    scoped_name: Option<&str>,
) -> Result<(), UpdateError> {
    fs::create_dir_all(project_dir).await?;

    let name = match scoped_name {
        Some(name) => name.to_string(),
        None => format!("@packsmith/{}", directory_name(project_dir)),
    };

    let manifest = PackageManifest::new_minimal(&name);
    fs::write(get_package_path(project_dir), manifest.to_content()).await?;
    info!("created: package.json");

    let src_dir = project_dir.join("src");
    fs::create_dir_all(&src_dir).await?;
    let index = src_index_template(&RenderContext::new(&name))?;
    fs::write(src_dir.join("index.ts"), index).await?;
    info!("created: src/index.ts");

    Ok(())
}
