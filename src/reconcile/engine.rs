use super::ignore::IgnoreList;
use super::managed::{ArtifactContext, Comparison, ManagedArtifact};
use crate::config::OverwritePolicy;
use crate::utils::get_ignore_path;
use serde_json::Value;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template error: {0}")]
    TemplateError(#[from] crate::templates::TemplateError),
}

/// What happened to one artifact during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactOutcome {
    /// Did not exist, written from template
    Created,
    /// Overwritten with the rendered template
    Updated,
    /// Policy is create-if-missing and the file already exists
    Skipped,
    /// Already equal to the template
    Unchanged,
    /// Diverged from the template; user customization wins
    Kept,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcileReport {
    pub created: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
    pub unchanged: Vec<String>,
    pub kept: Vec<String>,
    /// Artifacts whose step failed with an I/O or render error
    pub failures: usize,
}

impl ReconcileReport {
    fn record(&mut self, path: &str, outcome: ArtifactOutcome) {
        let bucket = match outcome {
            ArtifactOutcome::Created => &mut self.created,
            ArtifactOutcome::Updated => &mut self.updated,
            ArtifactOutcome::Skipped => &mut self.skipped,
            ArtifactOutcome::Unchanged => &mut self.unchanged,
            ArtifactOutcome::Kept => &mut self.kept,
        };
        bucket.push(path.to_string());
    }
}

/// Compare on-disk content to a rendered template.
pub fn contents_equal(on_disk: &str, template: &str, comparison: Comparison) -> bool {
    match comparison {
        Comparison::Bytes => on_disk == template,
        Comparison::JsonIgnoring(volatile) => {
            let strip = |content: &str| -> Option<Value> {
                let mut value: Value = serde_json::from_str(content).ok()?;
                if let Some(map) = value.as_object_mut() {
                    for key in volatile {
                        map.remove(*key);
                    }
                }
                Some(value)
            };
            // Unparseable JSON counts as modified
            match (strip(on_disk), strip(template)) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
    }
}

async fn write_artifact(path: &Path, content: &str) -> Result<(), ReconcileError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, content).await?;
    Ok(())
}

async fn process_artifact(
    project_path: &Path,
    artifact: &ManagedArtifact,
    ctx: &ArtifactContext,
    ignore: &IgnoreList,
) -> Result<ArtifactOutcome, ReconcileError> {
    let full_path = project_path.join(artifact.rel_path);

    if !full_path.exists() {
        let content = artifact.render(ctx)?;
        write_artifact(&full_path, &content).await?;
        return Ok(ArtifactOutcome::Created);
    }

    match artifact.policy {
        OverwritePolicy::AlwaysOverwrite => {
            let content = artifact.render(ctx)?;
            write_artifact(&full_path, &content).await?;
            Ok(ArtifactOutcome::Updated)
        }
        OverwritePolicy::CreateIfMissing => Ok(ArtifactOutcome::Skipped),
        OverwritePolicy::OverwriteIfIgnoredOrMissing => {
            let template = artifact.render(ctx)?;
            let on_disk = fs::read_to_string(&full_path).await?;

            if contents_equal(&on_disk, &template, artifact.comparison) {
                return Ok(ArtifactOutcome::Unchanged);
            }

            // Still ignore-listed means never customized: safe to refresh
            if ignore.contains(artifact.rel_path) {
                write_artifact(&full_path, &template).await?;
                Ok(ArtifactOutcome::Updated)
            } else {
                // User customization wins; the ignore sweep drops the entry
                Ok(ArtifactOutcome::Kept)
            }
        }
    }
}

/// Reconcile managed artifacts against their templates, then bring the
/// ignore list into agreement with on-disk state.
///
/// The artifact pass covers `selected` only; the ignore sweep always walks
/// the full `registry`, so a scoped run cannot leave a stale entry for an
/// artifact it did not touch.
pub async fn reconcile(
    project_path: &Path,
    selected: &[ManagedArtifact],
    registry: &[ManagedArtifact],
    ctx: &ArtifactContext,
) -> Result<ReconcileReport, ReconcileError> {
    let ignore_path = get_ignore_path(project_path);

    // Pre-run membership decides which ignored artifacts are safe to refresh
    let pre_ignore = if ignore_path.exists() {
        IgnoreList::parse(&fs::read_to_string(&ignore_path).await?)
    } else {
        IgnoreList::default()
    };

    let mut report = ReconcileReport::default();

    for artifact in selected {
        match process_artifact(project_path, artifact, ctx, &pre_ignore).await {
            Ok(outcome) => {
                match outcome {
                    ArtifactOutcome::Created => info!("created: {}", artifact.rel_path),
                    ArtifactOutcome::Updated => info!("updated: {}", artifact.rel_path),
                    ArtifactOutcome::Skipped => debug!("skipped: {} (exists)", artifact.rel_path),
                    ArtifactOutcome::Unchanged => debug!("unchanged: {}", artifact.rel_path),
                    ArtifactOutcome::Kept => {
                        info!("kept: {} (user customization)", artifact.rel_path)
                    }
                }
                report.record(artifact.rel_path, outcome);
            }
            Err(err) => {
                // One artifact failing does not abort the run
                warn!("failed: {} ({err})", artifact.rel_path);
                report.failures += 1;
            }
        }
    }

    // The artifact pass may have just created .gitignore, so re-read it
    // before the sweep instead of reusing the pre-run copy
    if ignore_path.exists() {
        let mut ignore = IgnoreList::parse(&fs::read_to_string(&ignore_path).await?);
        sweep_ignore_list(project_path, registry, ctx, &mut ignore).await;
        if ignore.is_modified() {
            fs::write(&ignore_path, ignore.to_content()).await?;
            info!("updated: .gitignore");
        }
    }

    Ok(report)
}

/// Final sweep: for every overwrite-if-ignored artifact still on disk, the
/// ignore list must agree with template equality.
async fn sweep_ignore_list(
    project_path: &Path,
    artifacts: &[ManagedArtifact],
    ctx: &ArtifactContext,
    ignore: &mut IgnoreList,
) {
    for artifact in artifacts {
        if artifact.policy != OverwritePolicy::OverwriteIfIgnoredOrMissing {
            continue;
        }

        let full_path = project_path.join(artifact.rel_path);
        if !full_path.exists() {
            continue;
        }

        let template = match artifact.render(ctx) {
            Ok(template) => template,
            Err(err) => {
                warn!("render failed during ignore sweep: {} ({err})", artifact.rel_path);
                continue;
            }
        };
        let on_disk = match fs::read_to_string(&full_path).await {
            Ok(content) => content,
            Err(err) => {
                warn!("read failed during ignore sweep: {} ({err})", artifact.rel_path);
                continue;
            }
        };

        if contents_equal(&on_disk, &template, artifact.comparison) {
            if ignore.insert(artifact.rel_path) {
                info!("added to .gitignore: {} (matches template)", artifact.rel_path);
            }
        } else if ignore.remove(artifact.rel_path) {
            info!(
                "removed from .gitignore: {} (customized)",
                artifact.rel_path
            );
        }
    }
}
