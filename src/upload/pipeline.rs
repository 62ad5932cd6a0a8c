use super::collect::{collect_tasks, UploadTask};
use super::config::StorageConfigError;
use super::progress::ProgressLine;
use super::store::ObjectStore;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Storage config error: {0}")]
    ConfigError(#[from] StorageConfigError),
}

/// Final accounting for an upload run.
#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Local paths that failed, in traversal order
    pub failed_paths: Vec<String>,
    /// Public URL prefix, reported when at least one file made it
    pub access_url: Option<String>,
}

/// Mirror a local directory tree into the store under `remote_root`.
/// Tasks run strictly one after another; a failing task is logged and
/// counted, never aborts the run.
pub async fn upload_dir(
    store: &dyn ObjectStore,
    local_root: &Path,
    remote_root: &str,
    access_base_url: &str,
) -> Result<UploadReport, UploadError> {
    let tasks = collect_tasks(local_root, remote_root)?;
    info!("total files: {}", tasks.len());

    let report = run_tasks(store, &tasks, access_base_url, remote_root).await;

    info!(
        "upload complete: {} succeeded, {} failed",
        report.succeeded, report.failed
    );
    if !report.failed_paths.is_empty() {
        info!("failed files:");
        for path in &report.failed_paths {
            info!("  {path}");
        }
    }
    if let Some(url) = &report.access_url {
        info!("access url: {url}");
    }

    Ok(report)
}

async fn run_tasks(
    store: &dyn ObjectStore,
    tasks: &[UploadTask],
    access_base_url: &str,
    remote_root: &str,
) -> UploadReport {
    let total = tasks.len();
    let mut report = UploadReport {
        attempted: total,
        ..Default::default()
    };

    let progress = ProgressLine::start(total);
    let mut done = 0;

    for task in tasks {
        match store.put(&task.remote_path, &task.local_path).await {
            Ok(()) => report.succeeded += 1,
            Err(err) => {
                // Keep the indicator line intact: error goes on its own
                // line through the same writer as the bar
                progress.interrupt(&format!(
                    "upload failed: {} ({err})",
                    task.local_path.display()
                ));
                report.failed_paths.push(task.local_path.display().to_string());
                report.failed += 1;
            }
        }
        done += 1;
        progress.redraw(done);
    }

    progress.finish();

    if report.succeeded > 0 {
        let remote_root = remote_root.trim_matches('/');
        report.access_url = Some(if remote_root.is_empty() {
            format!("{access_base_url}/")
        } else {
            format!("{access_base_url}/{remote_root}/")
        });
    }

    report
}
