use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One file to upload: where it lives locally and where it lands remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTask {
    pub local_path: PathBuf,
    pub remote_path: String,
}

/// Collect every regular file under `local_root` as an upload task.
/// Remote paths always use `/` separators, whatever the host convention.
/// The walk is sorted by file name so repeated runs over an unchanged tree
/// produce the same order.
pub fn collect_tasks(local_root: &Path, remote_root: &str) -> Result<Vec<UploadTask>, std::io::Error> {
    let remote_root = remote_root.trim_matches('/');
    let mut tasks = Vec::new();

    for entry in WalkDir::new(local_root).sort_by_file_name() {
        let entry = entry.map_err(std::io::Error::other)?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(local_root)
            .map_err(std::io::Error::other)?;
        let relative: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();

        let relative = relative.join("/");
        let remote_path = if remote_root.is_empty() {
            relative
        } else {
            format!("{remote_root}/{relative}")
        };

        tasks.push(UploadTask {
            local_path: entry.path().to_path_buf(),
            remote_path,
        });
    }

    Ok(tasks)
}
