use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;
use walkdir::WalkDir;

/// Create a temporary project directory for a test.
pub fn create_test_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

/// Write a basic package.json, merging any extra fields over the defaults.
pub async fn write_package_json(dir: &Path, extra: Value) {
    let mut package = json!({
        "name": "test-project",
        "version": "1.0.0",
    });
    if let (Some(base), Some(extra)) = (package.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            base.insert(key.clone(), value.clone());
        }
    }
    let content = format!("{}\n", serde_json::to_string_pretty(&package).unwrap());
    tokio::fs::write(dir.join("package.json"), content)
        .await
        .expect("Failed to write package.json");
}

/// Read package.json back as a JSON value.
pub async fn read_package_json(dir: &Path) -> Value {
    let content = tokio::fs::read_to_string(dir.join("package.json"))
        .await
        .expect("Failed to read package.json");
    serde_json::from_str(&content).expect("package.json should parse")
}

/// Snapshot every file under the directory as path -> content bytes.
pub fn snapshot_tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut out = BTreeMap::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.expect("walk should succeed");
        if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(dir)
                .unwrap()
                .to_string_lossy()
                .into_owned();
            out.insert(relative, std::fs::read(entry.path()).unwrap());
        }
    }
    out
}
