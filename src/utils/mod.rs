use std::path::{Path, PathBuf};

/// The name of the project configuration file
pub const CONFIG_FILE: &str = "packsmith.json";

/// The name of the package descriptor file
pub const PACKAGE_FILE: &str = "package.json";

/// The name of the ignore-list file
pub const IGNORE_FILE: &str = ".gitignore";

/// Get the path to the project configuration file
pub fn get_config_path(project_path: &Path) -> PathBuf {
    project_path.join(CONFIG_FILE)
}

/// Get the path to the package descriptor file
pub fn get_package_path(project_path: &Path) -> PathBuf {
    project_path.join(PACKAGE_FILE)
}

/// Get the path to the ignore-list file
pub fn get_ignore_path(project_path: &Path) -> PathBuf {
    project_path.join(IGNORE_FILE)
}

/// Get the current calendar year
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Utc::now().year()
}
