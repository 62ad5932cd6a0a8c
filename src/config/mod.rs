use crate::utils::get_config_path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tokio::fs;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Per-artifact overwrite policy, overridable from `packsmith.json`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverwritePolicy {
    /// Write only when the file does not exist
    CreateIfMissing,
    /// Overwrite unconditionally
    AlwaysOverwrite,
    /// Overwrite when the file is still ignore-listed (never customized),
    /// otherwise leave user edits alone
    OverwriteIfIgnoredOrMissing,
}

/// ESLint section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EslintConfig {
    pub enabled: bool,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub rules: HashMap<String, serde_json::Value>,
}

impl Default for EslintConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ignores: Vec::new(),
            rules: HashMap::new(),
        }
    }
}

/// Vitest section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VitestConfig {
    pub enabled: bool,
    /// Test timeout in milliseconds (0 = unlimited)
    #[serde(default)]
    pub test_timeout: u64,
}

impl Default for VitestConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            test_timeout: 0,
        }
    }
}

/// TypeDoc section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypedocConfig {
    pub enabled: bool,
    pub out_dir: String,
}

impl Default for TypedocConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            out_dir: "public".to_string(),
        }
    }
}

/// Object-storage upload section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OssConfig {
    pub local_dir: String,
    /// Remote prefix; empty = use the package name
    pub oss_dir: String,
}

impl Default for OssConfig {
    fn default() -> Self {
        Self {
            local_dir: "./public".to_string(),
            oss_dir: String::new(),
        }
    }
}

/// Scaffolding section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TemplatesConfig {
    pub examples: bool,
    pub test: bool,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            examples: true,
            test: true,
        }
    }
}

/// Which artifact groups `packsmith update` touches by default
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateConfig {
    pub config: bool,
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
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            config: true,
            eslint: true,
            gitignore: true,
            cursorrules: true,
            publish: true,
            pages: true,
            pull_request: true,
            typedoc: true,
            test: true,
            deps: true,
            husky: true,
            license: true,
            vscode: true,
            tsconfig: true,
        }
    }
}

/// Packsmith project configuration (`packsmith.json`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PacksmithConfig {
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub eslint: EslintConfig,
    #[serde(default)]
    pub vitest: VitestConfig,
    #[serde(default)]
    pub typedoc: TypedocConfig,
    #[serde(default)]
    pub oss: OssConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
    #[serde(default)]
    pub update: UpdateConfig,
    /// Per-path policy overrides for managed artifacts
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub overwrite: HashMap<String, OverwritePolicy>,
}

impl PacksmithConfig {
    /// Default configuration carrying the given identity fields
    pub fn with_identity(name: &str, schema_path: &str) -> Self {
        Self {
            schema: Some(schema_path.to_string()),
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// Published location of the config schema
pub const SCHEMA_URL: &str = "https://unpkg.com/packsmith/schema/packsmith.schema.json";

/// Relative schema path used when packsmith is installed in the project
pub const LOCAL_SCHEMA_PATH: &str = "./node_modules/packsmith/schema/packsmith.schema.json";

/// Prefer the locally installed schema when present, else the published URL
pub fn detect_schema_path(project_path: &Path) -> String {
    let local = project_path.join("node_modules/packsmith/schema/packsmith.schema.json");
    if local.exists() {
        LOCAL_SCHEMA_PATH.to_string()
    } else {
        SCHEMA_URL.to_string()
    }
}

/// Serialize a config the way generated files are written (4-space indent,
/// trailing newline)
pub fn config_to_string(config: &PacksmithConfig) -> Result<String, serde_json::Error> {
    pretty_json(&serde_json::to_value(config)?)
}

fn pretty_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    serde::Serialize::serialize(value, &mut ser)?;
    let mut out = String::from_utf8(buf).expect("serde_json produces valid UTF-8");
    out.push('\n');
    Ok(out)
}

/// Read `packsmith.json` if present. Returns `None` when the file is absent.
pub async fn read_config(project_path: &Path) -> Result<Option<PacksmithConfig>, ConfigError> {
    let config_path = get_config_path(project_path);
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path).await?;
    let config: PacksmithConfig = serde_json::from_str(&content)?;
    Ok(Some(config))
}

/// Read the project config, falling back to defaults when it is missing or
/// unreadable. A failure is logged, never silent.
pub async fn read_config_or_default(project_path: &Path) -> PacksmithConfig {
    match read_config(project_path).await {
        Ok(Some(config)) => config,
        Ok(None) => PacksmithConfig::default(),
        Err(err) => {
            warn!("could not read packsmith.json, using defaults ({err})");
            PacksmithConfig::default()
        }
    }
}

/// Load the project config, creating it from defaults when missing.
///
/// An unparseable config file is logged and replaced by defaults in memory
/// (the file itself is left alone; the reconciliation engine decides what
/// happens to it).
pub async fn load_or_create_config(
    project_path: &Path,
    package_name: &str,
) -> Result<PacksmithConfig, ConfigError> {
    let config_path = get_config_path(project_path);
    let schema_path = detect_schema_path(project_path);

    if !config_path.exists() {
        let config = PacksmithConfig::with_identity(package_name, &schema_path);
        fs::write(&config_path, config_to_string(&config)?).await?;
        tracing::info!("created: packsmith.json");
        return Ok(config);
    }

    let content = fs::read_to_string(&config_path).await?;
    match serde_json::from_str::<PacksmithConfig>(&content) {
        Ok(mut config) => {
            // Keep the schema pointer current. The rewrite patches the raw
            // document, not the typed struct, so fields the struct does not
            // model survive it.
            if config.schema.as_deref() != Some(schema_path.as_str()) {
                config.schema = Some(schema_path.clone());
                let mut raw: serde_json::Value = serde_json::from_str(&content)?;
                if let Some(fields) = raw.as_object_mut() {
                    fields.insert(
                        "$schema".to_string(),
                        serde_json::Value::String(schema_path.clone()),
                    );
                }
                fs::write(&config_path, pretty_json(&raw)?).await?;
                tracing::info!("updated: packsmith.json $schema -> {}", schema_path);
            }
            Ok(config)
        }
        Err(err) => {
            warn!("could not parse packsmith.json, using defaults ({err})");
            Ok(PacksmithConfig::with_identity(package_name, &schema_path))
        }
    }
}
