mod versions;

pub use versions::{standard_dev_dependencies, DevDependencyOptions};

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Render error: {0}")]
    RenderError(#[from] handlebars::RenderError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Context supplied to template rendering
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext {
    /// Package name (may be scoped, e.g. `@packsmith/thing`)
    pub name: String,
    /// Repository name (package name without scope)
    pub repo_name: String,
    /// Year used in the license header
    pub year: i32,
}

impl RenderContext {
    pub fn new(name: &str) -> Self {
        let repo_name = name.rsplit('/').next().unwrap_or(name).to_string();
        Self {
            name: name.to_string(),
            repo_name,
            year: crate::utils::current_year(),
        }
    }
}

fn render(template: &str, ctx: &RenderContext) -> Result<String, TemplateError> {
    let handlebars = Handlebars::new();
    handlebars
        .render_template(template, ctx)
        .map_err(TemplateError::from)
}

/// `.gitignore` template
pub fn gitignore_template() -> String {
    include_str!("files/gitignore").to_string()
}

/// `.cursorrules` template
pub fn cursorrules_template() -> String {
    include_str!("files/cursorrules").to_string()
}

/// `eslint.config.js` template
pub fn eslint_config_template() -> String {
    include_str!("files/eslint.config.js").to_string()
}

/// `tsconfig.json` template
pub fn tsconfig_template() -> String {
    include_str!("files/tsconfig.json").to_string()
}

/// `vite.config.js` template
pub fn vite_config_template() -> String {
    include_str!("files/vite.config.js").to_string()
}

/// `typedoc.json` template, parameterized by repository name
pub fn typedoc_template(ctx: &RenderContext) -> Result<String, TemplateError> {
    render(include_str!("files/typedoc.json"), ctx)
}

/// `LICENSE` template, parameterized by year
pub fn license_template(ctx: &RenderContext) -> Result<String, TemplateError> {
    render(include_str!("files/license"), ctx)
}

/// `.vscode/settings.json` template
pub fn vscode_settings_template() -> String {
    include_str!("files/vscode-settings.json").to_string()
}

/// `.husky/pre-commit` template
pub fn husky_pre_commit_template() -> String {
    include_str!("files/pre-commit").to_string()
}

/// `.github/workflows/publish.yml` template
pub fn publish_workflow_template() -> String {
    include_str!("files/workflows/publish.yml").to_string()
}

/// `.github/workflows/pages.yml` template
pub fn pages_workflow_template() -> String {
    include_str!("files/workflows/pages.yml").to_string()
}

/// `.github/workflows/pull-request.yml` template
pub fn pull_request_workflow_template() -> String {
    include_str!("files/workflows/pull-request.yml").to_string()
}

/// `.github/workflows/upload-oss.yml` template
pub fn upload_oss_workflow_template() -> String {
    include_str!("files/workflows/upload-oss.yml").to_string()
}

/// `scripts/prepublish.js` template
pub fn prepublish_script_template() -> String {
    include_str!("files/scripts/prepublish.js").to_string()
}

/// `scripts/postpublish.js` template
pub fn postpublish_script_template() -> String {
    include_str!("files/scripts/postpublish.js").to_string()
}

/// `src/index.ts` template, parameterized by package name
pub fn src_index_template(ctx: &RenderContext) -> Result<String, TemplateError> {
    render(include_str!("files/src-index.ts"), ctx)
}

/// `test/index.test.ts` template
pub fn test_index_template() -> String {
    include_str!("files/test-index.ts").to_string()
}
