use crate::config::{
    config_to_string, OverwritePolicy, PacksmithConfig,
};
use crate::templates::{self, RenderContext, TemplateError};
use crate::utils::CONFIG_FILE;

/// How on-disk content is compared against a freshly rendered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// Byte-for-byte equality
    Bytes,
    /// Structural JSON equality, ignoring the named volatile top-level keys.
    /// Unparseable JSON counts as modified.
    JsonIgnoring(&'static [&'static str]),
}

/// Artifact groups, matching the `update` command toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactGroup {
    Config,
    Gitignore,
    Cursorrules,
    Eslint,
    Typedoc,
    Test,
    Husky,
    License,
    Vscode,
    Tsconfig,
    Publish,
    Pages,
    PullRequest,
}

/// Context threaded through artifact rendering.
#[derive(Debug, Clone)]
pub struct ArtifactContext {
    pub render: RenderContext,
    pub schema_path: String,
}

type RenderFn = fn(&ArtifactContext) -> Result<String, TemplateError>;

/// A file packsmith generates, tracks, and conditionally overwrites.
#[derive(Clone)]
pub struct ManagedArtifact {
    pub rel_path: &'static str,
    pub policy: OverwritePolicy,
    pub comparison: Comparison,
    pub group: ArtifactGroup,
    render: RenderFn,
}

impl ManagedArtifact {
    pub fn render(&self, ctx: &ArtifactContext) -> Result<String, TemplateError> {
        (self.render)(ctx)
    }
}

impl std::fmt::Debug for ManagedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedArtifact")
            .field("rel_path", &self.rel_path)
            .field("policy", &self.policy)
            .field("comparison", &self.comparison)
            .field("group", &self.group)
            .finish()
    }
}

fn render_project_config(ctx: &ArtifactContext) -> Result<String, TemplateError> {
    let config = PacksmithConfig::with_identity(&ctx.render.name, &ctx.schema_path);
    Ok(config_to_string(&config)?)
}

/// Enumerate the managed artifact set for a project. The per-artifact
/// policy comes from the built-in table, remappable through the
/// `overwrite` section of `packsmith.json`.
pub fn managed_artifacts(config: &PacksmithConfig) -> Vec<ManagedArtifact> {
    use ArtifactGroup::*;
    use OverwritePolicy::*;

    let mut artifacts: Vec<ManagedArtifact> = vec![
        ManagedArtifact {
            rel_path: ".gitignore",
            policy: CreateIfMissing,
            comparison: Comparison::Bytes,
            group: Gitignore,
            render: |_| Ok(templates::gitignore_template()),
        },
        ManagedArtifact {
            rel_path: "LICENSE",
            policy: CreateIfMissing,
            comparison: Comparison::Bytes,
            group: License,
            render: |ctx| templates::license_template(&ctx.render),
        },
        ManagedArtifact {
            rel_path: "tsconfig.json",
            policy: CreateIfMissing,
            comparison: Comparison::Bytes,
            group: Tsconfig,
            render: |_| Ok(templates::tsconfig_template()),
        },
        ManagedArtifact {
            rel_path: "vite.config.js",
            policy: CreateIfMissing,
            comparison: Comparison::Bytes,
            group: Tsconfig,
            render: |_| Ok(templates::vite_config_template()),
        },
        ManagedArtifact {
            rel_path: "scripts/prepublish.js",
            policy: CreateIfMissing,
            comparison: Comparison::Bytes,
            group: Publish,
            render: |_| Ok(templates::prepublish_script_template()),
        },
        ManagedArtifact {
            rel_path: "scripts/postpublish.js",
            policy: CreateIfMissing,
            comparison: Comparison::Bytes,
            group: Publish,
            render: |_| Ok(templates::postpublish_script_template()),
        },
        ManagedArtifact {
            rel_path: ".cursorrules",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: Cursorrules,
            render: |_| Ok(templates::cursorrules_template()),
        },
        ManagedArtifact {
            rel_path: ".vscode/settings.json",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: Vscode,
            render: |_| Ok(templates::vscode_settings_template()),
        },
        ManagedArtifact {
            rel_path: ".husky/pre-commit",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: Husky,
            render: |_| Ok(templates::husky_pre_commit_template()),
        },
        ManagedArtifact {
            rel_path: ".github/workflows/publish.yml",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: Publish,
            render: |_| Ok(templates::publish_workflow_template()),
        },
        ManagedArtifact {
            rel_path: ".github/workflows/pages.yml",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: Pages,
            render: |_| Ok(templates::pages_workflow_template()),
        },
        ManagedArtifact {
            rel_path: ".github/workflows/pull-request.yml",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: PullRequest,
            render: |_| Ok(templates::pull_request_workflow_template()),
        },
        ManagedArtifact {
            rel_path: ".github/workflows/upload-oss.yml",
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: Publish,
            render: |_| Ok(templates::upload_oss_workflow_template()),
        },
        ManagedArtifact {
            rel_path: CONFIG_FILE,
            policy: OverwriteIfIgnoredOrMissing,
            comparison: Comparison::JsonIgnoring(&["name", "$schema"]),
            group: Config,
            render: render_project_config,
        },
    ];

    if config.eslint.enabled {
        artifacts.push(ManagedArtifact {
            rel_path: "eslint.config.js",
            policy: OverwritePolicy::OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: ArtifactGroup::Eslint,
            render: |_| Ok(templates::eslint_config_template()),
        });
    }
    if config.typedoc.enabled {
        artifacts.push(ManagedArtifact {
            rel_path: "typedoc.json",
            policy: OverwritePolicy::OverwriteIfIgnoredOrMissing,
            comparison: Comparison::Bytes,
            group: ArtifactGroup::Typedoc,
            render: |ctx| templates::typedoc_template(&ctx.render),
        });
    }
    if config.vitest.enabled {
        artifacts.push(ManagedArtifact {
            rel_path: "test/index.test.ts",
            policy: OverwritePolicy::CreateIfMissing,
            comparison: Comparison::Bytes,
            group: ArtifactGroup::Test,
            render: |_| Ok(templates::test_index_template()),
        });
    }

    // Per-path policy overrides from the project config
    for artifact in &mut artifacts {
        if let Some(policy) = config.overwrite.get(artifact.rel_path) {
            artifact.policy = *policy;
        }
    }

    artifacts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_respects_tool_toggles() {
        let mut config = PacksmithConfig::default();
        config.eslint.enabled = false;
        config.vitest.enabled = false;

        let artifacts = managed_artifacts(&config);
        assert!(!artifacts.iter().any(|a| a.rel_path == "eslint.config.js"));
        assert!(!artifacts.iter().any(|a| a.rel_path == "test/index.test.ts"));
        assert!(artifacts.iter().any(|a| a.rel_path == "typedoc.json"));
    }

    #[test]
    fn test_policy_override_from_config() {
        let mut config = PacksmithConfig::default();
        config.overwrite.insert(
            ".cursorrules".to_string(),
            OverwritePolicy::AlwaysOverwrite,
        );

        let artifacts = managed_artifacts(&config);
        let cursorrules = artifacts
            .iter()
            .find(|a| a.rel_path == ".cursorrules")
            .unwrap();
        assert_eq!(cursorrules.policy, OverwritePolicy::AlwaysOverwrite);
    }

    #[test]
    fn test_paths_are_unique() {
        let config = PacksmithConfig::default();
        let artifacts = managed_artifacts(&config);
        let mut paths: Vec<&str> = artifacts.iter().map(|a| a.rel_path).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), artifacts.len());
    }
}
