use serde_json::{json, Value};
use std::collections::BTreeMap;

use super::types::PackageManifest;

/// How dependency version sync treats keys missing from the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncMode {
    /// Update only keys already present
    Conservative,
    /// Add missing keys and correct mismatched versions
    Additive,
}

/// Standard script set, filtered by which tools the project enables.
pub fn standard_scripts(
    include_vitest: bool,
    include_typedoc: bool,
    include_eslint: bool,
) -> Vec<(&'static str, &'static str)> {
    let mut scripts = vec![
        ("clean", "rimraf lib dist public"),
        ("build", "vite build && tsc"),
    ];
    if include_vitest {
        scripts.push(("test", "vitest run"));
    }
    if include_eslint {
        scripts.push(("lint", "eslint ."));
    }
    if include_typedoc {
        scripts.push(("docs", "typedoc"));
    }
    scripts.push(("prepublishOnly", "npm run build && node scripts/prepublish.js"));
    scripts.push(("postpublish", "node scripts/postpublish.js"));
    scripts.push(("release", "npm version patch && git push && git push --tags"));
    scripts
}

/// Sync `devDependencies` versions against the house versions table.
/// Returns how many entries changed.
pub fn sync_dependencies(
    manifest: &mut PackageManifest,
    versions: &BTreeMap<String, String>,
    mode: SyncMode,
) -> usize {
    if mode == SyncMode::Conservative && manifest.get("devDependencies").is_none() {
        return 0;
    }

    let deps = manifest.object_mut("devDependencies");
    let mut changed = 0;

    for (name, version) in versions {
        let present = deps.get(name).and_then(Value::as_str);
        match (present, mode) {
            (Some(current), _) if current != version => {
                deps.insert(name.clone(), Value::String(version.clone()));
                changed += 1;
            }
            (None, SyncMode::Additive) => {
                deps.insert(name.clone(), Value::String(version.clone()));
                changed += 1;
            }
            _ => {}
        }
    }

    changed
}

/// Add missing script entries. Existing user scripts always win unless
/// `force` is set (the migration variant, which resyncs the standard set).
pub fn inject_scripts(
    manifest: &mut PackageManifest,
    scripts: &[(&str, &str)],
    force: bool,
) -> usize {
    let target = manifest.object_mut("scripts");
    let mut changed = 0;

    for (name, command) in scripts {
        let current = target.get(*name).and_then(Value::as_str);
        let should_write = match current {
            None => true,
            Some(existing) => force && existing != *command,
        };
        if should_write {
            target.insert((*name).to_string(), Value::String((*command).to_string()));
            changed += 1;
        }
    }

    changed
}

/// Canonical entry-point fields for a source-published package.
pub fn normalize_entry_points(manifest: &mut PackageManifest, force: bool) -> usize {
    let entries: [(&str, Value); 5] = [
        ("type", json!("module")),
        ("main", json!("./src/index.ts")),
        ("module", json!("./src/index.ts")),
        ("types", json!("./src/index.ts")),
        (
            "exports",
            json!({
                ".": {
                    "types": "./src/index.ts",
                    "import": "./src/index.ts"
                }
            }),
        ),
    ];

    let mut changed = 0;
    for (key, value) in entries {
        if force {
            if manifest.get(key) != Some(&value) {
                manifest.set(key, value);
                changed += 1;
            }
        } else if manifest.set_if_absent(key, value) {
            changed += 1;
        }
    }
    changed
}

/// Wire up husky: a `lint-staged` block and the `prepare` script, both only
/// when absent.
pub fn set_lint_staged(manifest: &mut PackageManifest) -> usize {
    let mut changed = 0;
    if manifest.set_if_absent("lint-staged", json!({ "*.{js,ts}": "eslint --fix" })) {
        changed += 1;
    }
    changed += inject_scripts(manifest, &[("prepare", "husky")], false);
    changed
}
