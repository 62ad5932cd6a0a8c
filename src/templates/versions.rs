use serde_json::Value;
use std::collections::BTreeMap;

/// Which optional tool versions to include
#[derive(Debug, Clone, Copy, Default)]
pub struct DevDependencyOptions {
    pub include_vitest: bool,
    pub include_typedoc: bool,
}

impl DevDependencyOptions {
    pub fn all() -> Self {
        Self {
            include_vitest: true,
            include_typedoc: true,
        }
    }
}

/// The house devDependency versions, read from the embedded template
/// `package.json` on every call (no process-wide cache).
pub fn standard_dev_dependencies(options: DevDependencyOptions) -> BTreeMap<String, String> {
    let template: Value = serde_json::from_str(include_str!("files/package.json"))
        .unwrap_or(Value::Null);

    let mut deps = BTreeMap::new();
    if let Some(map) = template
        .get("devDependencies")
        .and_then(Value::as_object)
    {
        for (name, version) in map {
            if let Some(version) = version.as_str() {
                deps.insert(name.clone(), version.to_string());
            }
        }
    }

    if !options.include_vitest {
        deps.remove("vitest");
    }
    if !options.include_typedoc {
        deps.remove("typedoc");
    }

    deps
}
