use serde_json::{Map, Value};

/// Canonical top-level field order. Unknown fields keep their original
/// relative order after these.
pub const FIELD_ORDER: &[&str] = &[
    "name",
    "version",
    "description",
    "type",
    "keywords",
    "homepage",
    "repository",
    "bugs",
    "license",
    "author",
    "files",
    "main",
    "module",
    "types",
    "exports",
    "scripts",
    "lint-staged",
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
    "engines",
];

/// Canonical `scripts` order.
pub const SCRIPT_ORDER: &[&str] = &[
    "prepare",
    "clean",
    "build",
    "dev",
    "test",
    "coverage",
    "lint",
    "docs",
    "prepublishOnly",
    "postpublish",
    "release",
];

fn reorder_keys(map: &Map<String, Value>, order: &[&str]) -> Map<String, Value> {
    let mut out = Map::new();
    for key in order {
        if let Some(value) = map.get(*key) {
            out.insert((*key).to_string(), value.clone());
        }
    }
    for (key, value) in map {
        if !order.contains(&key.as_str()) {
            out.insert(key.clone(), value.clone());
        }
    }
    out
}

/// Reorder top-level fields and the `scripts` sub-mapping canonically.
pub fn reorder_manifest(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut out = reorder_keys(fields, FIELD_ORDER);
    if let Some(Value::Object(scripts)) = out.get("scripts") {
        let reordered = reorder_keys(scripts, SCRIPT_ORDER);
        out.insert("scripts".to_string(), Value::Object(reordered));
    }
    out
}
