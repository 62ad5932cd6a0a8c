use serde_json::{Map, Value};

use super::order::reorder_manifest;

/// Whitespace conventions detected from an existing `package.json` and
/// reproduced on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatStyle {
    /// One indentation unit (e.g. four spaces or a tab)
    pub indent: String,
    /// Whether the file ended with a newline
    pub trailing_newline: bool,
}

impl Default for FormatStyle {
    fn default() -> Self {
        Self {
            indent: "    ".to_string(),
            trailing_newline: true,
        }
    }
}

impl FormatStyle {
    /// Detect the indent unit from the first indented line and whether the
    /// content ends with a newline.
    pub fn detect(content: &str) -> Self {
        let indent = content
            .lines()
            .find_map(|line| {
                let ws: String = line
                    .chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .collect();
                if ws.is_empty() || ws.len() == line.len() {
                    None
                } else {
                    Some(ws)
                }
            })
            .unwrap_or_else(|| "    ".to_string());

        Self {
            indent,
            trailing_newline: content.ends_with('\n'),
        }
    }
}

/// An ordered view of a `package.json`, round-trippable without clobbering
/// key order, unknown fields, or whitespace style.
#[derive(Debug, Clone)]
pub struct PackageManifest {
    fields: Map<String, Value>,
    format: FormatStyle,
    /// Snapshot taken at load, used for the zero-write check
    original: Map<String, Value>,
}

impl PackageManifest {
    /// Parse an existing manifest, remembering its formatting.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(content)?;
        Ok(Self {
            original: fields.clone(),
            format: FormatStyle::detect(content),
            fields,
        })
    }

    /// Synthesize a minimal manifest for a new project.
    pub fn new_minimal(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        fields.insert("version".to_string(), Value::String("0.0.1".to_string()));
        Self {
            fields,
            format: FormatStyle::default(),
            // Empty snapshot so a synthesized manifest always writes
            original: Map::new(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    /// Set a field only when absent. Returns true when the field was added.
    pub fn set_if_absent(&mut self, key: &str, value: Value) -> bool {
        if self.fields.contains_key(key) {
            false
        } else {
            self.fields.insert(key.to_string(), value);
            true
        }
    }

    /// Mutable access to an object-valued field, creating it when missing.
    pub fn object_mut(&mut self, key: &str) -> &mut Map<String, Value> {
        let entry = self
            .fields
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        entry.as_object_mut().expect("just ensured an object")
    }

    pub fn format(&self) -> &FormatStyle {
        &self.format
    }

    /// True when some field changed value since load. Key order alone does
    /// not count as a change.
    pub fn is_dirty(&self) -> bool {
        self.fields != self.original
    }

    /// Serialize with canonical field order and the detected formatting.
    pub fn to_content(&self) -> String {
        let ordered = reorder_manifest(&self.fields);
        let mut buf = Vec::new();
        let formatter =
            serde_json::ser::PrettyFormatter::with_indent(self.format.indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(&Value::Object(ordered), &mut ser)
            .expect("JSON maps serialize without errors");
        let mut out = String::from_utf8(buf).expect("serde_json produces valid UTF-8");
        if self.format.trailing_newline {
            out.push('\n');
        }
        out
    }
}
