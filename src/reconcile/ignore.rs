/// Header comment introducing the generated-file block in `.gitignore`.
pub const GENERATED_HEADER: [&str; 2] = [
    "# Files below are generated by packsmith and need not be committed",
    "# Run `packsmith update` to regenerate them",
];

/// An ordered line view of the ignore-list file. Managed paths appear at
/// most once as exact-match lines; membership doubles as the
/// "currently matches its template" marker.
#[derive(Debug, Clone, Default)]
pub struct IgnoreList {
    lines: Vec<String>,
    modified: bool,
}

impl IgnoreList {
    pub fn parse(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
            modified: false,
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.lines.iter().any(|line| line == path)
    }

    fn has_header(&self) -> bool {
        self.lines.iter().any(|line| line == GENERATED_HEADER[0])
    }

    /// Insert a path as an exact-match line, adding the explanatory header
    /// exactly once. No-op when already present.
    pub fn insert(&mut self, path: &str) -> bool {
        if self.contains(path) {
            return false;
        }
        if !self.has_header() {
            self.lines.push(String::new());
            for line in GENERATED_HEADER {
                self.lines.push(line.to_string());
            }
        }
        self.lines.push(path.to_string());
        self.modified = true;
        true
    }

    /// Remove every exact-match line for the path.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line != path);
        let removed = self.lines.len() != before;
        if removed {
            self.modified = true;
        }
        removed
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Serialize deterministically: blank runs collapse to one blank line,
    /// no leading blanks, exactly one trailing newline.
    pub fn to_content(&self) -> String {
        let mut out: Vec<&str> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            if line.trim().is_empty() && matches!(out.last(), None | Some(&"")) {
                continue;
            }
            out.push(if line.trim().is_empty() { "" } else { line });
        }
        while matches!(out.last(), Some(&"")) {
            out.pop();
        }
        let mut content = out.join("\n");
        content.push('\n');
        content
    }
}
