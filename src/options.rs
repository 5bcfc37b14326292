//! Analyzer configuration.

/// Options controlling which parts are read and which passes run.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Archive prefix of the parts to analyze.
    pub content_root: String,

    /// Collapse adjacent runs with identical style.
    pub merge_runs: bool,

    /// Build the cross-part text style index.
    pub merge_sources: bool,

    pub tables: bool,

    pub images: bool,

    /// Parts larger than this (uncompressed bytes) are skipped.
    pub max_part_size: u64,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            content_root: String::from("word/"),
            merge_runs: true,
            merge_sources: true,
            tables: true,
            images: true,
            max_part_size: 64 * 1024 * 1024,
        }
    }
}

impl AnalyzeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content_root(mut self, root: impl Into<String>) -> Self {
        let mut root = root.into();
        if !root.is_empty() && !root.ends_with('/') {
            root.push('/');
        }
        self.content_root = root;
        self
    }

    pub fn with_merge_runs(mut self, merge: bool) -> Self {
        self.merge_runs = merge;
        self
    }

    pub fn with_merge_sources(mut self, merge: bool) -> Self {
        self.merge_sources = merge;
        self
    }

    pub fn with_tables(mut self, tables: bool) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_images(mut self, images: bool) -> Self {
        self.images = images;
        self
    }

    pub fn with_max_part_size(mut self, bytes: u64) -> Self {
        self.max_part_size = bytes;
        self
    }

    /// Whether an archive entry is a part the analyzer should parse.
    pub fn is_eligible(&self, name: &str) -> bool {
        name.starts_with(&self.content_root)
            && name.ends_with(".xml")
            && !name.contains("/_rels/")
            && !name.ends_with(".rels")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligible_parts() {
        let opts = AnalyzeOptions::default();
        assert!(opts.is_eligible("word/document.xml"));
        assert!(opts.is_eligible("word/header1.xml"));
        assert!(!opts.is_eligible("word/_rels/document.xml.rels"));
        assert!(!opts.is_eligible("word/media/image1.png"));
        assert!(!opts.is_eligible("docProps/core.xml"));
        assert!(!opts.is_eligible("[Content_Types].xml"));
    }

    #[test]
    fn content_root_gets_trailing_slash() {
        let opts = AnalyzeOptions::new().with_content_root("custom");
        assert_eq!(opts.content_root, "custom/");
        assert!(opts.is_eligible("custom/document.xml"));
    }
}
