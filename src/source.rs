//! Flow sources: the boundary between whatever measures the content and the
//! engine.
//!
//! A source hands over a complete, already-measured [`PaginationDocument`]. The
//! engine never measures anything itself, so an editor integration only has to
//! implement [`FlowSource`].
//!
//! Documents on disk use TOML or JSON. Flow items are tagged with `kind`:
//!
//! ```toml
//! [[templates]]
//! id = "a4"
//! content_width = 595.0
//! content_height = 1000.0
//!
//! [[flow]]
//! kind = "block"
//! id = "header"
//! height = 180.0
//! keep_with_next = true
//!
//! [[flow]]
//! kind = "group"
//! id = "experience"
//! orphans = 2
//! widows = 2
//! items = [
//!     { id = "job-1", height = 220.0 },
//!     { id = "job-2", height = 260.0 },
//! ]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::SourceError;
use crate::pagination::PaginationDocument;

/// Anything that can produce a document to paginate
pub trait FlowSource {
    fn load(&self) -> Result<PaginationDocument, SourceError>;
}

impl FlowSource for PaginationDocument {
    fn load(&self) -> Result<PaginationDocument, SourceError> {
        validate(self)?;
        Ok(self.clone())
    }
}

/// A document held as TOML text
#[derive(Debug, Clone)]
pub struct TomlSource(pub String);

impl FlowSource for TomlSource {
    fn load(&self) -> Result<PaginationDocument, SourceError> {
        let document: PaginationDocument = toml::from_str(&self.0)?;
        validate(&document)?;
        Ok(document)
    }
}

/// A document held as JSON text
#[derive(Debug, Clone)]
pub struct JsonSource(pub String);

impl FlowSource for JsonSource {
    fn load(&self) -> Result<PaginationDocument, SourceError> {
        let document: PaginationDocument = serde_json::from_str(&self.0)?;
        validate(&document)?;
        Ok(document)
    }
}

/// A `.toml` or `.json` document on disk
#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
}

impl DocumentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FlowSource for DocumentFile {
    fn load(&self) -> Result<PaginationDocument, SourceError> {
        let format = Format::from_path(&self.path).ok_or_else(|| SourceError::UnknownFormat {
            path: self.path.clone(),
        })?;
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| SourceError::io(&self.path, e))?;
        match format {
            Format::Toml => TomlSource(content).load(),
            Format::Json => JsonSource(content).load(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "toml" => Some(Format::Toml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Check the structural rules the engine relies on
fn validate(document: &PaginationDocument) -> Result<(), SourceError> {
    let mut seen = HashSet::new();
    for (index, template) in document.templates.iter().enumerate() {
        if template.id.trim().is_empty() {
            return Err(SourceError::EmptyTemplateId { index });
        }
        if !seen.insert(template.id.as_str()) {
            return Err(SourceError::DuplicateTemplate {
                id: template.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::{BreakHint, FlowItem, PageTemplate};

    const SAMPLE: &str = r#"
[[templates]]
id = "a4"
content_width = 595.0
content_height = 1000.0

[[flow]]
kind = "block"
id = "header"
height = 180.0
keep_with_next = true
break_after = "avoid"

[[flow]]
kind = "group"
id = "experience"
orphans = 2
items = [
    { id = "job-1", height = 220.0 },
    { id = "job-2", height = 260.0, break_after = "after" },
]
"#;

    #[test]
    fn test_toml_source() {
        let document = TomlSource(SAMPLE.to_string()).load().expect("Should parse");
        assert_eq!(document.templates.len(), 1);
        assert_eq!(document.flow.len(), 2);

        match &document.flow[0] {
            FlowItem::Block(b) => {
                assert!(b.keep_with_next);
                assert_eq!(b.break_after, BreakHint::Avoid);
                assert_eq!(b.break_before, BreakHint::Auto);
            }
            other => panic!("expected block, got {:?}", other),
        }
        match &document.flow[1] {
            FlowItem::Group(g) => {
                assert!(g.allow_split);
                assert_eq!(g.orphans, 2);
                assert_eq!(g.widows, 1);
                assert_eq!(g.items[1].break_after, BreakHint::After);
            }
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_json_source() {
        let json = r#"{
            "templates": [{"id": "a4", "content_width": 595, "content_height": 1000}],
            "flow": [
                {"kind": "block", "id": "summary", "height": 120, "break_before": "before"},
                {"kind": "group", "id": "skills", "allow_split": false,
                 "items": [{"id": "s1", "height": 40}]}
            ]
        }"#;
        let document = JsonSource(json.to_string()).load().expect("Should parse");
        match &document.flow[0] {
            FlowItem::Block(b) => assert_eq!(b.break_before, BreakHint::Before),
            other => panic!("expected block, got {:?}", other),
        }
        match &document.flow[1] {
            FlowItem::Group(g) => assert!(!g.allow_split),
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"templates": [], "flow": [{"kind": "table", "id": "t"}]}"#;
        let result = JsonSource(json.to_string()).load();
        assert!(matches!(result, Err(SourceError::Json(_))));
    }

    #[test]
    fn test_duplicate_template_rejected() {
        let document = PaginationDocument::new(
            vec![
                PageTemplate::new("a4", 595.0, 1000.0),
                PageTemplate::new("a4", 595.0, 900.0),
            ],
            vec![],
        );
        assert!(matches!(
            document.load(),
            Err(SourceError::DuplicateTemplate { .. })
        ));
    }

    #[test]
    fn test_empty_template_id_rejected() {
        let document = PaginationDocument::new(vec![PageTemplate::new(" ", 595.0, 1000.0)], vec![]);
        assert!(matches!(
            document.load(),
            Err(SourceError::EmptyTemplateId { index: 0 })
        ));
    }

    #[test]
    fn test_file_extension_required() {
        let result = DocumentFile::new("resume.yaml").load();
        assert!(matches!(result, Err(SourceError::UnknownFormat { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = DocumentFile::new("/nonexistent/resume.toml").load();
        assert!(matches!(result, Err(SourceError::Io { .. })));
    }
}
