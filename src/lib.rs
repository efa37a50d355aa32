//! CV Pagination - page-break prediction for a visual résumé editor
//!
//! This library takes an already-measured document flow (blocks, repeated
//! groups, and page templates) and predicts how it spreads across pages,
//! honoring break hints, keep-with-next, orphans, and widows. Anything it cannot
//! honor is reported as a warning rather than an error.
//!
//! # Example
//!
//! ```rust
//! use cv_pagination::{compose, FlowBlock, PageTemplate, PaginationDocument};
//!
//! let document = PaginationDocument::new(
//!     vec![PageTemplate::new("a4", 595.0, 1000.0)],
//!     vec![
//!         FlowBlock::new("header", 300.0).into(),
//!         FlowBlock::new("summary", 800.0).into(),
//!     ],
//! );
//!
//! let result = compose(&document);
//! assert_eq!(result.pages.len(), 2);
//! assert!(result.warnings.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod pagination;
pub mod report;
pub mod source;

pub use config::{OversizedGroupMode, PaginationConfig, TemplateSequencing};
pub use error::{ConfigError, Error, SourceError};
pub use pagination::{
    compose, compose_with_config, compose_with_policy, compose_with_stats, BlockRole, BreakHint,
    ComposeStats, FlowBlock, FlowGroup, FlowItem, ForcedSplit, GroupWindow, OversizedGroupPlan,
    OversizedGroupPolicy, PageEntry, PageTemplate, PaginatedPage, PaginationDocument,
    PaginationResult, PaginationWarning, VisibleOverflow, WarningKind,
};
pub use report::render_text;
pub use source::{DocumentFile, FlowSource, JsonSource, TomlSource};

/// Load a document from a source and compose it with the default configuration
pub fn paginate(source: &dyn FlowSource) -> Result<PaginationResult, Error> {
    paginate_with_config(source, &PaginationConfig::default())
}

/// Load a document from a source and compose it with the given configuration
///
/// # Example
///
/// ```rust
/// use cv_pagination::{paginate_with_config, OversizedGroupMode, PaginationConfig, TomlSource};
///
/// let source = TomlSource(r#"
///     [[templates]]
///     id = "a4"
///     content_width = 595.0
///     content_height = 1000.0
///
///     [[flow]]
///     kind = "block"
///     id = "header"
///     height = 200.0
/// "#.to_string());
///
/// let config = PaginationConfig::new().with_oversized_groups(OversizedGroupMode::Overflow);
/// let result = paginate_with_config(&source, &config).unwrap();
/// assert_eq!(result.pages.len(), 1);
/// ```
pub fn paginate_with_config(
    source: &dyn FlowSource,
    config: &PaginationConfig,
) -> Result<PaginationResult, Error> {
    config.validate()?;
    let document = source.load()?;
    Ok(compose_with_config(&document, config))
}
