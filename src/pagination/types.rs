//! Core types for the pagination engine
//!
//! Input types describe an already-measured document flow; output types describe
//! where each piece of that flow lands. None of these types carry behavior beyond
//! small accessors and builders.

use serde::{Deserialize, Serialize};

use super::warning::{PaginationWarning, WarningKind};

/// Content box of a page (margins and padding already removed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageTemplate {
    pub id: String,
    pub content_width: f64,
    pub content_height: f64,
}

impl PageTemplate {
    pub fn new(id: impl Into<String>, content_width: f64, content_height: f64) -> Self {
        Self {
            id: id.into(),
            content_width,
            content_height,
        }
    }

    /// Usable height, with negative or non-finite values clamped to zero
    pub fn capacity(&self) -> f64 {
        clamp_height(self.content_height)
    }
}

/// Page-break hint attached to a block or group
///
/// Note that `Avoid` on the *before* side is not the CSS meaning: it forces a
/// break when the item would overflow the remaining space of a non-empty page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreakHint {
    #[default]
    Auto,
    Before,
    After,
    Avoid,
}

/// Whether a block stands on its own in the flow or belongs to a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockRole {
    #[default]
    Block,
    Item,
}

fn default_count() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// An atomic piece of content with a fixed measured height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowBlock {
    pub id: String,
    pub height: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub break_before: BreakHint,
    #[serde(default)]
    pub break_after: BreakHint,
    #[serde(default)]
    pub keep_with_next: bool,
    /// Only meaningful when the block is an item of a group
    #[serde(default)]
    pub allow_split: bool,
    #[serde(default = "default_count")]
    pub orphans: u32,
    #[serde(default = "default_count")]
    pub widows: u32,
    #[serde(default)]
    pub group_id: Option<String>,
    #[serde(default)]
    pub role: BlockRole,
    /// Preferred page template; `None` keeps whatever page is current
    #[serde(default)]
    pub template_id: Option<String>,
}

impl FlowBlock {
    pub fn new(id: impl Into<String>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
            width: 0.0,
            break_before: BreakHint::Auto,
            break_after: BreakHint::Auto,
            keep_with_next: false,
            allow_split: false,
            orphans: 1,
            widows: 1,
            group_id: None,
            role: BlockRole::Block,
            template_id: None,
        }
    }

    pub fn with_break_before(mut self, hint: BreakHint) -> Self {
        self.break_before = hint;
        self
    }

    pub fn with_break_after(mut self, hint: BreakHint) -> Self {
        self.break_after = hint;
        self
    }

    pub fn with_keep_with_next(mut self, keep: bool) -> Self {
        self.keep_with_next = keep;
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Mark this block as an item of the given group
    pub fn as_item_of(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self.role = BlockRole::Item;
        self
    }

    /// Measured height with negative or non-finite values clamped to zero
    pub fn measured_height(&self) -> f64 {
        clamp_height(self.height)
    }
}

/// An ordered run of homogeneous items that may be split across pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowGroup {
    pub id: String,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub items: Vec<FlowBlock>,
    #[serde(default = "default_true")]
    pub allow_split: bool,
    #[serde(default = "default_count")]
    pub orphans: u32,
    #[serde(default = "default_count")]
    pub widows: u32,
    #[serde(default)]
    pub keep_with_next: bool,
    #[serde(default)]
    pub break_before: BreakHint,
    #[serde(default)]
    pub break_after: BreakHint,
}

impl FlowGroup {
    pub fn new(id: impl Into<String>, items: Vec<FlowBlock>) -> Self {
        Self {
            id: id.into(),
            template_id: None,
            items,
            allow_split: true,
            orphans: 1,
            widows: 1,
            keep_with_next: false,
            break_before: BreakHint::Auto,
            break_after: BreakHint::Auto,
        }
    }

    pub fn with_allow_split(mut self, allow: bool) -> Self {
        self.allow_split = allow;
        self
    }

    pub fn with_orphans(mut self, orphans: u32) -> Self {
        self.orphans = orphans;
        self
    }

    pub fn with_widows(mut self, widows: u32) -> Self {
        self.widows = widows;
        self
    }

    pub fn with_keep_with_next(mut self, keep: bool) -> Self {
        self.keep_with_next = keep;
        self
    }

    pub fn with_break_before(mut self, hint: BreakHint) -> Self {
        self.break_before = hint;
        self
    }

    pub fn with_break_after(mut self, hint: BreakHint) -> Self {
        self.break_after = hint;
        self
    }

    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template_id = Some(template_id.into());
        self
    }

    /// Sum of the measured heights of all items
    pub fn total_height(&self) -> f64 {
        self.items.iter().map(FlowBlock::measured_height).sum()
    }

    /// Smallest height the group can start a page with.
    ///
    /// A splittable group can begin with just its first `orphans` items; an
    /// unsplittable one has to arrive whole.
    pub fn min_lead_height(&self) -> f64 {
        if !self.allow_split {
            return self.total_height();
        }
        let lead = (self.orphans.max(1) as usize).min(self.items.len());
        self.items[..lead].iter().map(FlowBlock::measured_height).sum()
    }
}

/// A block or a group in reading order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FlowItem {
    Block(FlowBlock),
    Group(FlowGroup),
}

impl FlowItem {
    pub fn id(&self) -> &str {
        match self {
            FlowItem::Block(b) => &b.id,
            FlowItem::Group(g) => &g.id,
        }
    }

    /// Smallest height the item can start a page with
    pub fn min_lead_height(&self) -> f64 {
        match self {
            FlowItem::Block(b) => b.measured_height(),
            FlowItem::Group(g) => g.min_lead_height(),
        }
    }
}

impl From<FlowBlock> for FlowItem {
    fn from(block: FlowBlock) -> Self {
        FlowItem::Block(block)
    }
}

impl From<FlowGroup> for FlowItem {
    fn from(group: FlowGroup) -> Self {
        FlowItem::Group(group)
    }
}

/// Immutable input to [`compose`](super::compose)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationDocument {
    /// Declared order doubles as the fallback page sequence
    #[serde(default)]
    pub templates: Vec<PageTemplate>,
    /// Reading order; never reordered
    #[serde(default)]
    pub flow: Vec<FlowItem>,
}

impl PaginationDocument {
    pub fn new(templates: Vec<PageTemplate>, flow: Vec<FlowItem>) -> Self {
        Self { templates, flow }
    }

    /// Number of leaf blocks, counting each group item separately
    pub fn leaf_count(&self) -> usize {
        self.flow
            .iter()
            .map(|item| match item {
                FlowItem::Block(_) => 1,
                FlowItem::Group(g) => g.items.len(),
            })
            .sum()
    }
}

/// Contiguous item range `[item_start, item_end)` of a group placed on one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupWindow {
    pub group_id: String,
    pub item_start: usize,
    pub item_end: usize,
}

impl GroupWindow {
    pub fn len(&self) -> usize {
        self.item_end - self.item_start
    }

    pub fn is_empty(&self) -> bool {
        self.item_end == self.item_start
    }

    /// Whether this window continues a group started on an earlier page
    pub fn is_continuation(&self) -> bool {
        self.item_start > 0
    }
}

/// One placement on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageEntry {
    Block { node_id: String },
    Group(GroupWindow),
}

/// A finished page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedPage {
    pub template_id: String,
    pub content_width: f64,
    pub content_height: f64,
    pub entries: Vec<PageEntry>,
    /// Measured height accounted on this page; exceeds `content_height` when
    /// oversized content was accepted
    pub used_height: f64,
}

impl PaginatedPage {
    pub fn remaining(&self) -> f64 {
        (self.content_height - self.used_height).max(0.0)
    }

    pub fn is_overflowing(&self) -> bool {
        self.used_height > self.content_height
    }
}

/// Output of [`compose`](super::compose)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationResult {
    pub pages: Vec<PaginatedPage>,
    pub warnings: Vec<PaginationWarning>,
}

impl PaginationResult {
    /// All windows of a group, in page order
    pub fn windows_for(&self, group_id: &str) -> Vec<&GroupWindow> {
        self.pages
            .iter()
            .flat_map(|p| p.entries.iter())
            .filter_map(|e| match e {
                PageEntry::Group(w) if w.group_id == group_id => Some(w),
                _ => None,
            })
            .collect()
    }

    /// Index of the page holding the given standalone block
    pub fn page_of(&self, node_id: &str) -> Option<usize> {
        self.pages.iter().position(|p| {
            p.entries
                .iter()
                .any(|e| matches!(e, PageEntry::Block { node_id: id } if id == node_id))
        })
    }

    pub fn warnings_of(&self, kind: WarningKind) -> impl Iterator<Item = &PaginationWarning> {
        self.warnings.iter().filter(move |w| w.kind == kind)
    }
}

pub(crate) fn clamp_height(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
