//! Working page tracker
//!
//! Holds the mutable per-page state of a single composition: the page being
//! filled, the pages already closed, and the warnings gathered so far. A
//! `Pager` lives only for the duration of one `compose` call.

use std::fmt;

use crate::config::{PaginationConfig, TemplateSequencing};

use super::types::{PageEntry, PageTemplate, PaginatedPage, PaginationResult};
use super::warning::PaginationWarning;

/// Counters describing how much work a composition did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComposeStats {
    /// Flow items dispatched plus group chunk attempts
    pub steps: usize,
    /// Pages emitted
    pub pages: usize,
    /// Page breaks taken, for any reason
    pub breaks: usize,
}

/// Why a page was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BreakReason {
    BreakBefore,
    Avoid,
    KeepWithNext,
    NoFit,
    Exhausted,
    BreakAfter,
    Template,
}

impl fmt::Display for BreakReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BreakReason::BreakBefore => "break-before",
            BreakReason::Avoid => "avoid",
            BreakReason::KeepWithNext => "keep-with-next",
            BreakReason::NoFit => "no-fit",
            BreakReason::Exhausted => "exhausted",
            BreakReason::BreakAfter => "break-after",
            BreakReason::Template => "template",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
struct WorkingPage {
    template: usize,
    remaining: f64,
    used: f64,
    entries: Vec<PageEntry>,
}

impl WorkingPage {
    fn new(template: usize, capacity: f64) -> Self {
        Self {
            template,
            remaining: capacity,
            used: 0.0,
            entries: Vec::new(),
        }
    }
}

pub(crate) struct Pager<'a> {
    templates: &'a [PageTemplate],
    config: &'a PaginationConfig,
    closed: Vec<WorkingPage>,
    current: WorkingPage,
    warnings: Vec<PaginationWarning>,
    pub(crate) stats: ComposeStats,
}

impl<'a> Pager<'a> {
    /// Start on the first declared template; `None` when there is none
    pub(crate) fn new(templates: &'a [PageTemplate], config: &'a PaginationConfig) -> Option<Self> {
        let first = templates.first()?;
        Some(Self {
            templates,
            config,
            closed: Vec::new(),
            current: WorkingPage::new(0, first.capacity()),
            warnings: Vec::new(),
            stats: ComposeStats::default(),
        })
    }

    pub(crate) fn template(&self) -> &'a PageTemplate {
        let templates = self.templates;
        &templates[self.current.template]
    }

    pub(crate) fn capacity(&self) -> f64 {
        self.template().capacity()
    }

    pub(crate) fn has_entries(&self) -> bool {
        !self.current.entries.is_empty()
    }

    pub(crate) fn page_index(&self) -> usize {
        self.closed.len()
    }

    /// Whether `height` fits in what is left of the current page
    pub(crate) fn fits(&self, height: f64) -> bool {
        height <= self.current.remaining + self.config.fit_tolerance
    }

    /// Whether `height` fits on an empty page of the current template
    pub(crate) fn fits_fresh(&self, height: f64) -> bool {
        height <= self.capacity() + self.config.fit_tolerance
    }

    /// Whether `height` exceeds the content height of the current template
    pub(crate) fn is_oversized(&self, height: f64) -> bool {
        height > self.capacity()
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.current.remaining <= self.config.fit_tolerance
    }

    fn resolve(&self, preferred: Option<&str>) -> Option<usize> {
        let id = preferred?;
        let found = self.templates.iter().position(|t| t.id == id);
        if found.is_none() {
            log::warn!("unknown page template '{}', keeping page sequence", id);
        }
        found
    }

    fn fallback_template(&self) -> usize {
        match self.config.sequencing {
            TemplateSequencing::Declared => self.page_index() + 1,
            TemplateSequencing::RepeatCurrent => self.current.template,
        }
        .min(self.templates.len() - 1)
    }

    /// Make the current page use the preferred template.
    ///
    /// An empty page is rebased in place; a page with content is closed first.
    pub(crate) fn ensure_template(&mut self, preferred: Option<&str>) {
        let Some(index) = self.resolve(preferred) else {
            return;
        };
        if index == self.current.template {
            return;
        }
        if self.has_entries() {
            self.open_page(index, BreakReason::Template);
        } else {
            log::trace!(
                "rebasing empty page {} onto template '{}'",
                self.page_index() + 1,
                self.templates[index].id
            );
            self.current = WorkingPage::new(index, self.templates[index].capacity());
        }
    }

    /// Close the current page (if it has content) and continue on a new one
    pub(crate) fn break_page(&mut self, preferred: Option<&str>, reason: BreakReason) {
        if !self.has_entries() {
            self.ensure_template(preferred);
            return;
        }
        let index = self
            .resolve(preferred)
            .unwrap_or_else(|| self.fallback_template());
        self.open_page(index, reason);
    }

    fn open_page(&mut self, template: usize, reason: BreakReason) {
        let capacity = self.templates[template].capacity();
        let closed = std::mem::replace(&mut self.current, WorkingPage::new(template, capacity));
        log::debug!(
            "page {} closed ({}), used {:.1}; opening page {} on '{}'",
            self.closed.len() + 1,
            reason,
            closed.used,
            self.closed.len() + 2,
            self.templates[template].id
        );
        self.closed.push(closed);
        self.stats.breaks += 1;
    }

    /// Append an entry and charge its height against the page
    pub(crate) fn place(&mut self, entry: PageEntry, height: f64) {
        self.current.entries.push(entry);
        self.current.used += height;
        self.current.remaining = (self.current.remaining - height).max(0.0);
    }

    pub(crate) fn warn(&mut self, warning: PaginationWarning) {
        log::debug!("page {}: {}", self.page_index() + 1, warning);
        self.warnings.push(warning);
    }

    pub(crate) fn step(&mut self) {
        self.stats.steps += 1;
    }

    /// Snapshot the working pages into the immutable result
    pub(crate) fn finish(mut self) -> (PaginationResult, ComposeStats) {
        self.closed.push(self.current);
        let templates = self.templates;
        let pages: Vec<PaginatedPage> = self
            .closed
            .into_iter()
            .filter(|page| !page.entries.is_empty())
            .map(|page| {
                let template = &templates[page.template];
                PaginatedPage {
                    template_id: template.id.clone(),
                    content_width: template.content_width,
                    content_height: template.content_height,
                    entries: page.entries,
                    used_height: page.used,
                }
            })
            .collect();
        let stats = ComposeStats {
            pages: pages.len(),
            ..self.stats
        };
        (
            PaginationResult {
                pages,
                warnings: self.warnings,
            },
            stats,
        )
    }
}
