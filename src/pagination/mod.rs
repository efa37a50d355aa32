//! Pagination engine for predicting how measured content spreads over pages
//!
//! This module takes a [`PaginationDocument`] (page templates plus an already
//! measured flow of blocks and groups) and produces a [`PaginationResult`]: the
//! entries of every page and a list of advisory warnings.
//!
//! Composition is a pure function. It holds no state between calls, never
//! reorders or drops content, and always returns a best-effort placement.
//!
//! ## Key Functions
//!
//! - [`compose`]: default configuration
//! - [`compose_with_config`]: explicit [`PaginationConfig`]
//! - [`compose_with_policy`]: custom [`OversizedGroupPolicy`]
//! - [`compose_with_stats`]: also returns [`ComposeStats`] work counters

mod block;
mod group;
pub mod page;
pub mod policy;
pub mod types;
pub mod warning;

pub use page::ComposeStats;
pub use policy::{ForcedSplit, OversizedGroupPlan, OversizedGroupPolicy, VisibleOverflow};
pub use types::*;
pub use warning::{PaginationWarning, WarningKind};

use std::collections::HashSet;

use crate::config::PaginationConfig;

use page::Pager;

/// Compose pages with the default configuration
pub fn compose(document: &PaginationDocument) -> PaginationResult {
    compose_with_config(document, &PaginationConfig::default())
}

/// Compose pages with the given configuration
pub fn compose_with_config(
    document: &PaginationDocument,
    config: &PaginationConfig,
) -> PaginationResult {
    compose_with_policy(document, config, config.oversized_groups.policy())
}

/// Compose pages with a custom policy for oversized unsplittable groups
pub fn compose_with_policy(
    document: &PaginationDocument,
    config: &PaginationConfig,
    policy: &dyn OversizedGroupPolicy,
) -> PaginationResult {
    compose_with_stats(document, config, policy).0
}

/// Compose pages and report how much work it took.
///
/// `steps` grows by one per flow item and per group chunk attempt, and is
/// bounded by twice the number of leaf blocks plus the number of flow items.
pub fn compose_with_stats(
    document: &PaginationDocument,
    config: &PaginationConfig,
    policy: &dyn OversizedGroupPolicy,
) -> (PaginationResult, ComposeStats) {
    let Some(mut pager) = Pager::new(&document.templates, config) else {
        log::debug!("no page templates, nothing to compose");
        return (PaginationResult::default(), ComposeStats::default());
    };
    log::debug!(
        "composing {} flow items over {} templates",
        document.flow.len(),
        document.templates.len()
    );

    for (index, item) in document.flow.iter().enumerate() {
        pager.step();
        let next = document.flow.get(index + 1);
        match item {
            FlowItem::Block(b) => block::place_block(&mut pager, b, next),
            FlowItem::Group(g) => group::place_group(&mut pager, g, next, policy),
        }
    }

    let (mut result, stats) = pager.finish();
    report_unplaced(document, &mut result);
    log::debug!(
        "composed {} pages with {} warnings in {} steps",
        stats.pages,
        result.warnings.len(),
        stats.steps
    );
    (result, stats)
}

/// Flag any standalone block or group item that no page ended up holding
fn report_unplaced(document: &PaginationDocument, result: &mut PaginationResult) {
    let entries = result.pages.iter().flat_map(|p| p.entries.iter());
    let mut blocks = HashSet::new();
    let mut covered: HashSet<(&str, usize)> = HashSet::new();
    for entry in entries {
        match entry {
            PageEntry::Block { node_id } => {
                blocks.insert(node_id.as_str());
            }
            PageEntry::Group(w) => {
                covered.extend((w.item_start..w.item_end).map(|i| (w.group_id.as_str(), i)));
            }
        }
    }

    let mut missing = Vec::new();
    for item in &document.flow {
        match item {
            FlowItem::Block(b) if !blocks.contains(b.id.as_str()) => {
                missing.push(
                    PaginationWarning::new(
                        WarningKind::Unplaced,
                        format!("block \"{}\" was not placed on any page", b.id),
                    )
                    .with_node(&b.id),
                );
            }
            FlowItem::Group(g) => {
                for (i, it) in g.items.iter().enumerate() {
                    if !covered.contains(&(g.id.as_str(), i)) {
                        missing.push(
                            PaginationWarning::new(
                                WarningKind::Unplaced,
                                format!("item {} of group \"{}\" was not placed", i, g.id),
                            )
                            .with_node(&it.id)
                            .with_group(&g.id),
                        );
                    }
                }
            }
            _ => {}
        }
    }
    for warning in &missing {
        log::warn!("{}", warning);
    }
    result.warnings.extend(missing);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(flow: Vec<FlowItem>) -> PaginationDocument {
        PaginationDocument::new(vec![PageTemplate::new("a4", 600.0, 1000.0)], flow)
    }

    #[test]
    fn test_no_templates_empty_result() {
        let document = PaginationDocument::new(vec![], vec![FlowBlock::new("a", 10.0).into()]);
        let result = compose(&document);
        assert!(result.pages.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_empty_flow_no_pages() {
        let result = compose(&doc(vec![]));
        assert!(result.pages.is_empty());
    }

    #[test]
    fn test_negative_height_clamped() {
        let result = compose(&doc(vec![
            FlowBlock::new("a", -50.0).into(),
            FlowBlock::new("b", 1000.0).into(),
        ]));
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.pages[0].used_height, 1000.0);
    }

    #[test]
    fn test_group_keep_with_next_moves_group() {
        let group = FlowGroup::new(
            "jobs",
            vec![FlowBlock::new("j1", 200.0), FlowBlock::new("j2", 200.0)],
        )
        .with_allow_split(false)
        .with_keep_with_next(true);
        let result = compose(&doc(vec![
            FlowBlock::new("intro", 500.0).into(),
            group.into(),
            FlowBlock::new("footer", 200.0).into(),
        ]));
        assert_eq!(result.pages.len(), 2);
        assert_eq!(result.pages[0].entries.len(), 1);
        assert_eq!(result.page_of("footer"), Some(1));
    }

    #[test]
    fn test_report_unplaced_flags_missing_content() {
        let document = doc(vec![
            FlowBlock::new("a", 10.0).into(),
            FlowGroup::new("g", vec![FlowBlock::new("g0", 10.0), FlowBlock::new("g1", 10.0)])
                .into(),
        ]);
        let mut result = PaginationResult::default();
        report_unplaced(&document, &mut result);
        let kinds: Vec<_> = result.warnings.iter().map(|w| w.kind).collect();
        assert_eq!(kinds, vec![WarningKind::Unplaced; 3]);
        assert_eq!(result.warnings[2].node_id.as_deref(), Some("g1"));
    }

    #[test]
    fn test_stats_count_steps() {
        let group = FlowGroup::new("g", (0..4).map(|i| FlowBlock::new(format!("i{}", i), 400.0)).collect());
        let document = doc(vec![FlowBlock::new("a", 100.0).into(), group.into()]);
        let (result, stats) =
            compose_with_stats(&document, &PaginationConfig::default(), &ForcedSplit);
        assert_eq!(stats.pages, result.pages.len());
        assert!(stats.steps <= document.flow.len() + 2 * document.leaf_count());
    }
}
