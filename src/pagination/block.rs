//! Placement of atomic blocks and the page-break hints shared with groups.

use super::page::{BreakReason, Pager};
use super::types::{BreakHint, FlowBlock, FlowItem, PageEntry};
use super::warning::PaginationWarning;

// ── Break hints ───────────────────────────────────────────────────

/// Honor `break_before` for an item about to be placed.
///
/// `Avoid` breaks only when the item would not fit in what is left of a
/// non-empty page. This deliberately differs from CSS `break-before: avoid`.
pub(crate) fn apply_break_before(
    pager: &mut Pager<'_>,
    template_id: Option<&str>,
    hint: BreakHint,
    height: f64,
) {
    if !pager.has_entries() {
        return;
    }
    match hint {
        BreakHint::Before => pager.break_page(template_id, BreakReason::BreakBefore),
        BreakHint::Avoid if !pager.fits(height) => {
            pager.break_page(template_id, BreakReason::Avoid)
        }
        _ => {}
    }
}

/// Start a new page when an item and the start of its successor cannot share
/// the current one.
pub(crate) fn apply_keep_with_next(
    pager: &mut Pager<'_>,
    template_id: Option<&str>,
    own_height: f64,
    next: Option<&FlowItem>,
) {
    let Some(next) = next else {
        return;
    };
    if pager.has_entries() && !pager.fits(own_height + next.min_lead_height()) {
        pager.break_page(template_id, BreakReason::KeepWithNext);
    }
}

/// Honor `break_after` once an item has been placed
pub(crate) fn apply_break_after(pager: &mut Pager<'_>, hint: BreakHint) {
    if hint == BreakHint::After {
        pager.break_page(None, BreakReason::BreakAfter);
    }
}

// ── Blocks ────────────────────────────────────────────────────────

/// Place a standalone block.
///
/// A block taller than the page is still placed (alone on a fresh page when
/// possible) and reported; it is never dropped or retried.
pub(crate) fn place_block(pager: &mut Pager<'_>, block: &FlowBlock, next: Option<&FlowItem>) {
    let template_id = block.template_id.as_deref();
    let height = block.measured_height();

    pager.ensure_template(template_id);
    apply_break_before(pager, template_id, block.break_before, height);
    if block.keep_with_next {
        apply_keep_with_next(pager, template_id, height, next);
    }

    if !pager.fits(height) && pager.has_entries() {
        pager.break_page(template_id, BreakReason::NoFit);
    }
    // Checked against the page the block lands on, whose template may differ.
    if pager.is_oversized(height) {
        pager.warn(PaginationWarning::block_oversized(
            &block.id,
            height,
            pager.capacity(),
        ));
    }

    pager.place(
        PageEntry::Block {
            node_id: block.id.clone(),
        },
        height,
    );
    apply_break_after(pager, block.break_after);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaginationConfig;
    use crate::pagination::types::PageTemplate;
    use crate::pagination::warning::WarningKind;

    fn templates() -> Vec<PageTemplate> {
        vec![PageTemplate::new("a4", 600.0, 1000.0)]
    }

    #[test]
    fn test_blocks_share_page_until_full() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        for (id, h) in [("a", 400.0), ("b", 400.0), ("c", 400.0)] {
            place_block(&mut pager, &FlowBlock::new(id, h), None);
        }
        let (result, _) = pager.finish();
        assert_eq!(result.pages.len(), 2);
        assert_eq!(result.pages[0].entries.len(), 2);
        assert_eq!(result.pages[1].used_height, 400.0);
    }

    #[test]
    fn test_avoid_breaks_only_on_overflow() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(&mut pager, &FlowBlock::new("a", 500.0), None);
        place_block(
            &mut pager,
            &FlowBlock::new("b", 300.0).with_break_before(BreakHint::Avoid),
            None,
        );
        assert_eq!(pager.page_index(), 0);
        place_block(
            &mut pager,
            &FlowBlock::new("c", 300.0).with_break_before(BreakHint::Avoid),
            None,
        );
        assert_eq!(pager.page_index(), 1);
    }

    #[test]
    fn test_keep_with_next_moves_block() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(&mut pager, &FlowBlock::new("intro", 700.0), None);

        let heading = FlowBlock::new("heading", 100.0).with_keep_with_next(true);
        let body = FlowItem::Block(FlowBlock::new("body", 250.0));
        place_block(&mut pager, &heading, Some(&body));
        assert_eq!(pager.page_index(), 1);
    }

    #[test]
    fn test_keep_with_next_without_successor_is_ignored() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(&mut pager, &FlowBlock::new("intro", 700.0), None);
        let last = FlowBlock::new("last", 100.0).with_keep_with_next(true);
        place_block(&mut pager, &last, None);
        assert_eq!(pager.page_index(), 0);
    }

    #[test]
    fn test_oversized_block_warns_and_is_placed() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(&mut pager, &FlowBlock::new("small", 100.0), None);
        place_block(&mut pager, &FlowBlock::new("huge", 1500.0), None);
        let (result, _) = pager.finish();
        assert_eq!(result.pages.len(), 2);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::BlockOversized);
        assert_eq!(result.warnings[0].node_id.as_deref(), Some("huge"));
        assert!(result.pages[1].is_overflowing());
    }

    #[test]
    fn test_block_within_tolerance_still_warns() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(&mut pager, &FlowBlock::new("edge", 1000.005), None);
        let (result, _) = pager.finish();
        assert!(result.pages[0].is_overflowing());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::BlockOversized);
    }

    #[test]
    fn test_block_at_capacity_does_not_warn() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(&mut pager, &FlowBlock::new("exact", 1000.0), None);
        let (result, _) = pager.finish();
        assert!(!result.pages[0].is_overflowing());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_break_after_starts_fresh_page() {
        let templates = templates();
        let config = PaginationConfig::default();
        let mut pager = Pager::new(&templates, &config).unwrap();
        place_block(
            &mut pager,
            &FlowBlock::new("cover", 100.0).with_break_after(BreakHint::After),
            None,
        );
        place_block(&mut pager, &FlowBlock::new("next", 100.0), None);
        let (result, _) = pager.finish();
        assert_eq!(result.pages.len(), 2);
    }
}
