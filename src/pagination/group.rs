//! Placement of grouped items
//!
//! Unsplittable groups move as one unit. Splittable groups are cut into chunks,
//! one chunk per page, subject to these rules:
//!
//! - **Orphans** (hard): a continuation chunk holds at least
//!   `min(orphans, items left)` items. Continuation chunks always start on a
//!   fresh page, and keep-with-next never shortens one below this minimum. A
//!   chunk is shorter only when a sub-break ends it or the page cannot hold
//!   that many items.
//! - **Widows** (soft): when fewer than `widows` items would be left for later
//!   pages, trailing items of the current chunk move forward, provided the chunk
//!   still satisfies orphans. Either outcome is reported as `widows-adjusted`.
//! - **Sub-breaks**: an item with `break_after = after` closes its chunk.
//! - **Keep-with-next**: an item is not left as the last of a chunk when its
//!   successor could have joined it on a fresh page, unless moving the pair
//!   would leave a continuation chunk short of orphans.
//! - **Oversized items** are placed alone in their own chunk.
//!
//! Every attempt either places at least one item or moves to a fresh page, and
//! an attempt on a fresh page always places something, so the loop runs at most
//! twice per item.

use super::block::{apply_break_after, apply_break_before, apply_keep_with_next};
use super::page::{BreakReason, Pager};
use super::policy::{OversizedGroupPlan, OversizedGroupPolicy};
use super::types::{BreakHint, FlowBlock, FlowGroup, FlowItem, GroupWindow, PageEntry};
use super::warning::PaginationWarning;

/// Place a group, dispatching on its split policy
pub(crate) fn place_group(
    pager: &mut Pager<'_>,
    group: &FlowGroup,
    next: Option<&FlowItem>,
    policy: &dyn OversizedGroupPolicy,
) {
    if group.items.is_empty() {
        log::debug!("group '{}' has no items, skipping", group.id);
        return;
    }
    let template_id = group.template_id.as_deref();

    pager.ensure_template(template_id);
    apply_break_before(pager, template_id, group.break_before, group.total_height());
    if group.keep_with_next {
        apply_keep_with_next(pager, template_id, group.min_lead_height(), next);
    }

    if group.allow_split {
        place_splittable(pager, group);
    } else {
        place_unsplittable(pager, group, policy);
    }
    apply_break_after(pager, group.break_after);
}

// ── Unsplittable groups ───────────────────────────────────────────

fn place_unsplittable(pager: &mut Pager<'_>, group: &FlowGroup, policy: &dyn OversizedGroupPolicy) {
    let template_id = group.template_id.as_deref();
    let total = group.total_height();

    if !pager.is_oversized(total) && !pager.fits(total) && pager.has_entries() {
        pager.break_page(template_id, BreakReason::NoFit);
    }

    // The break above may have switched to a smaller template.
    if pager.is_oversized(total) {
        pager.warn(PaginationWarning::group_oversized(
            &group.id,
            total,
            pager.capacity(),
        ));
        if policy.handle(group, pager.capacity()) == OversizedGroupPlan::Split {
            place_splittable(pager, group);
            return;
        }
        if pager.has_entries() {
            pager.break_page(template_id, BreakReason::NoFit);
        }
    }
    pager.place(window(group, 0, group.items.len()), total);
}

// ── Splittable groups ─────────────────────────────────────────────

/// Items that fit on the current page starting at some index
struct Chunk {
    end: usize,
    /// Closed by an item's `break_after`, so a fresh page would not make it longer
    explicit_break: bool,
}

fn place_splittable(pager: &mut Pager<'_>, group: &FlowGroup) {
    let template_id = group.template_id.as_deref();
    let heights: Vec<f64> = group.items.iter().map(FlowBlock::measured_height).collect();
    let count = heights.len();
    let orphans = group.orphans.max(1) as usize;
    let widows = group.widows.max(1) as usize;

    let mut start = 0;
    while start < count {
        pager.step();
        if pager.is_exhausted() && pager.has_entries() {
            pager.break_page(template_id, BreakReason::Exhausted);
        }

        let required = orphans.min(count - start);
        let chunk = fill_chunk(pager, &group.items, &heights, start, required);
        let mut end = chunk.end;
        let mut locked = chunk.explicit_break;

        if end == start {
            if pager.has_entries() {
                pager.break_page(template_id, BreakReason::NoFit);
                continue;
            }
            // Even a fresh page cannot hold this item.
            end = start + 1;
            locked = true;
        }
        for (item, height) in group.items[start..end].iter().zip(&heights[start..end]) {
            if pager.is_oversized(*height) {
                pager.warn(
                    PaginationWarning::block_oversized(&item.id, *height, pager.capacity())
                        .with_group(&group.id),
                );
            }
        }

        let left = count - end;
        if left > 0 && left < widows {
            let shortage = widows - left;
            let shrunk = (end - start).saturating_sub(shortage);
            if !locked && shrunk >= required {
                end = start + shrunk;
                pager.warn(PaginationWarning::widows_shrunk(&group.id, shortage, widows));
            } else {
                pager.warn(PaginationWarning::widows_violated(&group.id, left, widows));
            }
        }

        let height: f64 = heights[start..end].iter().sum();
        log::trace!(
            "group '{}' items {}..{} on page {}",
            group.id,
            start,
            end,
            pager.page_index() + 1
        );
        pager.place(window(group, start, end), height);
        start = end;

        if start < count {
            let reason = if chunk.explicit_break {
                BreakReason::BreakAfter
            } else {
                BreakReason::NoFit
            };
            pager.break_page(template_id, reason);
        }
    }
}

/// Greedily take items from `start` while they fit on the current page.
///
/// A continuation chunk (`start > 0`) only gives way to a keep-with-next pair
/// once it already holds `required` items.
fn fill_chunk(
    pager: &Pager<'_>,
    items: &[FlowBlock],
    heights: &[f64],
    start: usize,
    required: usize,
) -> Chunk {
    let mut used = 0.0;
    let mut end = start;

    while end < items.len() {
        let item = &items[end];
        let height = heights[end];
        if !pager.fits(used + height) {
            break;
        }

        if item.keep_with_next && item.break_after != BreakHint::After {
            if let Some(next_height) = heights.get(end + 1) {
                let pair = height + next_height;
                let can_defer = (end > start || pager.has_entries())
                    && (start == 0 || end - start >= required);
                if !pager.fits(used + pair) && can_defer && pager.fits_fresh(pair) {
                    break;
                }
            }
        }

        used += height;
        end += 1;
        if item.break_after == BreakHint::After {
            return Chunk {
                end,
                explicit_break: true,
            };
        }
    }

    Chunk {
        end,
        explicit_break: false,
    }
}

fn window(group: &FlowGroup, item_start: usize, item_end: usize) -> PageEntry {
    PageEntry::Group(GroupWindow {
        group_id: group.id.clone(),
        item_start,
        item_end,
    })
}
