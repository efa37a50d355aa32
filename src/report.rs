//! Plain-text rendering of a pagination result
//!
//! The output is deterministic, which makes it suitable for the CLI and for
//! snapshot tests.

use crate::pagination::{PageEntry, PaginationResult};

/// Render pages, entries, and warnings as indented text
pub fn render_text(result: &PaginationResult) -> String {
    let mut out = String::new();

    if result.pages.is_empty() {
        out.push_str("no pages\n");
    }
    for (index, page) in result.pages.iter().enumerate() {
        out.push_str(&format!(
            "page {} [{}] used {:.0}/{:.0}{}\n",
            index + 1,
            page.template_id,
            page.used_height,
            page.content_height,
            if page.is_overflowing() { " overflow" } else { "" }
        ));
        for entry in &page.entries {
            match entry {
                PageEntry::Block { node_id } => {
                    out.push_str(&format!("  block {}\n", node_id));
                }
                PageEntry::Group(w) => {
                    out.push_str(&format!(
                        "  group {} [{}..{})\n",
                        w.group_id, w.item_start, w.item_end
                    ));
                }
            }
        }
    }

    if !result.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &result.warnings {
            out.push_str(&format!("  {}\n", warning));
        }
    }
    out
}
