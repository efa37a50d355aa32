//! Advisory diagnostics produced while composing pages.
//!
//! Warnings never abort composition. Downstream tools key off the `type` string
//! and the correlation ids, so the strings below must stay stable.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Category of a pagination warning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningKind {
    /// A single block or group item is taller than any page
    BlockOversized,
    /// An unsplittable group is taller than any page
    GroupOversized,
    /// Widow rule satisfied by shrinking a chunk, or violated and accepted
    WidowsAdjusted,
    /// Reserved; never emitted by the current placement rules
    OrphansAdjusted,
    /// A block could not be represented on any page
    Unplaced,
}

impl WarningKind {
    pub const ALL: [WarningKind; 5] = [
        WarningKind::BlockOversized,
        WarningKind::GroupOversized,
        WarningKind::WidowsAdjusted,
        WarningKind::OrphansAdjusted,
        WarningKind::Unplaced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WarningKind::BlockOversized => "block-oversized",
            WarningKind::GroupOversized => "group-oversized",
            WarningKind::WidowsAdjusted => "widows-adjusted",
            WarningKind::OrphansAdjusted => "orphans-adjusted",
            WarningKind::Unplaced => "unplaced",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A warning about content that could not be placed as the author asked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl PaginationWarning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            node_id: None,
            group_id: None,
        }
    }

    pub fn with_node(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = Some(node_id.into());
        self
    }

    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    pub(crate) fn block_oversized(node_id: &str, height: f64, capacity: f64) -> Self {
        Self::new(
            WarningKind::BlockOversized,
            format!(
                "block \"{}\" is {:.1} tall but pages only hold {:.1}",
                node_id, height, capacity
            ),
        )
        .with_node(node_id)
    }

    pub(crate) fn group_oversized(group_id: &str, height: f64, capacity: f64) -> Self {
        Self::new(
            WarningKind::GroupOversized,
            format!(
                "unsplittable group \"{}\" is {:.1} tall but pages only hold {:.1}",
                group_id, height, capacity
            ),
        )
        .with_group(group_id)
    }

    pub(crate) fn widows_shrunk(group_id: &str, moved: usize, widows: usize) -> Self {
        Self::new(
            WarningKind::WidowsAdjusted,
            format!(
                "moved {} item(s) of group \"{}\" to the next page to keep {} together",
                moved, group_id, widows
            ),
        )
        .with_group(group_id)
    }

    pub(crate) fn widows_violated(group_id: &str, remaining: usize, widows: usize) -> Self {
        Self::new(
            WarningKind::WidowsAdjusted,
            format!(
                "group \"{}\" leaves {} item(s) for its last page, fewer than widows={}",
                group_id, remaining, widows
            ),
        )
        .with_group(group_id)
    }
}

impl fmt::Display for PaginationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_strings_are_stable() {
        let names: Vec<String> = WarningKind::ALL.iter().map(|k| k.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "block-oversized",
                "group-oversized",
                "widows-adjusted",
                "orphans-adjusted",
                "unplaced"
            ]
        );
    }

    #[test]
    fn test_serialized_type_matches_display() {
        for kind in WarningKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_warning_serializes_type_field() {
        let warning = PaginationWarning::block_oversized("hero", 1200.0, 1000.0);
        let value = serde_json::to_value(&warning).unwrap();
        assert_eq!(value["type"], "block-oversized");
        assert_eq!(value["node_id"], "hero");
        assert!(value.get("group_id").is_none());
    }

    #[test]
    fn test_display() {
        let warning = PaginationWarning::widows_violated("jobs", 1, 2);
        assert_eq!(
            warning.to_string(),
            "[widows-adjusted] group \"jobs\" leaves 1 item(s) for its last page, fewer than widows=2"
        );
    }
}
