//! Depth legend.

use serde::Serialize;

use super::controls::Corner;
use crate::markup::{self, Node};
use crate::style::{Color, DEPTH_BUCKETS};

/// One legend row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Swatch color.
    pub color: Color,
    /// Depth range text.
    pub range_label: &'static str,
}

/// Static legend explaining marker colors. Independent of the loaded data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    /// Legend heading.
    pub title: &'static str,
    /// Where the legend is shown.
    pub position: Corner,
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Depth legend built from the marker color table, in ascending depth order.
    pub fn depth() -> Self {
        Self {
            title: "Depth (km)",
            position: Corner::BottomRight,
            entries: DEPTH_BUCKETS
                .iter()
                .map(|bucket| LegendEntry {
                    color: bucket.color,
                    range_label: bucket.label,
                })
                .collect(),
        }
    }

    /// Legend rows.
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Legend as structured content.
    pub fn nodes(&self) -> Vec<Node> {
        let mut items = vec![Node::Strong(self.title.to_string())];
        items.extend(self.entries.iter().map(|entry| Node::Swatch {
            color: entry.color,
            label: entry.range_label.to_string(),
        }));
        vec![Node::List(items)]
    }

    /// Legend as an HTML fragment.
    pub fn to_html(&self) -> String {
        markup::to_html(&self.nodes())
    }
}
