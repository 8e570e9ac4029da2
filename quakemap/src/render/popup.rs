//! Info popup attached to event markers.

use serde::Serialize;

use super::time_format::{full_datetime, short_datetime};
use crate::markup::{self, Node};
use crate::normalize::EventRecord;

/// Heading shown when the feed did not provide a title.
pub const UNKNOWN_LOCATION: &str = "Unknown location";

/// Shown in place of a missing magnitude.
pub const UNKNOWN_MAGNITUDE: &str = "unknown";

/// Structured popup content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Popup {
    nodes: Vec<Node>,
}

impl Popup {
    /// Popup describing the event.
    pub fn for_record(record: &EventRecord) -> Self {
        let title = if record.title.trim().is_empty() {
            UNKNOWN_LOCATION
        } else {
            record.title.as_str()
        };

        let mut builder = PopupBuilder::default()
            .heading(format!("Location: {title}"))
            .rule()
            .paragraph(format!("Time: {}", short_datetime(&record.timestamp)))
            .paragraph(format!("Date: {}", full_datetime(&record.timestamp)))
            .paragraph(format!("Updated: {}", full_datetime(&record.updated)))
            .paragraph(format!(
                "Latitude/Longitude: {}° / {}°",
                record.latitude, record.longitude
            ))
            .paragraph(match record.magnitude {
                Some(magnitude) => format!("Magnitude: {magnitude} ml"),
                None => format!("Magnitude: {UNKNOWN_MAGNITUDE}"),
            })
            .paragraph(format!("Depth: {} km", record.depth_km));

        if !record.url.is_empty() {
            builder = builder.link(&record.url, "More details...");
        }

        builder.build()
    }

    /// Content nodes in display order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// HTML fragment of the popup.
    pub fn to_html(&self) -> String {
        markup::to_html(&self.nodes)
    }

    /// Plain text of the popup.
    pub fn text(&self) -> String {
        markup::to_text(&self.nodes)
    }
}

/// Builder for [`Popup`].
#[derive(Debug, Default)]
pub struct PopupBuilder {
    nodes: Vec<Node>,
}

impl PopupBuilder {
    /// Adds a heading.
    pub fn heading(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Heading(text.into()));
        self
    }

    /// Adds a separator.
    pub fn rule(mut self) -> Self {
        self.nodes.push(Node::Rule);
        self
    }

    /// Adds a paragraph.
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Paragraph(text.into()));
        self
    }

    /// Adds a link opening in a new browsing context.
    pub fn link(mut self, href: impl Into<String>, text: impl Into<String>) -> Self {
        self.nodes.push(Node::Link {
            href: href.into(),
            text: text.into(),
            new_context: true,
        });
        self
    }

    /// Finishes the popup.
    pub fn build(self) -> Popup {
        Popup { nodes: self.nodes }
    }
}
