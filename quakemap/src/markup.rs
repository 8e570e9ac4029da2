//! Structured content for popups and controls.
//!
//! Content is built as a tree of [`Node`]s and only turned into text at the edge, so user data
//! from the feed is never spliced into markup unescaped.

use std::fmt::Write;

use serde::Serialize;

use crate::style::Color;

/// Element of structured content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Node {
    /// Heading line.
    Heading(String),
    /// Horizontal separator.
    Rule,
    /// Paragraph of text.
    Paragraph(String),
    /// Emphasized text.
    Strong(String),
    /// Hyperlink.
    Link {
        /// Target address.
        href: String,
        /// Link text.
        text: String,
        /// Open in a new browsing context instead of replacing the current one.
        new_context: bool,
    },
    /// Color swatch with a label.
    Swatch {
        /// Swatch color.
        color: Color,
        /// Label next to the swatch.
        label: String,
    },
    /// Unordered list without bullets.
    List(Vec<Node>),
}

impl Node {
    /// Plain text of the node, without markup.
    pub fn text(&self) -> String {
        match self {
            Node::Heading(text) | Node::Paragraph(text) | Node::Strong(text) => text.clone(),
            Node::Rule => "---".to_string(),
            Node::Link { href, text, .. } => format!("{text} <{href}>"),
            Node::Swatch { color, label } => format!("[{color}] {label}"),
            Node::List(items) => items
                .iter()
                .map(Node::text)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Heading(text) => {
                let _ = write!(out, "<h3>{}</h3>", escape(text));
            }
            Node::Rule => out.push_str("<hr>"),
            Node::Paragraph(text) => {
                let _ = write!(out, "<p>{}</p>", escape(text));
            }
            Node::Strong(text) => {
                let _ = write!(out, "<strong>{}</strong>", escape(text));
            }
            Node::Link {
                href,
                text,
                new_context,
            } => {
                let target = if *new_context {
                    r#" target="_blank" rel="noopener noreferrer""#
                } else {
                    ""
                };
                let _ = write!(
                    out,
                    r#"<a href="{}"{target}>{}</a>"#,
                    escape(href),
                    escape(text)
                );
            }
            Node::Swatch { color, label } => {
                let _ = write!(
                    out,
                    r#"<li class="circle" style="background-color:{}">{}</li>"#,
                    color.to_hex(),
                    escape(label)
                );
            }
            Node::List(items) => {
                out.push_str(r#"<ul style="list-style-type:none; text-align: center">"#);
                for item in items {
                    item.write_html(out);
                }
                out.push_str("</ul>");
            }
        }
    }
}

/// Renders nodes as an HTML fragment.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

/// Renders nodes as plain text, one node per line.
pub fn to_text(nodes: &[Node]) -> String {
    nodes.iter().map(Node::text).collect::<Vec<_>>().join("\n")
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_feed_text() {
        let nodes = [
            Node::Heading("<script>alert('x')</script>".to_string()),
            Node::Link {
                href: r#"https://example.com/?a=1&b="2""#.to_string(),
                text: "More".to_string(),
                new_context: true,
            },
        ];

        insta::assert_snapshot!(
            to_html(&nodes),
            @r#"<h3>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;</h3><a href="https://example.com/?a=1&amp;b=&quot;2&quot;" target="_blank" rel="noopener noreferrer">More</a>"#
        );
    }

    #[test]
    fn plain_text() {
        let nodes = [
            Node::Paragraph("a".to_string()),
            Node::Rule,
            Node::List(vec![Node::Swatch {
                color: Color::YELLOW,
                label: "30-50".to_string(),
            }]),
        ];

        assert_eq!(to_text(&nodes), "a\n---\n[yellow] 30-50");
    }
}
