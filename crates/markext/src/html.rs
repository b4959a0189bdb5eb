//! Reference HTML base renderer.
//!
//! Covers exactly the node kinds in [`NodeKind`](crate::NodeKind); anything
//! beyond that (tables, lists, links, ...) belongs to a full-featured base
//! renderer supplied by the caller. The extension renderers delegate to
//! whatever base they are configured with, so this one mainly serves tests,
//! examples and small embedders.

use std::fmt::Write;

use crate::node::{Node, NodeKind, Render, WalkStatus};

/// Escape `&`, `<`, `>` and `"` for safe HTML text/attribute content.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Minimal semantic HTML5 renderer.
///
/// Heading identifiers are written verbatim into the `id` attribute; text and
/// code content is escaped.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl Render for HtmlRenderer {
    fn render_node(&mut self, out: &mut String, node: &mut Node, entering: bool) -> WalkStatus {
        match &node.kind {
            NodeKind::Document => {}
            NodeKind::Paragraph => out.push_str(if entering { "<p>" } else { "</p>" }),
            NodeKind::Heading(data) => {
                let level = data.level;
                if entering {
                    if data.id.is_empty() {
                        write!(out, "<h{level}>").unwrap();
                    } else {
                        write!(out, r#"<h{level} id="{}">"#, data.id).unwrap();
                    }
                } else {
                    write!(out, "</h{level}>").unwrap();
                }
            }
            NodeKind::CodeBlock(data) => {
                if data.info.is_empty() {
                    write!(out, "<pre><code>{}</code></pre>", escape_html(&node.literal)).unwrap();
                } else {
                    write!(
                        out,
                        r#"<pre><code class="language-{}">{}</code></pre>"#,
                        escape_html(&data.info),
                        escape_html(&node.literal)
                    )
                    .unwrap();
                }
            }
            NodeKind::Text => out.push_str(&escape_html(&node.literal)),
            NodeKind::Emphasis => out.push_str(if entering { "<em>" } else { "</em>" }),
            NodeKind::Strong => out.push_str(if entering { "<strong>" } else { "</strong>" }),
        }
        WalkStatus::Continue
    }
}
