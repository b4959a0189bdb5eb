//! Heading anchor injection.

use std::fmt::Write;

use crate::node::{Node, NodeKind};

/// Options for heading anchor links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnchorOptions {
    /// Prefix put before the heading identifier to form the anchor's own
    /// `id`. Setting this to `""` duplicates ids in the DOM, so keep a
    /// prefix. Default: `"a-"`.
    pub id_prefix: String,
    /// CSS classes applied to the anchor. Default: `["anchor"]`.
    pub classes: Vec<String>,
    /// Visible content of the anchor; any HTML or a single glyph.
    /// Default: `"#"`.
    pub content: String,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            id_prefix: "a-".to_owned(),
            classes: vec!["anchor".to_owned()],
            content: "#".to_owned(),
        }
    }
}

/// Writes an anchor link inside each heading, just before it closes.
///
/// Pure function of its options and the heading's identifier. Identifiers are
/// reproduced verbatim; uniqueness across the document is the caller's
/// responsibility.
#[derive(Clone, Debug)]
pub(crate) struct AnchorRenderer {
    id_prefix: String,
    classes: String,
    content: String,
}

impl AnchorRenderer {
    pub(crate) fn new(options: AnchorOptions) -> Self {
        Self {
            id_prefix: options.id_prefix,
            classes: options.classes.join(" "),
            content: options.content,
        }
    }

    /// Emit the anchor fragment on the heading's leaving event.
    pub(crate) fn render_node(&self, out: &mut String, node: &Node, entering: bool) {
        if entering {
            return;
        }
        let NodeKind::Heading(data) = &node.kind else {
            return;
        };
        write!(
            out,
            r##" <a id="{prefix}{id}" class="{classes}" href="#{id}">{content}</a>"##,
            prefix = self.id_prefix,
            id = data.id,
            classes = self.classes,
            content = self.content,
        )
        .unwrap();
    }
}
