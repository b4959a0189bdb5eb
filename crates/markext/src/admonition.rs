//! Admonition (callout) detection and rendering.
//!
//! An admonition is introduced by a directive line at the start of a text
//! node: `!!! kind ["title"]`, newline-terminated. Everything after the first
//! newline is the body, still attached to the same node. The detector strips
//! the directive line, captures the paragraph's rendered body in a buffer and
//! flushes it wrapped in a container once the paragraph closes.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::RenderError;
use crate::node::{Node, NodeKind, Render, WalkStatus};

/// `!!! <kind>` with an optional quoted title, terminated by a newline.
static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^!!!\s?(\w+(?: +\w+)*)(?: +"(.*?)")? *\n"#).unwrap());

/// Parsed directive line.
struct Directive {
    kind: String,
    title: Option<String>,
    /// Byte offset where the body starts (just past the first newline).
    body_start: usize,
}

fn parse_directive(text: &str) -> Option<Directive> {
    let caps = DIRECTIVE_RE.captures(text)?;
    let matched = caps.get(0)?;
    Some(Directive {
        kind: caps[1].to_owned(),
        title: caps.get(2).map(|m| m.as_str().to_owned()),
        body_start: matched.end(),
    })
}

enum State {
    Idle,
    Capturing { buffer: String },
}

/// Stateful admonition detector, one per rendering pass.
///
/// The directive's kind and quoted title are authored markup and are written
/// verbatim (the title may contain inline HTML); only the body goes through
/// the base renderer's escaping. Exactly one admonition can be in flight at
/// a time; a directive recognized
/// while a body is still open terminates the walk with
/// [`RenderError::NestedAdmonition`]. Not safe for overlapping renders.
pub(crate) struct AdmonitionRenderer {
    state: State,
    error: Option<RenderError>,
}

impl AdmonitionRenderer {
    pub(crate) fn new() -> Self {
        Self {
            state: State::Idle,
            error: None,
        }
    }

    /// Handle one traversal event, forwarding to `base` wherever no
    /// admonition is involved.
    pub(crate) fn render_node(
        &mut self,
        out: &mut String,
        node: &mut Node,
        entering: bool,
        base: &mut dyn Render,
    ) -> WalkStatus {
        // A paragraph opening an admonition gets no <p> wrapper from the
        // base; the admonition supplies its own container.
        if matches!(node.kind, NodeKind::Paragraph) && entering {
            let opens_directive = node
                .children
                .first()
                .is_some_and(|child| DIRECTIVE_RE.is_match(&child.literal));
            if !opens_directive {
                return base.render_node(out, node, entering);
            }
            if matches!(self.state, State::Capturing { .. }) {
                return self.reject(RenderError::NestedAdmonition);
            }
            return WalkStatus::Continue;
        }

        match self.state {
            State::Idle => self.try_open(out, node, entering, base),
            State::Capturing { .. } => self.capture(out, node, entering, base),
        }
    }

    /// Abort checks at the end of a walk.
    pub(crate) fn finish(&mut self) -> Result<(), RenderError> {
        if let Some(error) = self.error.take() {
            self.state = State::Idle;
            return Err(error);
        }
        if matches!(self.state, State::Capturing { .. }) {
            self.state = State::Idle;
            return Err(RenderError::UnclosedAdmonition);
        }
        Ok(())
    }

    /// Idle: start capturing if this node's literal opens a directive,
    /// otherwise pass through.
    fn try_open(
        &mut self,
        out: &mut String,
        node: &mut Node,
        entering: bool,
        base: &mut dyn Render,
    ) -> WalkStatus {
        let Some(directive) = parse_directive(&node.literal) else {
            return base.render_node(out, node, entering);
        };

        // Strip the directive line; the body stays on this node and renders
        // through the base like any other text.
        node.literal.drain(..directive.body_start);

        let mut buffer = String::with_capacity(256);
        write!(buffer, "<div class=\"admonition {}\">\n\t", directive.kind).unwrap();
        if let Some(title) = directive.title.as_deref()
            && !title.is_empty()
        {
            write!(buffer, "<p class=\"admonition-title\">{title}</p>\n\t").unwrap();
        }
        buffer.push_str("<p>\n");

        let status = base.render_node(&mut buffer, node, entering);
        self.state = State::Capturing { buffer };
        status
    }

    /// Capturing: redirect everything into the buffer until the enclosing
    /// paragraph closes, then flush the wrapped body to the outer sink.
    fn capture(
        &mut self,
        out: &mut String,
        node: &mut Node,
        entering: bool,
        base: &mut dyn Render,
    ) -> WalkStatus {
        if DIRECTIVE_RE.is_match(&node.literal) {
            return self.reject(RenderError::NestedAdmonition);
        }

        if matches!(node.kind, NodeKind::Paragraph) && !entering {
            let State::Capturing { mut buffer } = std::mem::replace(&mut self.state, State::Idle)
            else {
                unreachable!("capture() is only entered while capturing");
            };
            buffer.push_str("\n\t</p>\n</div>\n");
            out.push_str(&buffer);
            // The base's </p> is suppressed to match the suppressed <p>.
            return WalkStatus::Continue;
        }

        let State::Capturing { buffer } = &mut self.state else {
            unreachable!("capture() is only entered while capturing");
        };
        base.render_node(buffer, node, entering)
    }

    /// Record a fatal error, drop any partial buffer and stop the walk.
    fn reject(&mut self, error: RenderError) -> WalkStatus {
        tracing::warn!(error = %error, "aborting render");
        self.error = Some(error);
        self.state = State::Idle;
        WalkStatus::Terminate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html::HtmlRenderer;
    use crate::node::walk;
    use pretty_assertions::assert_eq;

    /// Wires the detector to an [`HtmlRenderer`] base, like the dispatcher
    /// does for non-heading, non-code nodes.
    struct Harness {
        admonition: AdmonitionRenderer,
        base: HtmlRenderer,
    }

    impl Render for Harness {
        fn render_node(&mut self, out: &mut String, node: &mut Node, entering: bool) -> WalkStatus {
            self.admonition
                .render_node(out, node, entering, &mut self.base)
        }
    }

    fn render(mut doc: Node) -> Result<String, RenderError> {
        let mut harness = Harness {
            admonition: AdmonitionRenderer::new(),
            base: HtmlRenderer,
        };
        let mut out = String::new();
        walk(&mut doc, &mut harness, &mut out);
        harness.admonition.finish()?;
        Ok(out)
    }

    fn directive_paragraph(text: &str) -> Node {
        Node::paragraph(vec![Node::text(text)])
    }

    #[test]
    fn test_admonition_with_title() {
        let html = render(Node::document(vec![directive_paragraph(
            "!!! note \"Title\"\nLine one\nLine two\n",
        )]))
        .unwrap();
        assert_eq!(
            html,
            "<div class=\"admonition note\">\n\t<p class=\"admonition-title\">Title</p>\n\t<p>\nLine one\nLine two\n\n\t</p>\n</div>\n"
        );
    }

    #[test]
    fn test_admonition_without_title() {
        let html = render(Node::document(vec![directive_paragraph(
            "!!! warning\nBody text\n",
        )]))
        .unwrap();
        assert!(html.contains("<div class=\"admonition warning\">"));
        assert!(!html.contains("admonition-title"));
        assert!(html.contains("Body text"));
    }

    #[test]
    fn test_multi_word_kind() {
        let html = render(Node::document(vec![directive_paragraph(
            "!!! custom kind\nBody\n",
        )]))
        .unwrap();
        assert!(html.contains("<div class=\"admonition custom kind\">"));
    }

    #[test]
    fn test_title_is_authored_markup_written_verbatim() {
        let html = render(Node::document(vec![directive_paragraph(
            "!!! note \"See <code>walk</code>\"\nBody\n",
        )]))
        .unwrap();
        assert!(html.contains(r#"<p class="admonition-title">See <code>walk</code></p>"#));
    }

    #[test]
    fn test_empty_quoted_title_is_omitted() {
        let html = render(Node::document(vec![directive_paragraph(
            "!!! note \"\"\nBody\n",
        )]))
        .unwrap();
        assert!(!html.contains("admonition-title"));
    }

    #[test]
    fn test_empty_body_still_produces_container() {
        let html = render(Node::document(vec![directive_paragraph("!!! note\n")])).unwrap();
        assert_eq!(
            html,
            "<div class=\"admonition note\">\n\t<p>\n\n\t</p>\n</div>\n"
        );
    }

    #[test]
    fn test_inline_markup_in_body_renders_through_base() {
        let html = render(Node::document(vec![Node::paragraph(vec![
            Node::text("!!! note\nSee "),
            Node::strong(vec![Node::text("this")]),
            Node::text(" first"),
        ])]))
        .unwrap();
        assert!(html.contains("See <strong>this</strong> first"));
    }

    #[test]
    fn test_ordinary_paragraph_passes_through() {
        let html = render(Node::document(vec![directive_paragraph(
            "just some text",
        )]))
        .unwrap();
        assert_eq!(html, "<p>just some text</p>");
    }

    #[test]
    fn test_directive_without_newline_is_inert() {
        let html = render(Node::document(vec![directive_paragraph("!!! note")])).unwrap();
        assert_eq!(html, "<p>!!! note</p>");
    }

    #[test]
    fn test_two_sequential_admonitions() {
        let html = render(Node::document(vec![
            directive_paragraph("!!! note\nFirst\n"),
            directive_paragraph("!!! warning\nSecond\n"),
        ]))
        .unwrap();
        assert!(html.contains("admonition note"));
        assert!(html.contains("admonition warning"));
        assert_eq!(html.matches("<div").count(), 2);
        assert_eq!(html.matches("</div>").count(), 2);
    }

    #[test]
    fn test_nested_directive_is_rejected() {
        let err = render(Node::document(vec![Node::paragraph(vec![
            Node::text("!!! note\nOuter "),
            Node::text("!!! warning\ninner\n"),
        ])]))
        .unwrap_err();
        assert_eq!(err, RenderError::NestedAdmonition);
    }

    #[test]
    fn test_rejected_render_flushes_nothing() {
        let mut harness = Harness {
            admonition: AdmonitionRenderer::new(),
            base: HtmlRenderer,
        };
        let mut doc = Node::document(vec![Node::paragraph(vec![
            Node::text("!!! note\nOuter "),
            Node::text("!!! warning\ninner\n"),
        ])]);
        let mut out = String::new();
        let status = walk(&mut doc, &mut harness, &mut out);
        assert_eq!(status, WalkStatus::Terminate);
        assert_eq!(out, "");
    }

    #[test]
    fn test_unclosed_body_is_an_error() {
        // Directive on a bare text node, outside any paragraph: nothing ever
        // closes the capture.
        let err = render(Node::document(vec![Node::text("!!! note\nBody\n")])).unwrap_err();
        assert_eq!(err, RenderError::UnclosedAdmonition);
    }

    #[test]
    fn test_directive_line_is_stripped_from_node() {
        let mut harness = Harness {
            admonition: AdmonitionRenderer::new(),
            base: HtmlRenderer,
        };
        let mut doc = Node::document(vec![directive_paragraph("!!! note\nBody\n")]);
        let mut out = String::new();
        walk(&mut doc, &mut harness, &mut out);
        assert_eq!(doc.children[0].children[0].literal, "Body\n");
    }

    #[test]
    fn test_directive_regex_shapes() {
        assert!(DIRECTIVE_RE.is_match("!!! note\n"));
        assert!(DIRECTIVE_RE.is_match("!!!danger\n"));
        assert!(DIRECTIVE_RE.is_match("!!! note \"With title\"\n"));
        assert!(DIRECTIVE_RE.is_match("!!! two words \"t\" \n"));
        assert!(!DIRECTIVE_RE.is_match("!!! note"));
        assert!(!DIRECTIVE_RE.is_match(" !!! note\n"));
        assert!(!DIRECTIVE_RE.is_match("!! note\n"));
    }
}
