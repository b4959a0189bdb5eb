//! Extension dispatcher composed in front of a base renderer.

use crate::admonition::AdmonitionRenderer;
use crate::anchor::{AnchorOptions, AnchorRenderer};
use crate::error::{ConfigError, RenderError};
use crate::highlight::{CodeHighlighter, HighlightOptions};
use crate::node::{Node, NodeKind, Render, WalkStatus, walk};

/// Composes the optional extensions in front of a base renderer.
///
/// Every traversal event lands here first: headings go to the anchor
/// injector (then always to the base), code blocks to the highlighter (with
/// fallback to the base on tokenization failure), everything else to the
/// admonition detector or straight to the base. A drop-in [`Render`]
/// implementation, so it can itself be wrapped or handed to an external
/// walker.
///
/// One configured instance serves one render at a time: the admonition
/// detector keeps per-pass state. Build a fresh instance per document for
/// concurrent rendering, or serialize access externally.
pub struct ExtendedRenderer {
    base: Box<dyn Render>,
    anchor: Option<AnchorRenderer>,
    highlighter: Option<CodeHighlighter>,
    admonition: Option<AdmonitionRenderer>,
}

impl ExtendedRenderer {
    /// Start configuring an extension layer over `base`.
    #[must_use]
    pub fn extend(base: Box<dyn Render>) -> RendererBuilder {
        RendererBuilder {
            base,
            anchor: None,
            highlight: None,
            admonitions: false,
        }
    }

    /// Render a whole document: header, walk, footer.
    ///
    /// Fails if the walk was aborted (nested admonition directive) or ended
    /// with an admonition body still open; no partial admonition markup is
    /// emitted in either case.
    pub fn render_document(&mut self, root: &mut Node) -> Result<String, RenderError> {
        let mut out = String::with_capacity(4096);
        self.render_header(&mut out, root);
        walk(root, self, &mut out);
        if let Some(admonition) = &mut self.admonition {
            admonition.finish()?;
        }
        self.render_footer(&mut out, root);
        Ok(out)
    }
}

impl Render for ExtendedRenderer {
    fn render_node(&mut self, out: &mut String, node: &mut Node, entering: bool) -> WalkStatus {
        match node.kind {
            NodeKind::Heading(_) => {
                if let Some(anchor) = &self.anchor {
                    anchor.render_node(out, node, entering);
                }
                self.base.render_node(out, node, entering)
            }
            NodeKind::CodeBlock(ref data) => {
                if let Some(highlighter) = &self.highlighter {
                    match highlighter.render(&node.literal, &data.info) {
                        Ok(html) => {
                            out.push_str(&html);
                            WalkStatus::SkipChildren
                        }
                        Err(error) => {
                            tracing::warn!(error = %error, "falling back to plain code block");
                            self.base.render_node(out, node, entering)
                        }
                    }
                } else {
                    self.base.render_node(out, node, entering)
                }
            }
            _ => {
                if let Some(admonition) = &mut self.admonition {
                    admonition.render_node(out, node, entering, self.base.as_mut())
                } else {
                    self.base.render_node(out, node, entering)
                }
            }
        }
    }

    fn render_header(&mut self, out: &mut String, root: &Node) {
        self.base.render_header(out, root);
    }

    fn render_footer(&mut self, out: &mut String, root: &Node) {
        self.base.render_footer(out, root);
    }
}

/// Builder for [`ExtendedRenderer`].
///
/// Each extension is installed by its `with_*` method; omitted extensions
/// leave the corresponding node kinds entirely to the base renderer.
/// Configuration problems (an unknown theme name) surface from
/// [`build`](Self::build), never mid-render.
pub struct RendererBuilder {
    base: Box<dyn Render>,
    anchor: Option<AnchorOptions>,
    highlight: Option<HighlightOptions>,
    admonitions: bool,
}

impl RendererBuilder {
    /// Inject an anchor link into every heading.
    #[must_use]
    pub fn with_heading_anchors(mut self, options: AnchorOptions) -> Self {
        self.anchor = Some(options);
        self
    }

    /// Highlight fenced code blocks.
    #[must_use]
    pub fn with_code_highlighting(mut self, options: HighlightOptions) -> Self {
        self.highlight = Some(options);
        self
    }

    /// Recognize `!!! kind ["title"]` admonition paragraphs.
    ///
    /// The quoted title is written into the title element verbatim, so it can
    /// carry inline HTML. Like anchor content, it is authored markup rather
    /// than document text; do not feed untrusted input through it.
    #[must_use]
    pub fn with_admonitions(mut self) -> Self {
        self.admonitions = true;
        self
    }

    /// Assemble the renderer.
    pub fn build(self) -> Result<ExtendedRenderer, ConfigError> {
        let highlighter = self.highlight.map(CodeHighlighter::new).transpose()?;
        Ok(ExtendedRenderer {
            base: self.base,
            anchor: self.anchor.map(AnchorRenderer::new),
            highlighter,
            admonition: self.admonitions.then(AdmonitionRenderer::new),
        })
    }
}
