//! Extension layer over a markdown node-visitor rendering pipeline.
//!
//! Markdown rendering is modeled as a depth-first [`walk`] over a [`Node`]
//! tree, with every `(node, entering)` event handled by a [`Render`] visitor.
//! This crate supplies three optional behaviors composed in front of a
//! caller-supplied base visitor:
//!
//! - heading anchor links ([`AnchorOptions`])
//! - syntax-highlighted code blocks ([`HighlightOptions`], via syntect)
//! - `!!! kind ["title"]` admonition paragraphs
//!
//! The [`ExtendedRenderer`] dispatcher routes each event to the right
//! extension and falls back to the base renderer whenever no extension
//! applies or an extension declines. Parsing markdown into the tree is out of
//! scope; [`HtmlRenderer`] is a compact reference base covering the node
//! kinds defined here.
//!
//! # Example
//!
//! ```
//! use markext::{AnchorOptions, ExtendedRenderer, HtmlRenderer, Node};
//!
//! let mut renderer = ExtendedRenderer::extend(Box::new(HtmlRenderer))
//!     .with_heading_anchors(AnchorOptions::default())
//!     .with_admonitions()
//!     .build()
//!     .expect("default configuration is valid");
//!
//! let mut doc = Node::document(vec![
//!     Node::heading(1, "intro", vec![Node::text("Intro")]),
//!     Node::paragraph(vec![Node::text("!!! note \"Heads up\"\nRead this first.\n")]),
//! ]);
//! let html = renderer.render_document(&mut doc).unwrap();
//!
//! assert!(html.contains(r##"<a id="a-intro" class="anchor" href="#intro">#</a>"##));
//! assert!(html.contains(r#"<div class="admonition note">"#));
//! ```

mod admonition;
mod anchor;
mod error;
mod highlight;
mod html;
mod node;
mod renderer;

pub use anchor::AnchorOptions;
pub use error::{ConfigError, HighlightError, RenderError};
pub use highlight::{CodeHighlighter, DEFAULT_THEME, HighlightFormat, HighlightOptions};
pub use html::{HtmlRenderer, escape_html};
pub use node::{CodeBlockData, HeadingData, Node, NodeKind, Render, WalkStatus, walk};
pub use renderer::{ExtendedRenderer, RendererBuilder};
