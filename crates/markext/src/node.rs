//! Document tree and visitor contract.
//!
//! The extension renderers in this crate do not parse markdown. They consume
//! an already-built [`Node`] tree and plug into a depth-first [`walk`] that
//! visits every container node twice (entering and leaving) and every leaf
//! node once.

/// Instruction returned by a visitor to control the traversal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// Descend into children and continue normally.
    Continue,
    /// Do not descend into this node's children (and skip its leaving event).
    SkipChildren,
    /// Stop the entire traversal.
    Terminate,
}

/// Heading attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingData {
    /// Heading level (1-6).
    pub level: u8,
    /// Identifier used for the `id` attribute and anchor links.
    ///
    /// Reproduced verbatim; callers are responsible for keeping identifiers
    /// non-empty and unique within a document.
    pub id: String,
}

/// Fenced code block attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBlockData {
    /// Declared language from the fence info string. May be empty.
    pub info: String,
}

/// Kind of a document tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// Root of a document.
    Document,
    /// Paragraph container.
    Paragraph,
    /// Heading container.
    Heading(HeadingData),
    /// Fenced or indented code block. Leaf; source lives in `literal`.
    CodeBlock(CodeBlockData),
    /// Text leaf; content lives in `literal`.
    Text,
    /// Emphasis (`<em>`) container.
    Emphasis,
    /// Strong emphasis (`<strong>`) container.
    Strong,
}

impl NodeKind {
    /// Containers get a leaving event; leaves are visited once.
    #[must_use]
    pub fn is_container(&self) -> bool {
        !matches!(self, NodeKind::Text | NodeKind::CodeBlock(_))
    }
}

/// A node of the document tree.
///
/// Nodes are produced by an external parser; the renderers here only read
/// them, except that the admonition detector strips a matched directive line
/// from the `literal` of the node it is currently processing. Tree structure
/// is never altered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Node kind and kind-specific attributes.
    pub kind: NodeKind,
    /// Raw text content for leaf nodes; empty for containers.
    pub literal: String,
    /// Ordered child nodes.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a document root.
    #[must_use]
    pub fn document(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Document, children)
    }

    /// Create a paragraph.
    #[must_use]
    pub fn paragraph(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Paragraph, children)
    }

    /// Create a heading with the given level and identifier.
    #[must_use]
    pub fn heading(level: u8, id: impl Into<String>, children: Vec<Node>) -> Self {
        Self::container(
            NodeKind::Heading(HeadingData {
                level,
                id: id.into(),
            }),
            children,
        )
    }

    /// Create a code block with a declared language (may be empty) and source.
    #[must_use]
    pub fn code_block(info: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::CodeBlock(CodeBlockData { info: info.into() }),
            literal: source.into(),
            children: Vec::new(),
        }
    }

    /// Create a text leaf.
    #[must_use]
    pub fn text(literal: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            literal: literal.into(),
            children: Vec::new(),
        }
    }

    /// Create an emphasis span.
    #[must_use]
    pub fn emphasis(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Emphasis, children)
    }

    /// Create a strong emphasis span.
    #[must_use]
    pub fn strong(children: Vec<Node>) -> Self {
        Self::container(NodeKind::Strong, children)
    }

    fn container(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            literal: String::new(),
            children,
        }
    }
}

/// Node visitor invoked by [`walk`] for every traversal event.
///
/// `render_node` receives each node twice for containers (`entering` true
/// then false) and once for leaves, and appends output to `out`. The
/// header/footer hooks run once per render, before and after the walk.
pub trait Render {
    /// Handle one `(node, entering)` traversal event.
    fn render_node(&mut self, out: &mut String, node: &mut Node, entering: bool) -> WalkStatus;

    /// Called once before the walk starts.
    fn render_header(&mut self, _out: &mut String, _root: &Node) {}

    /// Called once after the walk completes.
    fn render_footer(&mut self, _out: &mut String, _root: &Node) {}
}

/// Drive a depth-first pre/post-order traversal of `node`.
///
/// Container nodes are visited on entry and exit, leaves on entry only.
/// [`WalkStatus::SkipChildren`] skips both the children and the node's own
/// leaving event. Returns [`WalkStatus::Terminate`] if the visitor stopped
/// the traversal, [`WalkStatus::Continue`] otherwise.
pub fn walk(node: &mut Node, renderer: &mut dyn Render, out: &mut String) -> WalkStatus {
    match renderer.render_node(out, node, true) {
        WalkStatus::Terminate => return WalkStatus::Terminate,
        WalkStatus::SkipChildren => return WalkStatus::Continue,
        WalkStatus::Continue => {}
    }

    for child in &mut node.children {
        if walk(child, renderer, out) == WalkStatus::Terminate {
            return WalkStatus::Terminate;
        }
    }

    if node.kind.is_container() && renderer.render_node(out, node, false) == WalkStatus::Terminate {
        return WalkStatus::Terminate;
    }
    WalkStatus::Continue
}
