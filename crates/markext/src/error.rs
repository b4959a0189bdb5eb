//! Error types for configuration and rendering.

/// Error assembling a renderer configuration.
///
/// Reported from [`RendererBuilder::build`](crate::RendererBuilder::build),
/// before any render begins.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The requested highlight theme is not in the bundled theme set.
    #[error("unknown highlight theme: {0:?}")]
    UnknownTheme(String),
}

/// Recoverable syntax highlighting failure.
///
/// Caught by the dispatcher, which falls back to the base renderer's plain
/// code block output; never surfaced to the document.
#[derive(Debug, thiserror::Error)]
#[error("tokenization failed: {0}")]
pub struct HighlightError(#[from] syntect::Error);

/// Error aborting a render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// An admonition directive was recognized while another admonition body
    /// was still open. Nested admonitions are unsupported and rejected
    /// outright instead of emitting unbalanced container markup.
    #[error("admonition directive opened inside an unterminated admonition body")]
    NestedAdmonition,

    /// The walk ended while an admonition body was still being captured, so
    /// its enclosing paragraph never closed. The buffered body is discarded
    /// rather than flushed unwrapped.
    #[error("admonition body was never closed by its enclosing paragraph")]
    UnclosedAdmonition,
}
